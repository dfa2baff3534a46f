//! Tests for the store lock and enumeration tracking.

use super::sync::{is_enumerating, StoreLock};
use crate::error::Error;

#[test]
fn test_store_ids_are_unique() {
    let a = StoreLock::new(0_u32);
    let b = StoreLock::new(0_u32);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_write_outside_enumeration() {
    let lock = StoreLock::new(1_u32);
    *lock.write().unwrap() += 1;
    assert_eq!(*lock.read(), 2);
    assert_eq!(lock.into_inner(), 2);
}

#[test]
fn test_enumerate_marks_and_unmarks_store() {
    let lock = StoreLock::new(vec![1, 2, 3]);
    assert!(!is_enumerating(lock.id()));

    let sum = lock.enumerate(|v| {
        assert!(is_enumerating(lock.id()));
        v.iter().sum::<i32>()
    });

    assert_eq!(sum, 6);
    assert!(!is_enumerating(lock.id()));
}

#[test]
fn test_write_inside_enumeration_is_rejected() {
    let lock = StoreLock::new(0_u32);
    let result = lock.enumerate(|_| lock.write().map(|_| ()));
    match result {
        Err(Error::ReentrantMutation { store }) => assert_eq!(store, lock.id()),
        other => panic!("expected ReentrantMutation, got {other:?}"),
    }
    // Scope is released afterwards.
    assert!(lock.write().is_ok());
}

#[test]
fn test_read_inside_enumeration_is_allowed() {
    let lock = StoreLock::new(5_u32);
    let inner = lock.enumerate(|outer| *outer + *lock.read());
    assert_eq!(inner, 10);
}

#[test]
fn test_other_store_writable_inside_enumeration() {
    let source = StoreLock::new(3_u32);
    let target = StoreLock::new(0_u32);
    source.enumerate(|v| {
        *target.write().unwrap() = *v;
    });
    assert_eq!(*target.read(), 3);
}

#[test]
fn test_nested_enumeration_of_same_store() {
    let lock = StoreLock::new(1_u32);
    lock.enumerate(|_| {
        lock.enumerate(|_| assert!(is_enumerating(lock.id())));
        // Outer scope still active after inner one ends.
        assert!(is_enumerating(lock.id()));
    });
    assert!(!is_enumerating(lock.id()));
}

#[test]
fn test_scope_released_on_panic() {
    let lock = StoreLock::new(0_u32);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        lock.enumerate(|_| panic!("callback failure"));
    }));
    assert!(result.is_err());
    assert!(!is_enumerating(lock.id()));
    assert!(lock.write().is_ok());
}
