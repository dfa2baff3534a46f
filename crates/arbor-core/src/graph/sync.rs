//! Per-store reader/writer lock with enumeration tracking.
//!
//! Every store owns one `parking_lot::RwLock`. Queries take it shared,
//! mutations take it exclusive. Enumerations hold the shared lock for the
//! whole walk and run the caller's callback under it, so a callback that
//! reaches back into the same store needs care:
//!
//! - reads issued from inside the callback use `read_recursive`, which never
//!   queues behind a waiting writer;
//! - writes issued from inside the callback fail with
//!   [`Error::ReentrantMutation`] instead of deadlocking.
//!
//! The set of stores being enumerated is tracked per thread, the same way
//! the HNSW lock-rank checker tracks held ranks.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Ids of the stores this thread is currently enumerating, innermost last.
    static ENUMERATING: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Returns true when this thread is inside an enumeration of store `id`.
pub(crate) fn is_enumerating(id: u64) -> bool {
    ENUMERATING.with(|stack| stack.borrow().contains(&id))
}

/// Marks a store as being enumerated on this thread until dropped.
struct EnumerationScope {
    id: u64,
}

impl EnumerationScope {
    fn enter(id: u64) -> Self {
        ENUMERATING.with(|stack| stack.borrow_mut().push(id));
        Self { id }
    }
}

impl Drop for EnumerationScope {
    fn drop(&mut self) {
        ENUMERATING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|&id| id == self.id) {
                stack.remove(pos);
            }
        });
    }
}

/// Reader/writer lock guarding one store's state.
pub(crate) struct StoreLock<T> {
    id: u64,
    cell: RwLock<T>,
}

impl<T> StoreLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            cell: RwLock::new(value),
        }
    }

    /// Process-unique id of this store.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Shared access for a single query.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        if is_enumerating(self.id) {
            self.cell.read_recursive()
        } else {
            self.cell.read()
        }
    }

    /// Runs `f` under shared access with this store marked as enumerating.
    pub(crate) fn enumerate<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.read();
        let scope = EnumerationScope::enter(self.id);
        let out = f(&guard);
        drop(scope);
        drop(guard);
        out
    }

    /// Exclusive access for a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReentrantMutation`] when called from inside an
    /// enumeration of this same store on the current thread.
    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, T>> {
        if is_enumerating(self.id) {
            tracing::warn!(
                store = self.id,
                "mutation attempted from inside an enumeration of the same store"
            );
            return Err(Error::ReentrantMutation { store: self.id });
        }
        Ok(self.cell.write())
    }

    /// Unwraps the protected value.
    pub(crate) fn into_inner(self) -> T {
        self.cell.into_inner()
    }
}
