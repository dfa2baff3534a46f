//! Tests for directed-only queries.

use super::directed::{DirectedGraph, WeightedDirectedGraph};
use super::traits::{Digraph, Graph};
use super::types::Edge;

/// 1 → 2, 1 → 3, 2 → 3, 3 → 3, plus isolated 4.
fn build_graph() -> DirectedGraph<u32> {
    let graph = DirectedGraph::new();
    graph
        .add_edges([
            Edge::new(1, 2),
            Edge::new(1, 3),
            Edge::new(2, 3),
            Edge::new(3, 3),
        ])
        .unwrap();
    graph.add_vertices([4]).unwrap();
    graph
}

#[test]
fn test_degrees() {
    let graph = build_graph();
    assert_eq!(graph.out_degree(&1), Some(2));
    assert_eq!(graph.in_degree(&1), Some(0));
    assert_eq!(graph.in_degree(&3), Some(3));
    assert_eq!(graph.out_degree(&4), Some(0));
    assert_eq!(graph.in_degree(&4), Some(0));
}

#[test]
fn test_degrees_of_unknown_vertex() {
    let graph = build_graph();
    assert_eq!(graph.out_degree(&99), None);
    assert_eq!(graph.in_degree(&99), None);
}

#[test]
fn test_arcs_are_ordered() {
    let graph = DirectedGraph::new();
    graph.add_edge(Edge::new("x", "y")).unwrap();
    assert!(graph.has_edge(&"x", &"y"));
    assert!(!graph.has_edge(&"y", &"x"));
}

#[test]
fn test_transpose_reverses_arcs_and_keeps_isolates() {
    let graph = build_graph();
    let transposed = graph.transpose();

    assert_eq!(transposed.order(), graph.order());
    assert_eq!(transposed.size(), graph.size());
    assert!(transposed.has_vertex(&4));
    assert!(transposed.has_edge(&2, &1));
    assert!(transposed.has_edge(&3, &3));
    assert!(!transposed.has_edge(&1, &2));
    assert_eq!(transposed.out_degree(&3), Some(3));
}

#[test]
fn test_transpose_is_an_involution() {
    let graph = build_graph();
    let back = graph.transpose().transpose();

    let mut original: Vec<(u32, u32)> = graph
        .edges()
        .into_iter()
        .map(|e| (*e.source(), *e.target()))
        .collect();
    let mut round_trip: Vec<(u32, u32)> = back
        .edges()
        .into_iter()
        .map(|e| (*e.source(), *e.target()))
        .collect();
    original.sort_unstable();
    round_trip.sort_unstable();
    assert_eq!(original, round_trip);
}

#[test]
fn test_transpose_keeps_payloads() {
    let graph = WeightedDirectedGraph::new();
    graph.add_edge(Edge::weighted('a', 'b', 4.5)).unwrap();
    let transposed = graph.transpose();
    assert_eq!(transposed.edge_payload(&'b', &'a'), Some(4.5));
    assert_eq!(transposed.edge_payload(&'a', &'b'), None);
}

#[test]
fn test_transpose_of_empty_store() {
    let graph: DirectedGraph<u8> = DirectedGraph::new();
    let transposed = graph.transpose();
    assert_eq!(transposed.order(), 0);
    assert_ne!(transposed.store_id(), graph.store_id());
}

#[test]
fn test_each_arc_from_and_to() {
    let graph = build_graph();

    let mut out = Vec::new();
    graph.each_arc_from(&1, |arc| {
        out.push(*arc.target());
        false
    });
    out.sort_unstable();
    assert_eq!(out, vec![2, 3]);

    let mut into = Vec::new();
    graph.each_arc_to(&3, |arc| {
        assert_eq!(arc.target(), &3);
        into.push(*arc.source());
        false
    });
    into.sort_unstable();
    assert_eq!(into, vec![1, 2, 3]);
}

#[test]
fn test_each_arc_to_stops_early() {
    let graph = build_graph();
    let mut calls = 0;
    graph.each_arc_to(&3, |_| {
        calls += 1;
        true
    });
    assert_eq!(calls, 1);
}

#[test]
fn test_each_arc_matches_each_edge() {
    let graph = build_graph();
    let mut arcs = 0;
    graph.each_arc(|_| {
        arcs += 1;
        false
    });
    assert_eq!(arcs, graph.size());
}

#[test]
fn test_successors_and_predecessors() {
    let graph = build_graph();

    let mut successors = Vec::new();
    graph.each_successor_of(&2, |v| {
        successors.push(*v);
        false
    });
    assert_eq!(successors, vec![3]);

    let mut predecessors = Vec::new();
    graph.each_predecessor_of(&3, |v| {
        predecessors.push(*v);
        false
    });
    predecessors.sort_unstable();
    assert_eq!(predecessors, vec![1, 2, 3]);
}

#[test]
fn test_digraph_trait_dispatch() {
    fn sources<G: Digraph>(graph: &G) -> Vec<G::Vertex> {
        let mut found = Vec::new();
        graph.each_vertex(|v| {
            if graph.in_degree(v) == Some(0) {
                found.push(v.clone());
            }
            false
        });
        found
    }

    let graph = build_graph();
    let mut roots = sources(&graph);
    roots.sort_unstable();
    assert_eq!(roots, vec![1, 4]);
    assert!(Graph::is_directed(&graph));
}
