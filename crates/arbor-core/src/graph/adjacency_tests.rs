//! Tests for the shared store contract.

use super::directed::{DataDirectedGraph, DirectedGraph, LabeledDirectedGraph, WeightedDirectedGraph};
use super::types::{Edge, EdgeKind};
use super::undirected::{UndirectedGraph, WeightedUndirectedGraph};
use crate::config::{DuplicateEdgePolicy, StoreConfig, MAX_INITIAL_CAPACITY};

/// a → b → c, plus isolated d.
fn build_chain() -> DirectedGraph<&'static str> {
    let graph = DirectedGraph::new();
    graph
        .add_edges([Edge::new("a", "b"), Edge::new("b", "c")])
        .unwrap();
    graph.add_vertices(["d"]).unwrap();
    graph
}

#[test]
fn test_new_store_is_empty() {
    let graph: DirectedGraph<u32> = DirectedGraph::new();
    assert_eq!(graph.order(), 0);
    assert_eq!(graph.size(), 0);
    assert!(graph.is_empty());
    assert!(graph.is_directed());
    assert_eq!(graph.edge_kind(), EdgeKind::Plain);
}

#[test]
fn test_add_vertices_is_idempotent() {
    let graph: UndirectedGraph<u32> = UndirectedGraph::new();
    assert_eq!(graph.add_vertices([1, 2, 3]).unwrap(), 3);
    assert_eq!(graph.add_vertices([2, 3, 4]).unwrap(), 1);
    assert_eq!(graph.order(), 4);
    assert!(graph.has_vertex(&4));
    assert!(!graph.has_vertex(&5));
}

#[test]
fn test_empty_inputs_are_noops() {
    let graph = build_chain();
    assert_eq!(graph.add_vertices(Vec::new()).unwrap(), 0);
    assert_eq!(graph.remove_vertices(Vec::<&str>::new()).unwrap(), 0);
    assert_eq!(graph.add_edges(Vec::new()).unwrap(), 0);
    assert_eq!(graph.remove_edges(Vec::<(&str, &str)>::new()).unwrap(), 0);
    assert_eq!(graph.order(), 4);
    assert_eq!(graph.size(), 2);
}

#[test]
fn test_add_edges_creates_endpoints() {
    let graph = DirectedGraph::new();
    assert!(graph.add_edge(Edge::new(1, 2)).unwrap());
    assert!(graph.has_vertex(&1));
    assert!(graph.has_vertex(&2));
    assert_eq!(graph.order(), 2);
}

#[test]
fn test_duplicate_edges_count_once() {
    let graph = DirectedGraph::new();
    assert_eq!(
        graph
            .add_edges([Edge::new(1, 2), Edge::new(1, 2), Edge::new(2, 1)])
            .unwrap(),
        2
    );
    assert_eq!(graph.size(), 2);

    let undirected = UndirectedGraph::new();
    assert_eq!(
        undirected
            .add_edges([Edge::new(1, 2), Edge::new(2, 1)])
            .unwrap(),
        1
    );
    assert_eq!(undirected.size(), 1);
}

#[test]
fn test_first_payload_wins_by_default() {
    let graph = WeightedDirectedGraph::new();
    graph.add_edge(Edge::weighted("a", "b", 1.0)).unwrap();
    assert!(!graph.add_edge(Edge::weighted("a", "b", 9.0)).unwrap());

    assert_eq!(graph.edge_payload(&"a", &"b"), Some(1.0));
    assert!(graph.has_payload_edge(&Edge::weighted("a", "b", 1.0)));
    assert!(!graph.has_payload_edge(&Edge::weighted("a", "b", 9.0)));
    assert_eq!(graph.size(), 1);
}

#[test]
fn test_overwrite_policy_replaces_payload() {
    let config = StoreConfig::default().with_duplicate_edges(DuplicateEdgePolicy::Overwrite);
    let graph = WeightedUndirectedGraph::with_config(config);
    graph.add_edge(Edge::weighted("a", "b", 1.0)).unwrap();
    assert!(!graph.add_edge(Edge::weighted("b", "a", 7.0)).unwrap());

    // Both records follow the new payload; the count does not move.
    assert_eq!(graph.edge_payload(&"a", &"b"), Some(7.0));
    assert_eq!(graph.edge_payload(&"b", &"a"), Some(7.0));
    assert_eq!(graph.size(), 1);
}

#[test]
fn test_has_edge_ignores_payload() {
    let graph = LabeledDirectedGraph::new();
    graph.add_edge(Edge::labeled(1, 2, "x")).unwrap();
    assert!(graph.has_edge(&1, &2));
    assert!(!graph.has_edge(&2, &1));
    assert!(!graph.has_payload_edge(&Edge::labeled(1, 2, "y")));
}

#[test]
fn test_keyed_payload_edge() {
    let graph: DataDirectedGraph<u8, &str> = DataDirectedGraph::new();
    graph.add_edge(Edge::keyed(1, 2, "key")).unwrap();
    assert!(graph.has_payload_edge(&Edge::keyed(1, 2, "key")));
    assert!(!graph.has_payload_edge(&Edge::with_payload(1, 2, None)));
    assert_eq!(graph.edge_payload(&1, &2), Some(Some("key")));
    assert_eq!(graph.edge_payload(&2, &1), None);
}

#[test]
fn test_remove_edges_ignores_absent_pairs() {
    let graph = build_chain();
    assert_eq!(graph.remove_edges([("a", "b"), ("c", "a")]).unwrap(), 1);
    assert_eq!(graph.size(), 1);
    assert!(!graph.has_edge(&"a", &"b"));
    // Endpoints stay.
    assert!(graph.has_vertex(&"a"));
}

#[test]
fn test_remove_edges_accepts_edges_and_refs() {
    let graph = WeightedDirectedGraph::new();
    let edge = Edge::weighted(1, 2, 3.0);
    graph.add_edge(edge.clone()).unwrap();
    assert_eq!(graph.remove_edges([&edge]).unwrap(), 1);
    assert_eq!(graph.size(), 0);
}

#[test]
fn test_remove_vertex_cascades_edges() {
    let graph = build_chain();
    assert_eq!(graph.remove_vertices([&"b", &"zzz"]).unwrap(), 1);
    assert_eq!(graph.order(), 3);
    assert_eq!(graph.size(), 0);
    assert!(!graph.has_edge(&"a", &"b"));
}

#[test]
fn test_remove_vertex_with_self_loop() {
    let graph = DirectedGraph::new();
    graph
        .add_edges([Edge::new(1, 1), Edge::new(1, 2), Edge::new(3, 1)])
        .unwrap();
    assert_eq!(graph.size(), 3);
    graph.remove_vertices([1]).unwrap();
    assert_eq!(graph.size(), 0);

    let undirected = UndirectedGraph::new();
    undirected
        .add_edges([Edge::new(1, 1), Edge::new(1, 2)])
        .unwrap();
    assert_eq!(undirected.size(), 2);
    undirected.remove_vertices([1]).unwrap();
    assert_eq!(undirected.size(), 0);
    assert_eq!(undirected.degree(&2), Some(0));
}

#[test]
fn test_density() {
    let graph: DirectedGraph<u8> = DirectedGraph::new();
    assert!(graph.density().is_nan());
    graph.add_vertices([1]).unwrap();
    assert!(graph.density().is_nan());

    graph.add_edge(Edge::new(1, 2)).unwrap();
    assert_eq!(graph.density(), 0.5);
    graph.add_edge(Edge::new(2, 1)).unwrap();
    assert_eq!(graph.density(), 1.0);

    let undirected = UndirectedGraph::new();
    undirected.add_edge(Edge::new(1, 2)).unwrap();
    assert_eq!(undirected.density(), 1.0);
}

#[test]
fn test_each_vertex_stops_early() {
    let graph = build_chain();
    let mut seen = 0;
    graph.each_vertex(|_| {
        seen += 1;
        seen == 2
    });
    assert_eq!(seen, 2);
}

#[test]
fn test_each_edge_reports_undirected_edges_once() {
    let graph = UndirectedGraph::new();
    graph
        .add_edges([Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 3)])
        .unwrap();

    let edges = graph.edges();
    assert_eq!(edges.len(), 3);

    let mut pairs: Vec<(i32, i32)> = edges
        .iter()
        .map(|e| (*e.source().min(e.target()), *e.source().max(e.target())))
        .collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 3)]);
}

#[test]
fn test_each_edge_stops_early() {
    let graph = build_chain();
    let mut calls = 0;
    graph.each_edge(|_| {
        calls += 1;
        true
    });
    assert_eq!(calls, 1);
}

#[test]
fn test_each_adjacent_to() {
    let graph = build_chain();
    let mut adjacent = Vec::new();
    graph.each_adjacent_to(&"a", |v| {
        adjacent.push(*v);
        false
    });
    assert_eq!(adjacent, vec!["b"]);

    let mut none = 0;
    graph.each_adjacent_to(&"missing", |_| {
        none += 1;
        false
    });
    assert_eq!(none, 0);
}

#[test]
fn test_each_edge_incident_to_directed() {
    let graph = DirectedGraph::new();
    graph
        .add_edges([Edge::new(1, 2), Edge::new(3, 1), Edge::new(1, 1)])
        .unwrap();

    let mut incident = Vec::new();
    graph.each_edge_incident_to(&1, |e| {
        incident.push((*e.source(), *e.target()));
        false
    });
    incident.sort_unstable();
    assert_eq!(incident, vec![(1, 1), (1, 2), (3, 1)]);
}

#[test]
fn test_each_edge_incident_to_undirected() {
    let graph = UndirectedGraph::new();
    graph
        .add_edges([Edge::new(1, 2), Edge::new(3, 1)])
        .unwrap();

    let mut others = Vec::new();
    graph.each_edge_incident_to(&1, |e| {
        assert_eq!(e.source(), &1);
        others.push(*e.target());
        false
    });
    others.sort_unstable();
    assert_eq!(others, vec![2, 3]);
}

#[test]
fn test_snapshots() {
    let graph = build_chain();
    let mut vertices = graph.vertices();
    vertices.sort_unstable();
    assert_eq!(vertices, vec!["a", "b", "c", "d"]);
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_clear() {
    let graph = build_chain();
    graph.clear().unwrap();
    assert_eq!(graph.order(), 0);
    assert_eq!(graph.size(), 0);
    assert!(graph.density().is_nan());
}

#[test]
fn test_clone_is_deep_and_independent() {
    let graph = build_chain();
    let copy = graph.clone();
    assert_ne!(copy.store_id(), graph.store_id());

    copy.add_edge(Edge::new("c", "d")).unwrap();
    assert_eq!(copy.size(), 3);
    assert_eq!(graph.size(), 2);
}

#[test]
fn test_from_iterator() {
    let graph: UndirectedGraph<u8> = [Edge::new(1, 2), Edge::new(2, 1), Edge::new(2, 3)]
        .into_iter()
        .collect();
    assert_eq!(graph.order(), 3);
    assert_eq!(graph.size(), 2);
}

#[test]
fn test_with_config_keeps_settings() {
    let config = StoreConfig::default().with_initial_capacity(64);
    let graph: DirectedGraph<u64> = DirectedGraph::with_config(config);
    assert_eq!(graph.config().initial_capacity, 64);
    assert_eq!(graph.clone().config(), config);
}

#[test]
fn test_debug_output() {
    let graph = build_chain();
    let debug = format!("{graph:?}");
    assert!(debug.contains("directed"));
    assert!(debug.contains("order: 4"));
    assert!(debug.contains("size: 2"));
}

#[test]
fn test_out_of_range_capacity_does_not_panic() {
    for capacity in [usize::MAX, MAX_INITIAL_CAPACITY + 1] {
        let config = StoreConfig::default().with_initial_capacity(capacity);
        let graph: DirectedGraph<u32> = DirectedGraph::with_config(config);
        assert_eq!(graph.config().initial_capacity, capacity);
        graph.add_edge(Edge::new(1, 2)).unwrap();
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.clone().size(), 1);
    }
}
