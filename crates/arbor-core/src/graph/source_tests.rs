//! Tests for graph sources.

use super::directed::{DataDirectedGraph, WeightedDirectedGraph};
use super::source::{ArcSource, EdgeList, GraphSource};
use super::types::{Edge, EdgeData};
use super::undirected::LabeledUndirectedGraph;

#[test]
fn test_edge_list_counts_distinct_vertices() {
    let source: EdgeList<&str> = EdgeList::new()
        .with_vertex("a")
        .with_vertex("a")
        .with_edge("a", "b")
        .with_edge("b", "c");
    assert_eq!(source.vertex_count(), 3);
    assert_eq!(source.edge_count(), 2);
    assert_eq!(source.listed_vertices().len(), 2);

    let mut seen = Vec::new();
    source.enumerate_vertices(|v| {
        seen.push(*v);
        false
    });
    seen.sort_unstable();
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn test_edge_list_keeps_mixed_payloads_in_order() {
    let source: EdgeList<u8, &str> = EdgeList::new()
        .with_edge(1, 2)
        .with_weighted_edge(2, 3, 0.5)
        .with_labeled_edge(3, 4, "l")
        .with_keyed_edge(4, 5, "k");

    let mut kinds = Vec::new();
    source.enumerate_edges(|edge| {
        kinds.push(edge.payload().kind());
        false
    });
    assert_eq!(kinds.len(), 4);
    assert_eq!(source.edges()[3].payload(), &EdgeData::Keyed(Some("k")));
}

#[test]
fn test_edge_list_enumeration_stops_early() {
    let source: EdgeList<u8> = [(1, 2), (2, 3), (3, 4)].into_iter().collect();
    let mut calls = 0;
    source.enumerate_arcs(|_| {
        calls += 1;
        calls == 2
    });
    assert_eq!(calls, 2);
}

#[test]
fn test_edge_list_push_and_serde() {
    let mut source: EdgeList<u8> = EdgeList::new();
    source.push_vertex(7);
    source.push_edge(Edge::with_payload(1, 2, EdgeData::Weighted(1.5)));

    let json = serde_json::to_string(&source).unwrap();
    let back: EdgeList<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, source);
}

#[test]
fn test_store_as_source_reports_native_payloads() {
    let graph = WeightedDirectedGraph::new();
    graph.add_edge(Edge::weighted(1, 2, 2.5)).unwrap();
    graph.add_vertices([3]).unwrap();

    assert_eq!(GraphSource::vertex_count(&graph), 3);
    let mut payloads = Vec::new();
    graph.enumerate_arcs(|edge| {
        payloads.push(edge.payload().clone());
        false
    });
    assert_eq!(payloads, vec![EdgeData::Weighted(2.5)]);
}

#[test]
fn test_keyed_store_source_data_type() {
    let graph: DataDirectedGraph<u8, String> = DataDirectedGraph::new();
    graph.add_edge(Edge::keyed(1, 2, "x".to_string())).unwrap();

    let mut found: Option<EdgeData<String>> = None;
    graph.enumerate_edges(|edge| {
        found = Some(edge.into_parts().2);
        true
    });
    assert_eq!(found, Some(EdgeData::Keyed(Some("x".to_string()))));
}

#[test]
fn test_undirected_store_source_emits_each_edge_once() {
    let graph = LabeledUndirectedGraph::new();
    graph
        .add_edges([Edge::labeled(1, 2, "a"), Edge::labeled(2, 3, "b")])
        .unwrap();

    let mut count = 0;
    graph.enumerate_edges(|_| {
        count += 1;
        false
    });
    assert_eq!(count, 2);
}
