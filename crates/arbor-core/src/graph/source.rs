//! Foreign graph sources consumed by ingestion.
//!
//! A source only has to enumerate its vertices and its edges. Payloads cross
//! the boundary as [`EdgeData`], so a source of any edge kind can feed a
//! store of any other kind.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::adjacency::{AdjacencyList, Directionality};
use super::directed::Directed;
use super::types::{Edge, EdgeData, EdgePayload, KeyedData, Vertex};

/// Anything able to enumerate vertices and edges.
pub trait GraphSource {
    /// Vertex type.
    type Vertex: Vertex;

    /// Data type of keyed edges.
    type Data: KeyedData;

    /// Number of distinct vertices.
    fn vertex_count(&self) -> usize;

    /// Calls `f` for each vertex until it returns `true`.
    fn enumerate_vertices<F>(&self, f: F)
    where
        F: FnMut(&Self::Vertex) -> bool;

    /// Calls `f` for each edge until it returns `true`.
    fn enumerate_edges<F>(&self, f: F)
    where
        F: FnMut(Edge<Self::Vertex, EdgeData<Self::Data>>) -> bool;
}

/// A source whose edges are arcs with a meaningful orientation.
pub trait ArcSource: GraphSource {
    /// Calls `f` for each arc until it returns `true`.
    fn enumerate_arcs<F>(&self, f: F)
    where
        F: FnMut(Edge<Self::Vertex, EdgeData<Self::Data>>) -> bool;
}

impl<V, P, Dir> GraphSource for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    type Vertex = V;
    type Data = P::Data;

    fn vertex_count(&self) -> usize {
        self.order()
    }

    fn enumerate_vertices<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.each_vertex(f);
    }

    fn enumerate_edges<F>(&self, mut f: F)
    where
        F: FnMut(Edge<V, EdgeData<P::Data>>) -> bool,
    {
        self.each_edge(|edge| f(edge.map_payload(EdgePayload::into_edge_data)));
    }
}

impl<V, P> ArcSource for AdjacencyList<V, P, Directed>
where
    V: Vertex,
    P: EdgePayload,
{
    fn enumerate_arcs<F>(&self, f: F)
    where
        F: FnMut(Edge<V, EdgeData<P::Data>>) -> bool,
    {
        self.enumerate_edges(f);
    }
}

/// Literal in-memory source: explicit vertices plus edges of mixed kinds.
///
/// Edge endpoints count as vertices even when not listed explicitly.
///
/// # Example
///
/// ```rust
/// use arbor_core::graph::{EdgeList, GraphSource};
///
/// let source: EdgeList<&str> = EdgeList::new()
///     .with_edge("a", "b")
///     .with_weighted_edge("b", "c", 1.5)
///     .with_vertex("isolated");
///
/// assert_eq!(source.vertex_count(), 4);
/// assert_eq!(source.edge_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeList<V, D = ()> {
    vertices: Vec<V>,
    edges: Vec<Edge<V, EdgeData<D>>>,
}

impl<V, D> Default for EdgeList<V, D> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<V: Vertex, D: KeyedData> EdgeList<V, D> {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an explicit vertex (builder pattern).
    #[must_use]
    pub fn with_vertex(mut self, vertex: V) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Adds a plain edge (builder pattern).
    #[must_use]
    pub fn with_edge(self, source: V, target: V) -> Self {
        self.with_data_edge(Edge::with_payload(source, target, EdgeData::Plain))
    }

    /// Adds a weighted edge (builder pattern).
    #[must_use]
    pub fn with_weighted_edge(self, source: V, target: V, weight: f64) -> Self {
        self.with_data_edge(Edge::with_payload(source, target, EdgeData::Weighted(weight)))
    }

    /// Adds a labeled edge (builder pattern).
    #[must_use]
    pub fn with_labeled_edge(self, source: V, target: V, label: impl Into<String>) -> Self {
        self.with_data_edge(Edge::with_payload(
            source,
            target,
            EdgeData::Labeled(label.into()),
        ))
    }

    /// Adds a keyed-data edge (builder pattern).
    #[must_use]
    pub fn with_keyed_edge(self, source: V, target: V, data: D) -> Self {
        self.with_data_edge(Edge::with_payload(
            source,
            target,
            EdgeData::Keyed(Some(data)),
        ))
    }

    /// Adds an edge with an explicit kind-tagged payload (builder pattern).
    #[must_use]
    pub fn with_data_edge(mut self, edge: Edge<V, EdgeData<D>>) -> Self {
        self.edges.push(edge);
        self
    }

    /// Appends an explicit vertex.
    pub fn push_vertex(&mut self, vertex: V) {
        self.vertices.push(vertex);
    }

    /// Appends an edge.
    pub fn push_edge(&mut self, edge: Edge<V, EdgeData<D>>) {
        self.edges.push(edge);
    }

    /// Explicitly listed vertices, duplicates included.
    #[must_use]
    pub fn listed_vertices(&self) -> &[V] {
        &self.vertices
    }

    /// All edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge<V, EdgeData<D>>] {
        &self.edges
    }

    /// Number of edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn each_distinct_vertex<F>(&self, mut f: F)
    where
        F: FnMut(&V) -> bool,
    {
        let mut seen: FxHashSet<&V> = FxHashSet::default();
        let endpoints = self
            .edges
            .iter()
            .flat_map(|edge| [edge.source(), edge.target()]);
        for vertex in self.vertices.iter().chain(endpoints) {
            if seen.insert(vertex) && f(vertex) {
                return;
            }
        }
    }
}

impl<V: Vertex, D: KeyedData> GraphSource for EdgeList<V, D> {
    type Vertex = V;
    type Data = D;

    fn vertex_count(&self) -> usize {
        let mut count = 0;
        self.each_distinct_vertex(|_| {
            count += 1;
            false
        });
        count
    }

    fn enumerate_vertices<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.each_distinct_vertex(f);
    }

    fn enumerate_edges<F>(&self, mut f: F)
    where
        F: FnMut(Edge<V, EdgeData<D>>) -> bool,
    {
        for edge in &self.edges {
            if f(edge.clone()) {
                return;
            }
        }
    }
}

impl<V: Vertex, D: KeyedData> ArcSource for EdgeList<V, D> {
    fn enumerate_arcs<F>(&self, f: F)
    where
        F: FnMut(Edge<V, EdgeData<D>>) -> bool,
    {
        self.enumerate_edges(f);
    }
}

impl<V: Vertex, D: KeyedData> FromIterator<(V, V)> for EdgeList<V, D> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let edges = iter
            .into_iter()
            .map(|(source, target)| Edge::with_payload(source, target, EdgeData::Plain))
            .collect();
        Self {
            vertices: Vec::new(),
            edges,
        }
    }
}
