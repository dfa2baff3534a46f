//! Undirected stores.

use super::adjacency::{AdjacencyList, Directionality};
use super::types::{EdgePayload, Vertex};

/// Orientation policy for undirected stores: `(u, v)` and `(v, u)` name the
/// same edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

impl Directionality for Undirected {
    const DIRECTED: bool = false;
    const NAME: &'static str = "undirected";
}

/// Undirected graph with plain edges.
pub type UndirectedGraph<V> = AdjacencyList<V, (), Undirected>;

/// Undirected graph with `f64`-weighted edges.
pub type WeightedUndirectedGraph<V> = AdjacencyList<V, f64, Undirected>;

/// Undirected graph with string-labeled edges.
pub type LabeledUndirectedGraph<V> = AdjacencyList<V, String, Undirected>;

/// Undirected graph whose edges carry an optional value of type `D`.
pub type DataUndirectedGraph<V, D> = AdjacencyList<V, Option<D>, Undirected>;

impl<V, P> AdjacencyList<V, P, Undirected>
where
    V: Vertex,
    P: EdgePayload,
{
    /// Number of edges touching `vertex` (a self-loop counts once), or
    /// `None` if it is unknown.
    #[must_use]
    pub fn degree(&self, vertex: &V) -> Option<usize> {
        self.inner.read().list.get(vertex).map(|adjacent| adjacent.len())
    }

    /// Calls `f` for each neighbor of `vertex` until it returns `true`.
    pub fn each_neighbor_of<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.each_adjacent_to(vertex, f);
    }
}
