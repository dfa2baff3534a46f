//! Read contracts shared by every store, used by generic algorithms.

use super::adjacency::{AdjacencyList, Directionality};
use super::directed::Directed;
use super::types::{EdgePayload, Vertex};

/// Read-only view of a graph: enough for traversal.
pub trait Graph {
    /// Vertex type.
    type Vertex: Vertex;

    /// Returns true if `vertex` is in the graph.
    fn has_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Number of vertices.
    fn order(&self) -> usize;

    /// Number of edges.
    fn size(&self) -> usize;

    /// Whether edges are ordered pairs.
    fn is_directed(&self) -> bool;

    /// Calls `f` for each vertex until it returns `true`.
    fn each_vertex<F>(&self, f: F)
    where
        F: FnMut(&Self::Vertex) -> bool;

    /// Calls `f` for each vertex adjacent to `vertex` (successors for
    /// directed graphs) until it returns `true`.
    fn each_adjacent_to<F>(&self, vertex: &Self::Vertex, f: F)
    where
        F: FnMut(&Self::Vertex) -> bool;
}

/// Directed extras.
pub trait Digraph: Graph {
    /// Arcs leaving `vertex`, `None` if unknown.
    fn out_degree(&self, vertex: &Self::Vertex) -> Option<usize>;

    /// Arcs entering `vertex`, `None` if unknown.
    fn in_degree(&self, vertex: &Self::Vertex) -> Option<usize>;

    /// Calls `f` for each predecessor of `vertex` until it returns `true`.
    fn each_predecessor_of<F>(&self, vertex: &Self::Vertex, f: F)
    where
        F: FnMut(&Self::Vertex) -> bool;
}

impl<V, P, Dir> Graph for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    type Vertex = V;

    fn has_vertex(&self, vertex: &V) -> bool {
        AdjacencyList::has_vertex(self, vertex)
    }

    fn order(&self) -> usize {
        AdjacencyList::order(self)
    }

    fn size(&self) -> usize {
        AdjacencyList::size(self)
    }

    fn is_directed(&self) -> bool {
        Dir::DIRECTED
    }

    fn each_vertex<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        AdjacencyList::each_vertex(self, f);
    }

    fn each_adjacent_to<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        AdjacencyList::each_adjacent_to(self, vertex, f);
    }
}

impl<V, P> Digraph for AdjacencyList<V, P, Directed>
where
    V: Vertex,
    P: EdgePayload,
{
    fn out_degree(&self, vertex: &V) -> Option<usize> {
        AdjacencyList::out_degree(self, vertex)
    }

    fn in_degree(&self, vertex: &V) -> Option<usize> {
        AdjacencyList::in_degree(self, vertex)
    }

    fn each_predecessor_of<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        AdjacencyList::each_predecessor_of(self, vertex, f);
    }
}
