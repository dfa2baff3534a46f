//! Directed stores.

use super::adjacency::{Adjacency, AdjacencyList, Directionality};
use super::types::{Edge, EdgePayload, Vertex};

/// Orientation policy for directed stores: `(u, v)` and `(v, u)` are
/// distinct arcs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Directed;

impl Directionality for Directed {
    const DIRECTED: bool = true;
    const NAME: &'static str = "directed";
}

/// Directed graph with plain arcs.
pub type DirectedGraph<V> = AdjacencyList<V, (), Directed>;

/// Directed graph with `f64`-weighted arcs.
pub type WeightedDirectedGraph<V> = AdjacencyList<V, f64, Directed>;

/// Directed graph with string-labeled arcs.
pub type LabeledDirectedGraph<V> = AdjacencyList<V, String, Directed>;

/// Directed graph whose arcs carry an optional value of type `D`.
pub type DataDirectedGraph<V, D> = AdjacencyList<V, Option<D>, Directed>;

impl<V, P> AdjacencyList<V, P, Directed>
where
    V: Vertex,
    P: EdgePayload,
{
    /// Number of arcs leaving `vertex`, or `None` if it is unknown.
    #[must_use]
    pub fn out_degree(&self, vertex: &V) -> Option<usize> {
        self.inner.read().list.get(vertex).map(|adjacent| adjacent.len())
    }

    /// Number of arcs entering `vertex`, or `None` if it is unknown.
    ///
    /// There is no reverse index; this scans every adjacency map.
    #[must_use]
    pub fn in_degree(&self, vertex: &V) -> Option<usize> {
        self.inner.read().in_degree(vertex)
    }

    /// Returns a new store with every arc reversed. Isolated vertices are
    /// kept; the settings are copied.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let adjacency = self.inner.read();
        let order = adjacency.list.len();
        let hint = if order == 0 { 0 } else { adjacency.size / order };

        let mut reversed = Adjacency::<V, P>::with_capacity(order);
        for vertex in adjacency.list.keys() {
            reversed.ensure_with_capacity(vertex.clone(), hint);
        }
        for (source, adjacent) in &adjacency.list {
            for (target, payload) in adjacent {
                if let Some(slot) = reversed.list.get_mut(target) {
                    slot.insert(source.clone(), payload.clone());
                }
            }
        }
        reversed.size = adjacency.size;
        drop(adjacency);

        tracing::trace!(store = self.store_id(), order, "store transposed");
        Self::from_adjacency(reversed, self.config())
    }

    /// Same as [`each_edge`](Self::each_edge).
    pub fn each_arc<F>(&self, f: F)
    where
        F: FnMut(Edge<V, P>) -> bool,
    {
        self.each_edge(f);
    }

    /// Calls `f` for each arc leaving `vertex` until it returns `true`.
    pub fn each_arc_from<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(Edge<V, P>) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            if let Some((source, adjacent)) = adjacency.list.get_key_value(vertex) {
                for (target, payload) in adjacent {
                    let arc = Edge::with_payload(source.clone(), target.clone(), payload.clone());
                    if f(arc) {
                        break;
                    }
                }
            }
        });
    }

    /// Calls `f` for each arc entering `vertex` until it returns `true`.
    ///
    /// Scans every adjacency map.
    pub fn each_arc_to<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(Edge<V, P>) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            let Some(own) = adjacency.list.get(vertex) else {
                return;
            };
            if let Some((target, payload)) = own.get_key_value(vertex) {
                if f(Edge::with_payload(vertex.clone(), target.clone(), payload.clone())) {
                    return;
                }
            }
            adjacency.walk_incoming(vertex, |source, target, payload| {
                f(Edge::with_payload(
                    source.clone(),
                    target.clone(),
                    payload.clone(),
                ))
            });
        });
    }

    /// Calls `f` for each successor of `vertex` until it returns `true`.
    pub fn each_successor_of<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.each_adjacent_to(vertex, f);
    }

    /// Calls `f` for each predecessor of `vertex` until it returns `true`.
    pub fn each_predecessor_of<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            for (source, adjacent) in &adjacency.list {
                if adjacent.contains_key(vertex) && f(source) {
                    break;
                }
            }
        });
    }
}
