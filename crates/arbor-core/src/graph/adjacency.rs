//! Generic adjacency-list store shared by every directionality and edge kind.
//!
//! A store maps each vertex to the map of its adjacent vertices and the
//! payload of the connecting edge, and keeps an edge counter next to it.
//! Undirected stores record every edge twice, once per endpoint (a self-loop
//! is recorded once), and reconcile the two records on enumeration.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::fmt;
use std::marker::PhantomData;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{DuplicateEdgePolicy, StoreConfig, MAX_INITIAL_CAPACITY};
use crate::error::Result;

use super::directed::Directed;
use super::sync::StoreLock;
use super::types::{Edge, EdgeKind, EdgePayload, Endpoints, RichPayload, Vertex};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::super::directed::Directed {}
    impl Sealed for super::super::undirected::Undirected {}
}

/// Edge orientation policy of a store: [`Directed`] or
/// [`Undirected`](super::Undirected).
pub trait Directionality: sealed::Sealed + Send + Sync + 'static {
    /// Whether `(u, v)` and `(v, u)` are distinct edges.
    const DIRECTED: bool;

    /// Human-readable name used in `Debug` output and logs.
    const NAME: &'static str;
}

/// Unlocked state of a store.
#[derive(Clone)]
pub(crate) struct Adjacency<V, P> {
    pub(crate) list: FxHashMap<V, FxHashMap<V, P>>,
    pub(crate) size: usize,
}

impl<V: Vertex, P: EdgePayload> Adjacency<V, P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            list: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            size: 0,
        }
    }

    /// Inserts `vertex` with no adjacent vertices. Returns true if it was new.
    pub(crate) fn ensure(&mut self, vertex: V) -> bool {
        self.ensure_with_capacity(vertex, 0)
    }

    pub(crate) fn ensure_with_capacity(&mut self, vertex: V, capacity: usize) -> bool {
        match self.list.entry(vertex) {
            Entry::Vacant(slot) => {
                slot.insert(FxHashMap::with_capacity_and_hasher(
                    capacity,
                    Default::default(),
                ));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Records `source -> target`. Returns true if the pair was new.
    ///
    /// With `mirror` set the reverse record is written as well, except for
    /// self-loops. An existing pair keeps its payload under
    /// [`DuplicateEdgePolicy::KeepFirst`] and takes the new one under
    /// [`DuplicateEdgePolicy::Overwrite`]; the counter only moves on first
    /// insertion.
    pub(crate) fn link(
        &mut self,
        source: V,
        target: V,
        payload: P,
        mirror: bool,
        policy: DuplicateEdgePolicy,
    ) -> bool {
        self.ensure(source.clone());
        self.ensure(target.clone());

        let mirror = mirror && source != target;
        let back_payload = mirror.then(|| payload.clone());

        let Some(adjacent) = self.list.get_mut(&source) else {
            return false;
        };
        let inserted = match adjacent.entry(target.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(payload);
                true
            }
            Entry::Occupied(mut slot) => {
                if policy == DuplicateEdgePolicy::KeepFirst {
                    return false;
                }
                slot.insert(payload);
                false
            }
        };

        if let Some(back_payload) = back_payload {
            if let Some(back) = self.list.get_mut(&target) {
                back.insert(source, back_payload);
            }
        }
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Deletes `source -> target` (and its mirror). Returns true if it existed.
    pub(crate) fn unlink(&mut self, source: &V, target: &V, mirror: bool) -> bool {
        let removed = self
            .list
            .get_mut(source)
            .and_then(|adjacent| adjacent.remove(target))
            .is_some();
        if !removed {
            return false;
        }
        if mirror && source != target {
            if let Some(back) = self.list.get_mut(target) {
                back.remove(source);
            }
        }
        self.size -= 1;
        true
    }

    /// Removes `vertex` and every edge touching it.
    ///
    /// Returns the number of edges removed, or `None` for an unknown vertex.
    /// Directed stores have no reverse index, so incoming arcs are found by
    /// scanning every adjacency map.
    pub(crate) fn detach(&mut self, vertex: &V, directed: bool) -> Option<usize> {
        let adjacent = self.list.remove(vertex)?;
        let mut removed = adjacent.len();

        if directed {
            for other in self.list.values_mut() {
                if other.remove(vertex).is_some() {
                    removed += 1;
                }
            }
        } else {
            for neighbor in adjacent.keys() {
                if let Some(back) = self.list.get_mut(neighbor) {
                    back.remove(vertex);
                }
            }
        }

        self.size -= removed;
        Some(removed)
    }

    pub(crate) fn has_edge(&self, source: &V, target: &V) -> bool {
        self.list
            .get(source)
            .is_some_and(|adjacent| adjacent.contains_key(target))
    }

    pub(crate) fn payload(&self, source: &V, target: &V) -> Option<&P> {
        self.list.get(source)?.get(target)
    }

    /// Number of records pointing at `vertex`. Full scan.
    pub(crate) fn in_degree(&self, vertex: &V) -> Option<usize> {
        if !self.list.contains_key(vertex) {
            return None;
        }
        Some(
            self.list
                .values()
                .filter(|adjacent| adjacent.contains_key(vertex))
                .count(),
        )
    }

    /// Walks every edge once. Returns true if `f` asked to stop.
    pub(crate) fn walk_edges<F>(&self, directed: bool, mut f: F) -> bool
    where
        F: FnMut(&V, &V, &P) -> bool,
    {
        if directed {
            for (source, adjacent) in &self.list {
                for (target, payload) in adjacent {
                    if f(source, target, payload) {
                        return true;
                    }
                }
            }
            return false;
        }

        // An undirected edge is reported from whichever endpoint is reached
        // first; `done` holds the endpoints already drained.
        let mut done: FxHashSet<&V> = FxHashSet::default();
        for (source, adjacent) in &self.list {
            for (target, payload) in adjacent {
                if done.contains(target) {
                    continue;
                }
                if f(source, target, payload) {
                    return true;
                }
            }
            done.insert(source);
        }
        false
    }

    /// Walks every edge touching `vertex` once, outgoing records first.
    pub(crate) fn walk_incident<F>(&self, vertex: &V, directed: bool, mut f: F) -> bool
    where
        F: FnMut(&V, &V, &P) -> bool,
    {
        let Some((key, adjacent)) = self.list.get_key_value(vertex) else {
            return false;
        };
        for (target, payload) in adjacent {
            if f(key, target, payload) {
                return true;
            }
        }
        if directed {
            return self.walk_incoming(vertex, f);
        }
        false
    }

    /// Walks the arcs ending at `vertex`, self-loop excluded.
    pub(crate) fn walk_incoming<F>(&self, vertex: &V, mut f: F) -> bool
    where
        F: FnMut(&V, &V, &P) -> bool,
    {
        for (source, adjacent) in &self.list {
            if source == vertex {
                continue;
            }
            if let Some((target, payload)) = adjacent.get_key_value(vertex) {
                if f(source, target, payload) {
                    return true;
                }
            }
        }
        false
    }
}

/// Adjacency-list graph store.
///
/// `P` is the edge payload (`()`, `f64`, `String` or `Option<D>`) and `Dir`
/// the orientation policy. Use the aliases such as
/// [`DirectedGraph`](super::DirectedGraph) or
/// [`WeightedUndirectedGraph`](super::WeightedUndirectedGraph) rather than
/// spelling the parameters out.
///
/// All methods take `&self`: the store guards its state with an internal
/// reader/writer lock, so a store can be shared between threads as is (or
/// behind an `Arc`). Enumerations hold the read lock for their whole run and
/// stop as soon as the callback returns `true`.
///
/// # Example
///
/// ```rust
/// use arbor_core::graph::{DirectedGraph, Edge};
///
/// let graph = DirectedGraph::new();
/// graph.add_edges([Edge::new("a", "b"), Edge::new("b", "c")])?;
///
/// assert_eq!(graph.order(), 3);
/// assert_eq!(graph.size(), 2);
/// assert!(graph.has_edge(&"a", &"b"));
/// assert!(!graph.has_edge(&"b", &"a"));
/// # Ok::<(), arbor_core::Error>(())
/// ```
pub struct AdjacencyList<V, P = (), Dir = Directed> {
    pub(crate) inner: StoreLock<Adjacency<V, P>>,
    config: StoreConfig,
    _dir: PhantomData<fn() -> Dir>,
}

// Compile-time Send + Sync assertion for the store family.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AdjacencyList<u64>>();
    assert_send_sync::<AdjacencyList<String, Option<String>, super::undirected::Undirected>>();
};

impl<V, P, Dir> AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    /// Creates an empty store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given settings.
    ///
    /// An `initial_capacity` above [`MAX_INITIAL_CAPACITY`] is ignored and
    /// the store starts without pre-allocation.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let capacity = if config.initial_capacity > MAX_INITIAL_CAPACITY {
            tracing::warn!(
                requested = config.initial_capacity,
                max = MAX_INITIAL_CAPACITY,
                "initial capacity out of range, not pre-allocating"
            );
            0
        } else {
            config.initial_capacity
        };
        Self::from_adjacency(Adjacency::with_capacity(capacity), config)
    }

    pub(crate) fn from_adjacency(adjacency: Adjacency<V, P>, config: StoreConfig) -> Self {
        Self {
            inner: StoreLock::new(adjacency),
            config,
            _dir: PhantomData,
        }
    }

    /// Settings this store was created with.
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Process-unique id of this store, as reported by
    /// [`Error::ReentrantMutation`](crate::Error::ReentrantMutation).
    #[must_use]
    pub fn store_id(&self) -> u64 {
        self.inner.id()
    }

    /// Whether `(u, v)` and `(v, u)` are distinct edges in this store.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        Dir::DIRECTED
    }

    /// Kind of the edges this store holds.
    #[must_use]
    pub fn edge_kind(&self) -> EdgeKind {
        P::KIND
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Returns true if `vertex` is in the store.
    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.inner.read().list.contains_key(vertex)
    }

    /// Number of vertices.
    #[must_use]
    pub fn order(&self) -> usize {
        self.inner.read().list.len()
    }

    /// Number of edges. An undirected edge counts once.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().size
    }

    /// Returns true if the store has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().list.is_empty()
    }

    /// Edge density: `E / (V (V - 1))` directed, `2E / (V (V - 1))`
    /// undirected. NaN for fewer than two vertices.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Reason: counts far below 2^52
    pub fn density(&self) -> f64 {
        let (order, size) = {
            let adjacency = self.inner.read();
            (adjacency.list.len(), adjacency.size)
        };
        if order < 2 {
            return f64::NAN;
        }
        let factor = if Dir::DIRECTED { 1.0 } else { 2.0 };
        factor * size as f64 / (order as f64 * (order - 1) as f64)
    }

    /// Returns true if an edge joins `source` to `target`, whatever its
    /// payload. Undirected stores ignore the argument order.
    #[must_use]
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        self.inner.read().has_edge(source, target)
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Adds each vertex not already present.
    ///
    /// Returns the number of vertices actually added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReentrantMutation`](crate::Error::ReentrantMutation)
    /// when called from inside an enumeration of this store.
    pub fn add_vertices<I>(&self, vertices: I) -> Result<usize>
    where
        I: IntoIterator<Item = V>,
    {
        let mut vertices = vertices.into_iter().peekable();
        if vertices.peek().is_none() {
            return Ok(0);
        }

        let mut adjacency = self.inner.write()?;
        let mut added = 0;
        for vertex in vertices {
            if adjacency.ensure(vertex) {
                added += 1;
            }
        }
        tracing::trace!(store = self.inner.id(), added, "vertices added");
        Ok(added)
    }

    /// Adds a single vertex. Returns true if it was new.
    pub fn add_vertex(&self, vertex: V) -> Result<bool> {
        Ok(self.add_vertices(std::iter::once(vertex))? == 1)
    }

    /// Removes each listed vertex together with every edge touching it.
    ///
    /// Unknown vertices are skipped. Returns the number of vertices removed.
    pub fn remove_vertices<I>(&self, vertices: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<V>,
    {
        let mut vertices = vertices.into_iter().peekable();
        if vertices.peek().is_none() {
            return Ok(0);
        }

        let mut adjacency = self.inner.write()?;
        let mut removed = 0;
        let mut dropped_edges = 0;
        for vertex in vertices {
            if let Some(edges) = adjacency.detach(vertex.borrow(), Dir::DIRECTED) {
                removed += 1;
                dropped_edges += edges;
            }
        }
        tracing::trace!(
            store = self.inner.id(),
            removed,
            dropped_edges,
            "vertices removed"
        );
        Ok(removed)
    }

    /// Adds each edge, creating missing endpoints.
    ///
    /// A pair already present is not counted again. Its payload is kept or
    /// replaced according to [`StoreConfig::duplicate_edges`]. Returns the
    /// number of new edges.
    pub fn add_edges<I>(&self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = Edge<V, P>>,
    {
        let mut edges = edges.into_iter().peekable();
        if edges.peek().is_none() {
            return Ok(0);
        }

        let policy = self.config.duplicate_edges;
        let mut adjacency = self.inner.write()?;
        let mut added = 0;
        for edge in edges {
            let (source, target, payload) = edge.into_parts();
            if adjacency.link(source, target, payload, !Dir::DIRECTED, policy) {
                added += 1;
            }
        }
        tracing::trace!(store = self.inner.id(), added, "edges added");
        Ok(added)
    }

    /// Adds a single edge. Returns true if the pair was new.
    pub fn add_edge(&self, edge: Edge<V, P>) -> Result<bool> {
        Ok(self.add_edges(std::iter::once(edge))? == 1)
    }

    /// Removes each listed `(source, target)` pair, ignoring payloads.
    ///
    /// Absent pairs are skipped. Returns the number of edges removed.
    pub fn remove_edges<I, E>(&self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = E>,
        E: Endpoints<V>,
    {
        let mut edges = edges.into_iter().peekable();
        if edges.peek().is_none() {
            return Ok(0);
        }

        let mut adjacency = self.inner.write()?;
        let mut removed = 0;
        for edge in edges {
            if adjacency.unlink(edge.source_vertex(), edge.target_vertex(), !Dir::DIRECTED) {
                removed += 1;
            }
        }
        tracing::trace!(store = self.inner.id(), removed, "edges removed");
        Ok(removed)
    }

    /// Removes every vertex and edge. Settings are kept.
    pub fn clear(&self) -> Result<()> {
        let mut adjacency = self.inner.write()?;
        adjacency.list.clear();
        adjacency.size = 0;
        tracing::trace!(store = self.inner.id(), "store cleared");
        Ok(())
    }

    // ── Enumeration ────────────────────────────────────────────────────

    /// Calls `f` for each vertex until it returns `true`.
    pub fn each_vertex<F>(&self, mut f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            for vertex in adjacency.list.keys() {
                if f(vertex) {
                    break;
                }
            }
        });
    }

    /// Calls `f` for each edge until it returns `true`.
    ///
    /// Undirected edges are reported once, from either endpoint.
    pub fn each_edge<F>(&self, mut f: F)
    where
        F: FnMut(Edge<V, P>) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            adjacency.walk_edges(Dir::DIRECTED, |source, target, payload| {
                f(Edge::with_payload(
                    source.clone(),
                    target.clone(),
                    payload.clone(),
                ))
            });
        });
    }

    /// Calls `f` for each vertex adjacent to `vertex` until it returns `true`.
    ///
    /// Directed stores report successors only. Nothing is reported for an
    /// unknown vertex.
    pub fn each_adjacent_to<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            if let Some(adjacent) = adjacency.list.get(vertex) {
                for other in adjacent.keys() {
                    if f(other) {
                        break;
                    }
                }
            }
        });
    }

    /// Calls `f` for each edge touching `vertex` until it returns `true`.
    ///
    /// Directed stores report outgoing arcs, then incoming ones; a self-loop
    /// is reported once.
    pub fn each_edge_incident_to<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(Edge<V, P>) -> bool,
    {
        self.inner.enumerate(|adjacency| {
            adjacency.walk_incident(vertex, Dir::DIRECTED, |source, target, payload| {
                f(Edge::with_payload(
                    source.clone(),
                    target.clone(),
                    payload.clone(),
                ))
            });
        });
    }

    /// Snapshot of all vertices, in unspecified order.
    #[must_use]
    pub fn vertices(&self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.order());
        self.each_vertex(|vertex| {
            out.push(vertex.clone());
            false
        });
        out
    }

    /// Snapshot of all edges, in unspecified order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<V, P>> {
        let mut out = Vec::with_capacity(self.size());
        self.each_edge(|edge| {
            out.push(edge);
            false
        });
        out
    }
}

impl<V, P, Dir> AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: RichPayload,
    Dir: Directionality,
{
    /// Returns true if the store holds this exact edge, payload included.
    #[must_use]
    pub fn has_payload_edge(&self, edge: &Edge<V, P>) -> bool {
        self.inner
            .read()
            .payload(edge.source(), edge.target())
            .is_some_and(|stored| stored == edge.payload())
    }

    /// Stored payload of the edge joining `source` to `target`.
    #[must_use]
    pub fn edge_payload(&self, source: &V, target: &V) -> Option<P> {
        self.inner.read().payload(source, target).cloned()
    }
}

impl<V, P, Dir> Default for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, Dir> Clone for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    /// Deep copy under the read lock. The copy gets its own lock and id.
    fn clone(&self) -> Self {
        let adjacency = self.inner.read().clone();
        Self::from_adjacency(adjacency, self.config)
    }
}

impl<V, P, Dir> fmt::Debug for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (order, size) = {
            let adjacency = self.inner.read();
            (adjacency.list.len(), adjacency.size)
        };
        f.debug_struct("AdjacencyList")
            .field("directionality", &Dir::NAME)
            .field("kind", &P::KIND)
            .field("order", &order)
            .field("size", &size)
            .finish_non_exhaustive()
    }
}

impl<V, P, Dir> FromIterator<Edge<V, P>> for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    fn from_iter<I: IntoIterator<Item = Edge<V, P>>>(iter: I) -> Self {
        let mut adjacency = Adjacency::<V, P>::with_capacity(0);
        let policy = StoreConfig::default().duplicate_edges;
        for edge in iter {
            let (source, target, payload) = edge.into_parts();
            adjacency.link(source, target, payload, !Dir::DIRECTED, policy);
        }
        Self::from_adjacency(adjacency, StoreConfig::default())
    }
}
