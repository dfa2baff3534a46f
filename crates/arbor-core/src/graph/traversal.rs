//! Depth-first traversal with visitor callbacks.
//!
//! Vertices move white (unseen) → gray (on the active path) → black
//! (finished). Reaching a gray vertex again is a back edge.
//!
//! The walk keeps an explicit frame stack, so deep graphs cannot overflow the
//! call stack, yet callbacks fire in the same order as the recursive
//! formulation: `on_start_vertex`, then for each adjacent vertex
//! `on_examine_edge` followed by the visit of that vertex, then
//! `on_finish_vertex`.
//!
//! # Example
//!
//! ```rust
//! use arbor_core::graph::{depth_first_from, DirectedGraph, Edge, FinishOrder};
//!
//! let graph = DirectedGraph::new();
//! graph.add_edges([Edge::new("foo", "bar"), Edge::new("bar", "baz")])?;
//!
//! let mut order = FinishOrder::new();
//! depth_first_from(&graph, &mut order, ["foo"])?;
//! assert_eq!(order.as_slice(), &["baz", "bar", "foo"]);
//! # Ok::<(), arbor_core::Error>(())
//! ```

use std::borrow::Borrow;
use std::vec;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{Error, Result};

use super::traits::Graph;
use super::types::{Edge, Vertex};

/// Callbacks fired during a depth-first walk. All default to no-ops.
pub trait DfsVisitor<V> {
    /// Called once per vertex of the graph before the walk starts.
    fn on_initialize_vertex(&mut self, _vertex: &V) {}

    /// Called when `vertex` turns gray.
    fn on_start_vertex(&mut self, _vertex: &V) {}

    /// Called for each edge leaving a gray vertex, before its target is
    /// visited.
    fn on_examine_edge(&mut self, _edge: &Edge<V>) {}

    /// Called when the walk reaches `vertex` while it is still gray.
    fn on_back_edge(&mut self, _vertex: &V) {}

    /// Called when every vertex reachable from `vertex` is finished.
    fn on_finish_vertex(&mut self, _vertex: &V) {}
}

impl<V, T: DfsVisitor<V> + ?Sized> DfsVisitor<V> for &mut T {
    fn on_initialize_vertex(&mut self, vertex: &V) {
        (**self).on_initialize_vertex(vertex);
    }

    fn on_start_vertex(&mut self, vertex: &V) {
        (**self).on_start_vertex(vertex);
    }

    fn on_examine_edge(&mut self, edge: &Edge<V>) {
        (**self).on_examine_edge(edge);
    }

    fn on_back_edge(&mut self, vertex: &V) {
        (**self).on_back_edge(vertex);
    }

    fn on_finish_vertex(&mut self, vertex: &V) {
        (**self).on_finish_vertex(vertex);
    }
}

/// Records vertices in the order they finish.
///
/// For a DAG this is a reverse topological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOrder<V> {
    finished: Vec<V>,
}

impl<V> Default for FinishOrder<V> {
    fn default() -> Self {
        Self {
            finished: Vec::new(),
        }
    }
}

impl<V> FinishOrder<V> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished vertices, first finished first.
    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.finished
    }

    /// Consumes the recorder.
    #[must_use]
    pub fn into_vec(self) -> Vec<V> {
        self.finished
    }

    /// Number of finished vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.finished.len()
    }

    /// Returns true if nothing finished yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.finished.is_empty()
    }
}

impl<V: Clone> DfsVisitor<V> for FinishOrder<V> {
    fn on_finish_vertex(&mut self, vertex: &V) {
        self.finished.push(vertex.clone());
    }
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Vertices turned gray.
    pub vertices_started: usize,
    /// Edges examined.
    pub edges_examined: usize,
    /// Back edges reported.
    pub back_edges: usize,
    /// Requested starts that are not in the graph.
    pub missing_starts: usize,
}

/// Walks `graph` depth-first from each vertex of `starts` in turn.
///
/// A vertex finished from an earlier start is not visited again. Starts that
/// are not in the graph are skipped.
///
/// # Errors
///
/// Returns [`Error::EmptyStartSet`] when `starts` is empty.
pub fn depth_first_from<G, Vis, I>(graph: &G, visitor: &mut Vis, starts: I) -> Result<WalkStats>
where
    G: Graph,
    Vis: DfsVisitor<G::Vertex> + ?Sized,
    I: IntoIterator,
    I::Item: Borrow<G::Vertex>,
{
    let starts: Vec<G::Vertex> = starts
        .into_iter()
        .map(|start| start.borrow().clone())
        .collect();
    if starts.is_empty() {
        return Err(Error::EmptyStartSet);
    }
    Ok(walk(graph, visitor, &vertices_of(graph), &starts))
}

/// Walks every vertex of `graph`. An empty graph is a no-op.
pub fn depth_first<G, Vis>(graph: &G, visitor: &mut Vis) -> WalkStats
where
    G: Graph,
    Vis: DfsVisitor<G::Vertex> + ?Sized,
{
    let vertices = vertices_of(graph);
    walk(graph, visitor, &vertices, &vertices)
}

/// Orders the vertices reachable from `starts` so that every arc points
/// forward.
///
/// Undirected graphs report each edge back to the parent as a back edge, so
/// any undirected graph with an edge is rejected.
///
/// # Errors
///
/// - [`Error::EmptyStartSet`] when `starts` is empty.
/// - [`Error::CycleDetected`] naming the first vertex reached by a back edge.
pub fn topological_sort<G, I>(graph: &G, starts: I) -> Result<Vec<G::Vertex>>
where
    G: Graph,
    I: IntoIterator,
    I::Item: Borrow<G::Vertex>,
{
    let mut visitor = TopologicalVisitor {
        order: FinishOrder::new(),
        cycle: None,
    };
    depth_first_from(graph, &mut visitor, starts)?;

    if let Some(vertex) = visitor.cycle {
        return Err(Error::CycleDetected(format!("{vertex:?}")));
    }
    let mut sorted = visitor.order.into_vec();
    sorted.reverse();
    Ok(sorted)
}

struct TopologicalVisitor<V> {
    order: FinishOrder<V>,
    cycle: Option<V>,
}

impl<V: Clone> DfsVisitor<V> for TopologicalVisitor<V> {
    fn on_back_edge(&mut self, vertex: &V) {
        if self.cycle.is_none() {
            self.cycle = Some(vertex.clone());
        }
    }

    fn on_finish_vertex(&mut self, vertex: &V) {
        self.order.on_finish_vertex(vertex);
    }
}

fn vertices_of<G: Graph>(graph: &G) -> Vec<G::Vertex> {
    let mut vertices = Vec::with_capacity(graph.order());
    graph.each_vertex(|vertex| {
        vertices.push(vertex.clone());
        false
    });
    vertices
}

struct Frame<V> {
    vertex: V,
    adjacent: vec::IntoIter<V>,
}

struct Walk<'g, G: Graph> {
    graph: &'g G,
    gray: FxHashSet<G::Vertex>,
    black: FxHashSet<G::Vertex>,
    stats: WalkStats,
}

impl<G: Graph> Walk<'_, G> {
    /// Visits `vertex`: a frame for a white vertex, nothing otherwise.
    fn enter<Vis>(&mut self, visitor: &mut Vis, vertex: G::Vertex) -> Option<Frame<G::Vertex>>
    where
        Vis: DfsVisitor<G::Vertex> + ?Sized,
    {
        if self.black.contains(&vertex) {
            return None;
        }
        if self.gray.contains(&vertex) {
            self.stats.back_edges += 1;
            visitor.on_back_edge(&vertex);
            return None;
        }

        self.gray.insert(vertex.clone());
        self.stats.vertices_started += 1;
        visitor.on_start_vertex(&vertex);

        // Adjacency is copied out so callbacks never run under the store lock.
        let mut adjacent = Vec::new();
        self.graph.each_adjacent_to(&vertex, |other| {
            adjacent.push(other.clone());
            false
        });
        Some(Frame {
            vertex,
            adjacent: adjacent.into_iter(),
        })
    }

    fn finish<Vis>(&mut self, visitor: &mut Vis, vertex: G::Vertex)
    where
        Vis: DfsVisitor<G::Vertex> + ?Sized,
    {
        visitor.on_finish_vertex(&vertex);
        self.gray.remove(&vertex);
        self.black.insert(vertex);
    }

    fn visit<Vis>(&mut self, visitor: &mut Vis, start: G::Vertex)
    where
        Vis: DfsVisitor<G::Vertex> + ?Sized,
    {
        let mut stack: Vec<Frame<G::Vertex>> = Vec::new();
        if let Some(frame) = self.enter(visitor, start) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            match frame.adjacent.next() {
                Some(next) => {
                    self.stats.edges_examined += 1;
                    visitor.on_examine_edge(&Edge::new(frame.vertex.clone(), next.clone()));
                    if let Some(child) = self.enter(visitor, next) {
                        stack.push(child);
                    }
                }
                None => {
                    if let Some(done) = stack.pop() {
                        self.finish(visitor, done.vertex);
                    }
                }
            }
        }
    }
}

fn walk<G, Vis>(
    graph: &G,
    visitor: &mut Vis,
    vertices: &[G::Vertex],
    starts: &[G::Vertex],
) -> WalkStats
where
    G: Graph,
    Vis: DfsVisitor<G::Vertex> + ?Sized,
{
    for vertex in vertices {
        visitor.on_initialize_vertex(vertex);
    }

    let mut walk = Walk {
        graph,
        gray: FxHashSet::default(),
        black: FxHashSet::default(),
        stats: WalkStats::default(),
    };
    for start in starts {
        if walk.black.contains(start) {
            continue;
        }
        if !graph.has_vertex(start) {
            walk.stats.missing_starts += 1;
            tracing::debug!(start = ?start, "skipping start vertex absent from the graph");
            continue;
        }
        walk.visit(visitor, start.clone());
    }

    tracing::debug!(
        vertices_started = walk.stats.vertices_started,
        edges_examined = walk.stats.edges_examined,
        back_edges = walk.stats.back_edges,
        "depth-first traversal complete"
    );
    walk.stats
}
