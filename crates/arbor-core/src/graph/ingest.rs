//! Copies a [`GraphSource`] into a store, widening payloads on the way.
//!
//! The target's edge capability is probed richest first (keyed, labeled,
//! weighted, plain) and every source edge is conformed to it:
//!
//! - an edge already of that kind is forwarded unchanged;
//! - a plain target drops any payload;
//! - any other mismatch gets the default payload of the target kind
//!   (`0.0`, `""`, `None`);
//! - keyed data reaches a keyed target only when both use the same data
//!   type, otherwise it arrives absent.
//!
//! Isolated source vertices are copied afterwards if the vertex counts still
//! differ. The copy is not atomic: each edge and vertex goes through the
//! target's own write lock.

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Error, Result};

use super::adjacency::{AdjacencyList, Directionality};
use super::source::{ArcSource, GraphSource};
use super::types::{Edge, EdgeData, EdgeKind, EdgePayload, KeyedData, Vertex};

/// A store able to receive edges.
pub trait IngestTarget<V> {
    /// Data type of the keyed edges the target stores.
    type Data: KeyedData;

    /// Whether edges of `kind` can be inserted without widening.
    fn accepts(&self, kind: EdgeKind) -> bool;

    /// Richest accepted kind, or `None` if no kind is accepted.
    fn edge_capability(&self) -> Option<EdgeKind> {
        EdgeKind::BY_RICHNESS
            .into_iter()
            .find(|&kind| self.accepts(kind))
    }

    /// Inserts one edge, already conformed to [`edge_capability`](Self::edge_capability).
    fn ingest_edge(&self, edge: Edge<V, EdgeData<Self::Data>>) -> Result<()>;

    /// Ensures `vertex` exists. Returns true if it was added.
    fn ingest_vertex(&self, vertex: V) -> Result<bool>;

    /// Current number of vertices.
    fn target_order(&self) -> usize;
}

impl<V, P, Dir> IngestTarget<V> for AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    type Data = P::Data;

    fn accepts(&self, kind: EdgeKind) -> bool {
        kind == P::KIND
    }

    fn ingest_edge(&self, edge: Edge<V, EdgeData<P::Data>>) -> Result<()> {
        self.add_edge(edge.map_payload(P::from_edge_data))?;
        Ok(())
    }

    fn ingest_vertex(&self, vertex: V) -> Result<bool> {
        self.add_vertex(vertex)
    }

    fn target_order(&self) -> usize {
        self.order()
    }
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Edge kind the target was fed.
    pub capability: EdgeKind,
    /// Edges handed to the target, duplicates included.
    pub forwarded: usize,
    /// Forwarded edges that received a default payload.
    pub widened: usize,
    /// Vertices added in the final isolated-vertex pass.
    pub isolated_vertices: usize,
}

impl IngestReport {
    fn new(capability: EdgeKind) -> Self {
        Self {
            capability,
            forwarded: 0,
            widened: 0,
            isolated_vertices: 0,
        }
    }
}

/// Copies every edge of `source`, then any missing vertex, into `target`.
///
/// The isolated-vertex pass runs only when the target's vertex count differs
/// from the source's after the edges are copied. A non-empty target whose own
/// extra vertices happen to make the counts equal skips it, and source
/// vertices without edges are then not copied.
///
/// # Errors
///
/// - [`Error::NoEdgeCapability`] if `target` accepts no edge kind.
/// - The first error returned by the target, after which the copy stops.
///   Ingesting a store into itself fails this way with
///   [`Error::ReentrantMutation`].
///
/// # Example
///
/// ```rust
/// use arbor_core::graph::{ingest, EdgeList, WeightedDirectedGraph};
///
/// let source: EdgeList<u32> = EdgeList::new().with_edge(1, 2).with_vertex(3);
/// let target = WeightedDirectedGraph::new();
///
/// let report = ingest(&source, &target)?;
/// assert_eq!(report.widened, 1);
/// assert_eq!(target.edge_payload(&1, &2), Some(0.0));
/// assert!(target.has_vertex(&3));
/// # Ok::<(), arbor_core::Error>(())
/// ```
pub fn ingest<S, T>(source: &S, target: &T) -> Result<IngestReport>
where
    S: GraphSource,
    T: IngestTarget<S::Vertex>,
{
    run(source, target, |step| source.enumerate_edges(step))
}

/// Same as [`ingest`], driven by the source's arc enumeration.
pub fn ingest_arcs<S, T>(source: &S, target: &T) -> Result<IngestReport>
where
    S: ArcSource,
    T: IngestTarget<S::Vertex>,
{
    run(source, target, |step| source.enumerate_arcs(step))
}

type DataEdge<S> = Edge<<S as GraphSource>::Vertex, EdgeData<<S as GraphSource>::Data>>;

fn run<S, T>(
    source: &S,
    target: &T,
    drive: impl FnOnce(&mut dyn FnMut(DataEdge<S>) -> bool),
) -> Result<IngestReport>
where
    S: GraphSource,
    T: IngestTarget<S::Vertex>,
{
    let capability = target
        .edge_capability()
        .ok_or(Error::NoEdgeCapability {
            target: std::any::type_name::<T>(),
        })?;

    let mut report = IngestReport::new(capability);
    let mut failure = None;

    drive(&mut |edge| {
        let (from, to, data) = edge.into_parts();
        let (data, widened) = data.conform::<T::Data>(capability);
        match target.ingest_edge(Edge::with_payload(from, to, data)) {
            Ok(()) => {
                report.forwarded += 1;
                if widened {
                    report.widened += 1;
                }
                false
            }
            Err(e) => {
                failure = Some(e);
                true
            }
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    if target.target_order() != source.vertex_count() {
        source.enumerate_vertices(|vertex| match target.ingest_vertex(vertex.clone()) {
            Ok(added) => {
                if added {
                    report.isolated_vertices += 1;
                }
                false
            }
            Err(e) => {
                failure = Some(e);
                true
            }
        });
        if let Some(e) = failure {
            return Err(e);
        }
    }

    tracing::debug!(
        capability = %report.capability,
        forwarded = report.forwarded,
        widened = report.widened,
        isolated_vertices = report.isolated_vertices,
        "ingestion complete"
    );
    Ok(report)
}

impl<V, P, Dir> AdjacencyList<V, P, Dir>
where
    V: Vertex,
    P: EdgePayload,
    Dir: Directionality,
{
    /// Builds a new store with default settings holding a copy of `source`.
    pub fn from_source<S>(source: &S) -> Result<Self>
    where
        S: GraphSource<Vertex = V>,
    {
        Self::from_source_with_config(source, StoreConfig::default())
    }

    /// Builds a new store with the given settings holding a copy of `source`.
    ///
    /// The duplicate edge policy applies while copying, so with
    /// [`DuplicateEdgePolicy::Overwrite`](crate::config::DuplicateEdgePolicy::Overwrite)
    /// the last payload the source reports for a pair wins.
    pub fn from_source_with_config<S>(source: &S, config: StoreConfig) -> Result<Self>
    where
        S: GraphSource<Vertex = V>,
    {
        let store = Self::with_config(config);
        ingest(source, &store)?;
        Ok(store)
    }

    /// Copies this store into `target`. See [`ingest`].
    pub fn copy_into<T>(&self, target: &T) -> Result<IngestReport>
    where
        T: IngestTarget<V>,
    {
        ingest(self, target)
    }
}
