//! Closed sum type over the eight concrete stores.
//!
//! Callers that pick the store shape at runtime (from configuration, from a
//! file header) hold a [`GraphVariant`] and match on it, or use the
//! dispatching methods below. Payloads cross this boundary as [`EdgeData`].

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::Result;

use super::adjacency::AdjacencyList;
use super::directed::{
    DataDirectedGraph, DirectedGraph, LabeledDirectedGraph, WeightedDirectedGraph,
};
use super::ingest::IngestTarget;
use super::source::GraphSource;
use super::traits::Graph;
use super::types::{Edge, EdgeData, EdgeKind, Endpoints, KeyedData, PayloadData, Vertex};
use super::undirected::{
    DataUndirectedGraph, LabeledUndirectedGraph, UndirectedGraph, WeightedUndirectedGraph,
};

/// Edge orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Ordered pairs.
    Directed,
    /// Unordered pairs.
    Undirected,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Directed => f.write_str("directed"),
            Orientation::Undirected => f.write_str("undirected"),
        }
    }
}

/// Shape of a store: orientation and edge kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantTag {
    /// Edge orientation.
    pub orientation: Orientation,
    /// Edge payload kind.
    pub kind: EdgeKind,
}

impl VariantTag {
    /// Every shape, directed first, poorest kind first.
    pub const ALL: [VariantTag; 8] = [
        VariantTag::new(Orientation::Directed, EdgeKind::Plain),
        VariantTag::new(Orientation::Directed, EdgeKind::Weighted),
        VariantTag::new(Orientation::Directed, EdgeKind::Labeled),
        VariantTag::new(Orientation::Directed, EdgeKind::Keyed),
        VariantTag::new(Orientation::Undirected, EdgeKind::Plain),
        VariantTag::new(Orientation::Undirected, EdgeKind::Weighted),
        VariantTag::new(Orientation::Undirected, EdgeKind::Labeled),
        VariantTag::new(Orientation::Undirected, EdgeKind::Keyed),
    ];

    /// Creates a tag.
    #[must_use]
    pub const fn new(orientation: Orientation, kind: EdgeKind) -> Self {
        Self { orientation, kind }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.orientation, self.kind)
    }
}

/// One of the eight concrete stores.
///
/// # Example
///
/// ```rust
/// use arbor_core::graph::{Edge, EdgeData, EdgeKind, GraphVariant, Orientation, VariantTag};
///
/// let graph: GraphVariant<&str> =
///     GraphVariant::new(VariantTag::new(Orientation::Undirected, EdgeKind::Weighted));
///
/// // A labeled edge is widened to the default weight.
/// graph.add_edge_data(Edge::with_payload("a", "b", EdgeData::Labeled("x".into())))?;
/// assert!(graph.has_edge(&"b", &"a"));
/// assert_eq!(graph.edges()[0].payload(), &EdgeData::Weighted(0.0));
/// # Ok::<(), arbor_core::Error>(())
/// ```
pub enum GraphVariant<V, D = ()> {
    /// Directed, plain arcs.
    DirectedPlain(DirectedGraph<V>),
    /// Directed, weighted arcs.
    DirectedWeighted(WeightedDirectedGraph<V>),
    /// Directed, labeled arcs.
    DirectedLabeled(LabeledDirectedGraph<V>),
    /// Directed, keyed-data arcs.
    DirectedKeyed(DataDirectedGraph<V, D>),
    /// Undirected, plain edges.
    UndirectedPlain(UndirectedGraph<V>),
    /// Undirected, weighted edges.
    UndirectedWeighted(WeightedUndirectedGraph<V>),
    /// Undirected, labeled edges.
    UndirectedLabeled(LabeledUndirectedGraph<V>),
    /// Undirected, keyed-data edges.
    UndirectedKeyed(DataUndirectedGraph<V, D>),
}

/// Evaluates `$body` with `$store` bound to whichever store `$value` holds.
macro_rules! dispatch {
    ($value:expr, $store:ident => $body:expr) => {
        match $value {
            GraphVariant::DirectedPlain($store) => $body,
            GraphVariant::DirectedWeighted($store) => $body,
            GraphVariant::DirectedLabeled($store) => $body,
            GraphVariant::DirectedKeyed($store) => $body,
            GraphVariant::UndirectedPlain($store) => $body,
            GraphVariant::UndirectedWeighted($store) => $body,
            GraphVariant::UndirectedLabeled($store) => $body,
            GraphVariant::UndirectedKeyed($store) => $body,
        }
    };
}

macro_rules! directed_only {
    ($value:expr, $store:ident => $body:expr) => {
        match $value {
            GraphVariant::DirectedPlain($store) => Some($body),
            GraphVariant::DirectedWeighted($store) => Some($body),
            GraphVariant::DirectedLabeled($store) => Some($body),
            GraphVariant::DirectedKeyed($store) => Some($body),
            _ => None,
        }
    };
}

impl<V: Vertex, D: KeyedData> GraphVariant<V, D> {
    /// Creates an empty store of the given shape.
    #[must_use]
    pub fn new(tag: VariantTag) -> Self {
        Self::with_config(tag, StoreConfig::default())
    }

    /// Creates an empty store of the given shape and settings.
    #[must_use]
    pub fn with_config(tag: VariantTag, config: StoreConfig) -> Self {
        match (tag.orientation, tag.kind) {
            (Orientation::Directed, EdgeKind::Plain) => {
                Self::DirectedPlain(AdjacencyList::with_config(config))
            }
            (Orientation::Directed, EdgeKind::Weighted) => {
                Self::DirectedWeighted(AdjacencyList::with_config(config))
            }
            (Orientation::Directed, EdgeKind::Labeled) => {
                Self::DirectedLabeled(AdjacencyList::with_config(config))
            }
            (Orientation::Directed, EdgeKind::Keyed) => {
                Self::DirectedKeyed(AdjacencyList::with_config(config))
            }
            (Orientation::Undirected, EdgeKind::Plain) => {
                Self::UndirectedPlain(AdjacencyList::with_config(config))
            }
            (Orientation::Undirected, EdgeKind::Weighted) => {
                Self::UndirectedWeighted(AdjacencyList::with_config(config))
            }
            (Orientation::Undirected, EdgeKind::Labeled) => {
                Self::UndirectedLabeled(AdjacencyList::with_config(config))
            }
            (Orientation::Undirected, EdgeKind::Keyed) => {
                Self::UndirectedKeyed(AdjacencyList::with_config(config))
            }
        }
    }

    /// Shape of the held store.
    #[must_use]
    pub fn tag(&self) -> VariantTag {
        let orientation = if self.is_directed() {
            Orientation::Directed
        } else {
            Orientation::Undirected
        };
        VariantTag::new(orientation, self.edge_kind())
    }

    /// Kind of the edges the held store keeps.
    #[must_use]
    pub fn edge_kind(&self) -> EdgeKind {
        dispatch!(self, store => store.edge_kind())
    }

    /// Whether the held store is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        dispatch!(self, store => store.is_directed())
    }

    // ── Shared contract ────────────────────────────────────────────────

    /// See [`AdjacencyList::has_vertex`].
    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        dispatch!(self, store => store.has_vertex(vertex))
    }

    /// See [`AdjacencyList::order`].
    #[must_use]
    pub fn order(&self) -> usize {
        dispatch!(self, store => store.order())
    }

    /// See [`AdjacencyList::size`].
    #[must_use]
    pub fn size(&self) -> usize {
        dispatch!(self, store => store.size())
    }

    /// See [`AdjacencyList::density`].
    #[must_use]
    pub fn density(&self) -> f64 {
        dispatch!(self, store => store.density())
    }

    /// See [`AdjacencyList::has_edge`].
    #[must_use]
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        dispatch!(self, store => store.has_edge(source, target))
    }

    /// Stored payload of the edge joining `source` to `target`.
    #[must_use]
    pub fn edge_data(&self, source: &V, target: &V) -> Option<EdgeData<D>> {
        dispatch!(self, store => store
            .inner
            .read()
            .payload(source, target)
            .cloned()
            .map(PayloadData::into_data))
    }

    /// See [`AdjacencyList::add_vertices`].
    pub fn add_vertices<I>(&self, vertices: I) -> Result<usize>
    where
        I: IntoIterator<Item = V>,
    {
        dispatch!(self, store => store.add_vertices(vertices))
    }

    /// See [`AdjacencyList::remove_vertices`].
    pub fn remove_vertices<I>(&self, vertices: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<V>,
    {
        dispatch!(self, store => store.remove_vertices(vertices))
    }

    /// Adds one edge, conforming its payload to the held store's kind the
    /// same way ingestion does. Returns true if the pair was new.
    pub fn add_edge_data(&self, edge: Edge<V, EdgeData<D>>) -> Result<bool> {
        let kind = self.edge_kind();
        let edge = edge.map_payload(|data| data.widen_to(kind).0);
        dispatch!(self, store => store.add_edge(edge.map_payload(PayloadData::from_data)))
    }

    /// See [`AdjacencyList::remove_edges`].
    pub fn remove_edges<I, E>(&self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = E>,
        E: Endpoints<V>,
    {
        dispatch!(self, store => store.remove_edges(edges))
    }

    /// See [`AdjacencyList::clear`].
    pub fn clear(&self) -> Result<()> {
        dispatch!(self, store => store.clear())
    }

    /// See [`AdjacencyList::each_vertex`].
    pub fn each_vertex<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        dispatch!(self, store => store.each_vertex(f));
    }

    /// See [`AdjacencyList::each_adjacent_to`].
    pub fn each_adjacent_to<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        dispatch!(self, store => store.each_adjacent_to(vertex, f));
    }

    /// See [`AdjacencyList::each_edge`]. Payloads are reported as
    /// [`EdgeData`].
    pub fn each_edge<F>(&self, mut f: F)
    where
        F: FnMut(Edge<V, EdgeData<D>>) -> bool,
    {
        dispatch!(self, store => store.each_edge(|edge| f(edge.map_payload(PayloadData::into_data))));
    }

    /// See [`AdjacencyList::each_edge_incident_to`].
    pub fn each_edge_incident_to<F>(&self, vertex: &V, mut f: F)
    where
        F: FnMut(Edge<V, EdgeData<D>>) -> bool,
    {
        dispatch!(self, store => store.each_edge_incident_to(vertex, |edge| {
            f(edge.map_payload(PayloadData::into_data))
        }));
    }

    /// Snapshot of all vertices.
    #[must_use]
    pub fn vertices(&self) -> Vec<V> {
        dispatch!(self, store => store.vertices())
    }

    /// Snapshot of all edges.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<V, EdgeData<D>>> {
        let mut out = Vec::with_capacity(self.size());
        self.each_edge(|edge| {
            out.push(edge);
            false
        });
        out
    }

    // ── Orientation-specific queries ───────────────────────────────────

    /// Out-degree for directed stores; `None` for undirected stores and
    /// unknown vertices.
    #[must_use]
    pub fn out_degree(&self, vertex: &V) -> Option<usize> {
        directed_only!(self, store => store.out_degree(vertex)).flatten()
    }

    /// In-degree for directed stores; `None` for undirected stores and
    /// unknown vertices.
    #[must_use]
    pub fn in_degree(&self, vertex: &V) -> Option<usize> {
        directed_only!(self, store => store.in_degree(vertex)).flatten()
    }

    /// Degree for undirected stores; `None` for directed stores and unknown
    /// vertices.
    #[must_use]
    pub fn degree(&self, vertex: &V) -> Option<usize> {
        match self {
            Self::UndirectedPlain(store) => store.degree(vertex),
            Self::UndirectedWeighted(store) => store.degree(vertex),
            Self::UndirectedLabeled(store) => store.degree(vertex),
            Self::UndirectedKeyed(store) => store.degree(vertex),
            _ => None,
        }
    }

    /// Transposed copy for directed stores; `None` for undirected stores.
    #[must_use]
    pub fn transpose(&self) -> Option<Self> {
        match self {
            Self::DirectedPlain(store) => Some(Self::DirectedPlain(store.transpose())),
            Self::DirectedWeighted(store) => Some(Self::DirectedWeighted(store.transpose())),
            Self::DirectedLabeled(store) => Some(Self::DirectedLabeled(store.transpose())),
            Self::DirectedKeyed(store) => Some(Self::DirectedKeyed(store.transpose())),
            _ => None,
        }
    }
}

impl<V: Vertex, D: KeyedData> Clone for GraphVariant<V, D> {
    fn clone(&self) -> Self {
        match self {
            Self::DirectedPlain(store) => Self::DirectedPlain(store.clone()),
            Self::DirectedWeighted(store) => Self::DirectedWeighted(store.clone()),
            Self::DirectedLabeled(store) => Self::DirectedLabeled(store.clone()),
            Self::DirectedKeyed(store) => Self::DirectedKeyed(store.clone()),
            Self::UndirectedPlain(store) => Self::UndirectedPlain(store.clone()),
            Self::UndirectedWeighted(store) => Self::UndirectedWeighted(store.clone()),
            Self::UndirectedLabeled(store) => Self::UndirectedLabeled(store.clone()),
            Self::UndirectedKeyed(store) => Self::UndirectedKeyed(store.clone()),
        }
    }
}

impl<V: Vertex, D: KeyedData> fmt::Debug for GraphVariant<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, store => fmt::Debug::fmt(store, f))
    }
}

macro_rules! impl_from_store {
    ($($variant:ident => $store:ty),* $(,)?) => {
        $(
            impl<V: Vertex, D: KeyedData> From<$store> for GraphVariant<V, D> {
                fn from(store: $store) -> Self {
                    Self::$variant(store)
                }
            }
        )*
    };
}

impl_from_store! {
    DirectedPlain => DirectedGraph<V>,
    DirectedWeighted => WeightedDirectedGraph<V>,
    DirectedLabeled => LabeledDirectedGraph<V>,
    DirectedKeyed => DataDirectedGraph<V, D>,
    UndirectedPlain => UndirectedGraph<V>,
    UndirectedWeighted => WeightedUndirectedGraph<V>,
    UndirectedLabeled => LabeledUndirectedGraph<V>,
    UndirectedKeyed => DataUndirectedGraph<V, D>,
}

impl<V: Vertex, D: KeyedData> Graph for GraphVariant<V, D> {
    type Vertex = V;

    fn has_vertex(&self, vertex: &V) -> bool {
        GraphVariant::has_vertex(self, vertex)
    }

    fn order(&self) -> usize {
        GraphVariant::order(self)
    }

    fn size(&self) -> usize {
        GraphVariant::size(self)
    }

    fn is_directed(&self) -> bool {
        GraphVariant::is_directed(self)
    }

    fn each_vertex<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        GraphVariant::each_vertex(self, f);
    }

    fn each_adjacent_to<F>(&self, vertex: &V, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        GraphVariant::each_adjacent_to(self, vertex, f);
    }
}

impl<V: Vertex, D: KeyedData> GraphSource for GraphVariant<V, D> {
    type Vertex = V;
    type Data = D;

    fn vertex_count(&self) -> usize {
        self.order()
    }

    fn enumerate_vertices<F>(&self, f: F)
    where
        F: FnMut(&V) -> bool,
    {
        GraphVariant::each_vertex(self, f);
    }

    fn enumerate_edges<F>(&self, f: F)
    where
        F: FnMut(Edge<V, EdgeData<D>>) -> bool,
    {
        GraphVariant::each_edge(self, f);
    }
}

impl<V: Vertex, D: KeyedData> IngestTarget<V> for GraphVariant<V, D> {
    type Data = D;

    fn accepts(&self, kind: EdgeKind) -> bool {
        kind == self.edge_kind()
    }

    fn ingest_edge(&self, edge: Edge<V, EdgeData<D>>) -> Result<()> {
        self.add_edge_data(edge)?;
        Ok(())
    }

    fn ingest_vertex(&self, vertex: V) -> Result<bool> {
        Ok(self.add_vertices(std::iter::once(vertex))? == 1)
    }

    fn target_order(&self) -> usize {
        self.order()
    }
}
