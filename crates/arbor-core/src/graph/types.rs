//! Vertex identity, edges and the edge payload family.
//!
//! Edge kinds are ordered by richness: plain < weighted < labeled < keyed.
//! Each kind maps to one payload type stored in the adjacency map:
//!
//! | Kind     | Payload     | Default  |
//! |----------|-------------|----------|
//! | Plain    | `()`        | `()`     |
//! | Weighted | `f64`       | `0.0`    |
//! | Labeled  | `String`    | `""`     |
//! | Keyed    | `Option<D>` | `None`   |

use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Anything usable as a vertex: compared by `Eq`, located by `Hash`.
///
/// Blanket-implemented, so `u64`, `&'static str`, `String` or any user type
/// with the right derives qualifies.
pub trait Vertex: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> Vertex for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

/// Values carried by keyed-data edges. Only equality is required.
pub trait KeyedData: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> KeyedData for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Edge payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// No payload.
    Plain,
    /// Numeric weight.
    Weighted,
    /// String label.
    Labeled,
    /// Arbitrary equality-comparable value.
    Keyed,
}

impl EdgeKind {
    /// All kinds, richest first. This is the probing order used by ingestion.
    pub const BY_RICHNESS: [EdgeKind; 4] = [
        EdgeKind::Keyed,
        EdgeKind::Labeled,
        EdgeKind::Weighted,
        EdgeKind::Plain,
    ];

    /// Returns true for every kind except [`EdgeKind::Plain`].
    #[must_use]
    pub fn carries_payload(self) -> bool {
        self != EdgeKind::Plain
    }

    /// Returns the lowercase name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Plain => "plain",
            EdgeKind::Weighted => "weighted",
            EdgeKind::Labeled => "labeled",
            EdgeKind::Keyed => "keyed",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered `(source, target)` pair with a payload.
///
/// Undirected stores hand out edges in this same form; which endpoint comes
/// first is then unspecified.
///
/// # Example
///
/// ```rust
/// use arbor_core::graph::Edge;
///
/// let plain = Edge::new("a", "b");
/// assert_eq!(plain.source(), &"a");
///
/// let weighted = Edge::weighted("a", "b", 2.5);
/// assert_eq!(weighted.weight(), 2.5);
///
/// let reversed = weighted.reversed();
/// assert_eq!(reversed.target(), &"a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V, P = ()> {
    source: V,
    target: V,
    payload: P,
}

impl<V> Edge<V, ()> {
    /// Creates a plain edge.
    #[must_use]
    pub fn new(source: V, target: V) -> Self {
        Self {
            source,
            target,
            payload: (),
        }
    }
}

impl<V> Edge<V, f64> {
    /// Creates a weighted edge.
    #[must_use]
    pub fn weighted(source: V, target: V, weight: f64) -> Self {
        Self::with_payload(source, target, weight)
    }

    /// Returns the edge weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.payload
    }
}

impl<V> Edge<V, String> {
    /// Creates a labeled edge.
    #[must_use]
    pub fn labeled(source: V, target: V, label: impl Into<String>) -> Self {
        Self::with_payload(source, target, label.into())
    }

    /// Returns the edge label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.payload
    }
}

impl<V, D> Edge<V, Option<D>> {
    /// Creates a keyed-data edge carrying `data`.
    #[must_use]
    pub fn keyed(source: V, target: V, data: D) -> Self {
        Self::with_payload(source, target, Some(data))
    }

    /// Returns the data value, if any.
    #[must_use]
    pub fn data(&self) -> Option<&D> {
        self.payload.as_ref()
    }
}

impl<V, P> Edge<V, P> {
    /// Creates an edge with an explicit payload.
    #[must_use]
    pub fn with_payload(source: V, target: V, payload: P) -> Self {
        Self {
            source,
            target,
            payload,
        }
    }

    /// Returns the source vertex.
    #[must_use]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Returns the target vertex.
    #[must_use]
    pub fn target(&self) -> &V {
        &self.target
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Splits the edge into `(source, target, payload)`.
    #[must_use]
    pub fn into_parts(self) -> (V, V, P) {
        (self.source, self.target, self.payload)
    }

    /// Returns the same edge pointing the other way.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            payload: self.payload,
        }
    }

    /// Replaces the payload through `f`.
    #[must_use]
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Edge<V, Q> {
        Edge {
            source: self.source,
            target: self.target,
            payload: f(self.payload),
        }
    }

    /// Drops the payload.
    #[must_use]
    pub fn into_plain(self) -> Edge<V> {
        Edge::new(self.source, self.target)
    }
}

/// Anything that names a `(source, target)` pair. Used where payloads are
/// irrelevant, such as edge removal.
pub trait Endpoints<V> {
    /// Source endpoint.
    fn source_vertex(&self) -> &V;
    /// Target endpoint.
    fn target_vertex(&self) -> &V;
}

impl<V, P> Endpoints<V> for Edge<V, P> {
    fn source_vertex(&self) -> &V {
        &self.source
    }

    fn target_vertex(&self) -> &V {
        &self.target
    }
}

impl<V> Endpoints<V> for (V, V) {
    fn source_vertex(&self) -> &V {
        &self.0
    }

    fn target_vertex(&self) -> &V {
        &self.1
    }
}

impl<V, E: Endpoints<V>> Endpoints<V> for &E {
    fn source_vertex(&self) -> &V {
        (**self).source_vertex()
    }

    fn target_vertex(&self) -> &V {
        (**self).target_vertex()
    }
}

/// A payload type stored in an adjacency map.
pub trait EdgePayload: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Kind tag of this payload.
    const KIND: EdgeKind;

    /// Data type used when this payload is exposed as [`EdgeData`].
    type Data: KeyedData;

    /// The payload synthesized when a poorer edge is widened to this kind.
    fn default_payload() -> Self;

    /// Wraps the payload as [`EdgeData`] over its own data type.
    fn into_edge_data(self) -> EdgeData<Self::Data>;

    /// Extracts the payload from `data`, using the default on a kind mismatch.
    fn from_edge_data(data: EdgeData<Self::Data>) -> Self;
}

/// Marker for payloads other than `()`; gates payload-sensitive queries.
pub trait RichPayload: EdgePayload {}

impl EdgePayload for () {
    const KIND: EdgeKind = EdgeKind::Plain;
    type Data = ();

    fn default_payload() -> Self {}

    fn into_edge_data(self) -> EdgeData {
        EdgeData::Plain
    }

    fn from_edge_data(_data: EdgeData) -> Self {}
}

impl EdgePayload for f64 {
    const KIND: EdgeKind = EdgeKind::Weighted;
    type Data = ();

    fn default_payload() -> Self {
        0.0
    }

    fn into_edge_data(self) -> EdgeData {
        EdgeData::Weighted(self)
    }

    fn from_edge_data(data: EdgeData) -> Self {
        match data {
            EdgeData::Weighted(weight) => weight,
            _ => Self::default_payload(),
        }
    }
}

impl RichPayload for f64 {}

impl EdgePayload for String {
    const KIND: EdgeKind = EdgeKind::Labeled;
    type Data = ();

    fn default_payload() -> Self {
        String::new()
    }

    fn into_edge_data(self) -> EdgeData {
        EdgeData::Labeled(self)
    }

    fn from_edge_data(data: EdgeData) -> Self {
        match data {
            EdgeData::Labeled(label) => label,
            _ => Self::default_payload(),
        }
    }
}

impl RichPayload for String {}

impl<D: KeyedData> EdgePayload for Option<D> {
    const KIND: EdgeKind = EdgeKind::Keyed;
    type Data = D;

    fn default_payload() -> Self {
        None
    }

    fn into_edge_data(self) -> EdgeData<D> {
        EdgeData::Keyed(self)
    }

    fn from_edge_data(data: EdgeData<D>) -> Self {
        match data {
            EdgeData::Keyed(value) => value,
            _ => None,
        }
    }
}

impl<D: KeyedData> RichPayload for Option<D> {}

/// Kind-tagged payload used at store boundaries (ingestion, variant dispatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeData<D = ()> {
    /// No payload.
    Plain,
    /// Weight payload.
    Weighted(f64),
    /// Label payload.
    Labeled(String),
    /// Keyed-data payload.
    Keyed(Option<D>),
}

impl<D> EdgeData<D> {
    /// Returns the kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EdgeKind {
        match self {
            EdgeData::Plain => EdgeKind::Plain,
            EdgeData::Weighted(_) => EdgeKind::Weighted,
            EdgeData::Labeled(_) => EdgeKind::Labeled,
            EdgeData::Keyed(_) => EdgeKind::Keyed,
        }
    }

    /// Default payload of `kind`.
    #[must_use]
    pub fn default_for(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Plain => EdgeData::Plain,
            EdgeKind::Weighted => EdgeData::Weighted(0.0),
            EdgeKind::Labeled => EdgeData::Labeled(String::new()),
            EdgeKind::Keyed => EdgeData::Keyed(None),
        }
    }

    /// Conforms this payload to `kind`.
    ///
    /// A payload already of `kind` is forwarded unchanged. A plain target
    /// drops whatever payload it gets. Anything else is replaced by the
    /// default of `kind`. The flag is true when a default was synthesized.
    #[must_use]
    pub fn widen_to(self, kind: EdgeKind) -> (Self, bool) {
        if self.kind() == kind {
            (self, false)
        } else if kind == EdgeKind::Plain {
            (EdgeData::Plain, false)
        } else {
            (Self::default_for(kind), true)
        }
    }
}

impl<D: KeyedData> EdgeData<D> {
    /// Re-types this payload over data type `T`.
    ///
    /// Keyed data survives only when `T` is `D`; any other keyed value
    /// becomes absent and the flag is set. Other kinds carry no data and
    /// convert unchanged.
    #[must_use]
    pub fn cast<T: KeyedData>(self) -> (EdgeData<T>, bool) {
        match self {
            EdgeData::Plain => (EdgeData::Plain, false),
            EdgeData::Weighted(weight) => (EdgeData::Weighted(weight), false),
            EdgeData::Labeled(label) => (EdgeData::Labeled(label), false),
            EdgeData::Keyed(None) => (EdgeData::Keyed(None), false),
            EdgeData::Keyed(Some(value)) => {
                let mut slot = Some(value);
                match (&mut slot as &mut dyn Any)
                    .downcast_mut::<Option<T>>()
                    .and_then(Option::take)
                {
                    Some(value) => (EdgeData::Keyed(Some(value)), false),
                    None => (EdgeData::Keyed(None), true),
                }
            }
        }
    }

    /// Conforms this payload to `kind` over data type `T`.
    ///
    /// Combines [`widen_to`](Self::widen_to) and [`cast`](Self::cast). The
    /// flag is true when a default or an absent value was synthesized.
    #[must_use]
    pub fn conform<T: KeyedData>(self, kind: EdgeKind) -> (EdgeData<T>, bool) {
        let (data, widened) = self.widen_to(kind);
        let (data, dropped) = data.cast::<T>();
        (data, widened || dropped)
    }
}

/// Conversion between a stored payload and [`EdgeData`] over data type `D`.
pub trait PayloadData<D>: EdgePayload {
    /// Extracts the payload from `data`, using the default on a kind mismatch.
    fn from_data(data: EdgeData<D>) -> Self;

    /// Wraps the payload as [`EdgeData`].
    fn into_data(self) -> EdgeData<D>;
}

impl<D> PayloadData<D> for () {
    fn from_data(_data: EdgeData<D>) -> Self {}

    fn into_data(self) -> EdgeData<D> {
        EdgeData::Plain
    }
}

impl<D> PayloadData<D> for f64 {
    fn from_data(data: EdgeData<D>) -> Self {
        match data {
            EdgeData::Weighted(weight) => weight,
            _ => Self::default_payload(),
        }
    }

    fn into_data(self) -> EdgeData<D> {
        EdgeData::Weighted(self)
    }
}

impl<D> PayloadData<D> for String {
    fn from_data(data: EdgeData<D>) -> Self {
        match data {
            EdgeData::Labeled(label) => label,
            _ => Self::default_payload(),
        }
    }

    fn into_data(self) -> EdgeData<D> {
        EdgeData::Labeled(self)
    }
}

impl<D: KeyedData> PayloadData<D> for Option<D> {
    fn from_data(data: EdgeData<D>) -> Self {
        match data {
            EdgeData::Keyed(value) => value,
            _ => None,
        }
    }

    fn into_data(self) -> EdgeData<D> {
        EdgeData::Keyed(self)
    }
}
