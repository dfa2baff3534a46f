//! In-memory graph stores, ingestion and depth-first traversal.
//!
//! Eight store shapes come from one generic [`AdjacencyList`]: directed or
//! undirected, with plain, weighted, labeled or keyed-data edges. Every store
//! guards itself with a reader/writer lock and is shared by reference.
//!
//! # Example
//!
//! ```rust
//! use arbor_core::graph::{ingest, topological_sort, DirectedGraph, Edge, WeightedDirectedGraph};
//!
//! let graph = DirectedGraph::new();
//! graph.add_edges([Edge::new("shirt", "tie"), Edge::new("tie", "jacket")])?;
//! graph.add_vertices(["socks"])?;
//!
//! let sorted = topological_sort(&graph, ["shirt"])?;
//! assert_eq!(sorted, vec!["shirt", "tie", "jacket"]);
//!
//! // Copying into a weighted store gives every edge the default weight.
//! let weighted = WeightedDirectedGraph::new();
//! let report = ingest(&graph, &weighted)?;
//! assert_eq!(report.widened, 2);
//! assert_eq!(weighted.order(), 4);
//! # Ok::<(), arbor_core::Error>(())
//! ```

mod adjacency;
mod directed;
mod ingest;
mod source;
mod sync;
mod traits;
pub mod traversal;
mod types;
mod undirected;
mod variant;

#[cfg(test)]
mod adjacency_tests;
#[cfg(test)]
mod directed_tests;
#[cfg(test)]
mod source_tests;
#[cfg(test)]
mod sync_tests;

pub use adjacency::{AdjacencyList, Directionality};
pub use directed::{
    DataDirectedGraph, Directed, DirectedGraph, LabeledDirectedGraph, WeightedDirectedGraph,
};
pub use ingest::{ingest, ingest_arcs, IngestReport, IngestTarget};
pub use source::{ArcSource, EdgeList, GraphSource};
pub use traits::{Digraph, Graph};
pub use traversal::{
    depth_first, depth_first_from, topological_sort, DfsVisitor, FinishOrder, WalkStats,
};
pub use types::{
    Edge, EdgeData, EdgeKind, EdgePayload, Endpoints, KeyedData, PayloadData, RichPayload, Vertex,
};
pub use undirected::{
    DataUndirectedGraph, LabeledUndirectedGraph, Undirected, UndirectedGraph,
    WeightedUndirectedGraph,
};
pub use variant::{GraphVariant, Orientation, VariantTag};
