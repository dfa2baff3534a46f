//! # Arbor Core
//!
//! In-memory graph storage and depth-first traversal.
//!
//! ## Features
//!
//! - **Store family**: directed and undirected adjacency lists with plain,
//!   weighted, labeled or keyed-data edges, all from one generic store
//! - **Thread-safe**: one reader/writer lock per store, shared by `&self`
//! - **Ingestion**: copy any graph source into any store, widening edge
//!   payloads to what the target holds
//! - **Traversal**: iterative depth-first walk with five visitor hooks,
//!   finish order and topological sort
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_core::graph::{depth_first_from, DfsVisitor, DirectedGraph, Edge};
//!
//! #[derive(Default)]
//! struct BackEdges(Vec<&'static str>);
//!
//! impl DfsVisitor<&'static str> for BackEdges {
//!     fn on_back_edge(&mut self, vertex: &&'static str) {
//!         self.0.push(*vertex);
//!     }
//! }
//!
//! let graph = DirectedGraph::new();
//! graph.add_edges([Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "a")])?;
//!
//! let mut visitor = BackEdges::default();
//! depth_first_from(&graph, &mut visitor, ["a"])?;
//! assert_eq!(visitor.0, vec!["a"]);
//! # Ok::<(), arbor_core::Error>(())
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::float_cmp,
        clippy::manual_assert
    )
)]

pub mod config;
pub mod error;
pub mod graph;

pub use config::{ArborConfig, ConfigError, DuplicateEdgePolicy, StoreConfig};
pub use error::{Error, Result};
pub use graph::{
    AdjacencyList, DirectedGraph, Edge, EdgeData, EdgeKind, GraphVariant, UndirectedGraph,
};
