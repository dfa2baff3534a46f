//! Error types for arbor-core.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by graph stores, ingestion and traversal.
///
/// Every variant signals a caller contract violation. Operations that have
/// nothing to do (unknown vertices, empty inputs) succeed silently instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A depth-first walk was requested without any start vertex.
    #[error("Depth-first traversal requires at least one start vertex")]
    EmptyStartSet,

    /// The ingestion target does not accept any known edge kind.
    #[error("Ingestion target `{target}` accepts no recognized edge kind")]
    NoEdgeCapability {
        /// Type name of the rejected target.
        target: &'static str,
    },

    /// A store was mutated from inside one of its own enumeration callbacks.
    #[error("Store #{store} cannot be mutated while it is being enumerated on this thread")]
    ReentrantMutation {
        /// Identifier of the store instance.
        store: u64,
    },

    /// A topological ordering was requested for a graph containing a cycle.
    #[error("Cycle detected: back edge into vertex {0}")]
    CycleDetected(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for arbor operations.
pub type Result<T> = std::result::Result<T, Error>;
