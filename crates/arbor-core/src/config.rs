//! Layered configuration for arbor stores.
//!
//! Values are resolved in this order, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `arbor.toml` in the working directory (optional)
//! 3. `ARBOR_*` environment variables, `__` separating nested keys
//!    (e.g. `ARBOR_STORE__DUPLICATE_EDGES=overwrite`)
//!
//! # Example
//!
//! ```rust
//! use arbor_core::config::{ArborConfig, DuplicateEdgePolicy};
//!
//! let config = ArborConfig::from_toml_str(
//!     r#"
//!     [store]
//!     initial_capacity = 64
//!     duplicate_edges = "overwrite"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.store.initial_capacity, 64);
//! assert_eq!(config.store.duplicate_edges, DuplicateEdgePolicy::Overwrite);
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "arbor.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ARBOR_";

/// Upper bound for `store.initial_capacity`.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong shape.
    #[error("Failed to load configuration: {0}")]
    Load(String),

    /// A value parsed but is outside its accepted range.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

/// What `add_edges` does when the endpoint pair is already recorded with a
/// different payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// The first payload written for a pair is kept.
    #[default]
    KeepFirst,
    /// A re-added pair replaces its stored payload. The edge count is unchanged.
    Overwrite,
}

/// Per-store settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of vertices the adjacency map is pre-sized for.
    pub initial_capacity: usize,
    /// Payload handling for repeated edges.
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl StoreConfig {
    /// Sets the initial capacity (builder pattern).
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the duplicate edge policy (builder pattern).
    #[must_use]
    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    /// Store settings.
    pub store: StoreConfig,
}

impl ArborConfig {
    /// Loads configuration from `arbor.toml` and `ARBOR_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(CONFIG_FILE_NAME)
    }

    /// Loads configuration from the given TOML file and `ARBOR_*` variables.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Self::defaults()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Parses configuration from a TOML string, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let figment = Self::defaults().merge(Toml::string(toml));
        Self::extract(&figment)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidValue {
                key: "store.initial_capacity".to_string(),
                message: format!(
                    "{} exceeds the maximum of {}",
                    self.store.initial_capacity, MAX_INITIAL_CAPACITY
                ),
            });
        }
        Ok(())
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        tracing::debug!(
            initial_capacity = config.store.initial_capacity,
            duplicate_edges = ?config.store.duplicate_edges,
            "arbor configuration loaded"
        );
        Ok(config)
    }
}
