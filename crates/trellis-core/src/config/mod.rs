//! Typed configuration, injected into each engine at construction.
//!
//! The core never reads files or the environment. Front ends parse a TOML
//! document with [`TrellisConfig::from_toml`] and hand the sections to the
//! engines they build.

pub mod defaults;
mod embedding_config;
mod graph_config;
mod observability_config;
mod retrieval_config;
mod search_config;
mod storage_config;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use search_config::SearchConfig;
pub use storage_config::StorageConfig;

use crate::constants::{MAX_EXPANSION_IN_FLIGHT, MAX_RESULT_LIMIT};
use crate::errors::{TrellisError, TrellisResult};

/// Top-level configuration aggregating every subsystem section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
    pub graph: GraphConfig,
    pub retrieval: RetrievalConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TrellisConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> TrellisResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| TrellisError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> TrellisResult<String> {
        toml::to_string_pretty(self).map_err(|e| TrellisError::ConfigError(e.to_string()))
    }

    /// Check cross-field constraints that serde alone cannot express.
    pub fn validate(&self) -> TrellisResult<()> {
        if self.embedding.dimensions == 0 {
            return fail("embedding.dimensions must be positive".to_string());
        }
        if self.embedding.model_name.trim().is_empty() {
            return fail("embedding.model_name must not be empty".to_string());
        }
        if self.search.index_name.trim().is_empty() {
            return fail("search.index_name must not be empty".to_string());
        }
        if self.search.max_limit == 0 || self.search.max_limit > MAX_RESULT_LIMIT {
            return fail(format!(
                "search.max_limit must be in 1..={MAX_RESULT_LIMIT}, got {}",
                self.search.max_limit
            ));
        }
        if self.retrieval.max_limit == 0 || self.retrieval.max_limit > MAX_RESULT_LIMIT {
            return fail(format!(
                "retrieval.max_limit must be in 1..={MAX_RESULT_LIMIT}, got {}",
                self.retrieval.max_limit
            ));
        }
        if self.retrieval.default_limit == 0
            || self.retrieval.default_limit > self.retrieval.max_limit
        {
            return fail(format!(
                "retrieval.default_limit must be in 1..={}, got {}",
                self.retrieval.max_limit, self.retrieval.default_limit
            ));
        }
        if self.graph.max_in_flight == 0 || self.graph.max_in_flight > MAX_EXPANSION_IN_FLIGHT {
            return fail(format!(
                "graph.max_in_flight must be in 1..={MAX_EXPANSION_IN_FLIGHT}, got {}",
                self.graph.max_in_flight
            ));
        }
        if self.storage.read_pool_size == 0 {
            return fail("storage.read_pool_size must be positive".to_string());
        }
        Ok(())
    }
}

fn fail(message: String) -> TrellisResult<()> {
    Err(TrellisError::ConfigError(message))
}
