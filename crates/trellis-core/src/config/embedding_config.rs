use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model identifier the embedder is bound to.
    pub model_name: String,
    /// Fixed vector length D. Every vector in the pipeline must match it.
    pub dimensions: usize,
    /// L1 in-memory cache max entries. Zero disables the cache.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
