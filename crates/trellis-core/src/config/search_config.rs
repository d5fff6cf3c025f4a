use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector search adapter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Name of the vector index the adapter is bound to.
    pub index_name: String,
    /// Server-side cap on hits per search. Larger requests are truncated.
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_name: defaults::DEFAULT_INDEX_NAME.to_string(),
            max_limit: defaults::DEFAULT_SEARCH_MAX_LIMIT,
        }
    }
}
