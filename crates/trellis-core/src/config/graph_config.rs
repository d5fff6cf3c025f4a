use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph expansion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum sibling fragments (same document, excluding self) per hit.
    pub max_sibling_fragments: usize,
    /// Maximum other documents by the same author (excluding the owning document) per hit.
    pub max_other_documents: usize,
    /// Maximum concurrent per-fragment lookups against the graph store.
    pub max_in_flight: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_sibling_fragments: defaults::DEFAULT_MAX_SIBLING_FRAGMENTS,
            max_other_documents: defaults::DEFAULT_MAX_OTHER_DOCUMENTS,
            max_in_flight: defaults::DEFAULT_EXPANSION_MAX_IN_FLIGHT,
        }
    }
}
