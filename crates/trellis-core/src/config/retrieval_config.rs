use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Limit applied when the request carries none.
    pub default_limit: usize,
    /// Requests above this limit are clamped, not rejected.
    pub max_limit: usize,
    /// Expand-graph flag applied when the request carries none.
    pub expand_graph_default: bool,
    /// Overall deadline for one `retrieve` call, in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Budget for the expansion stage alone. Only degrades to a partial
    /// result when no overall deadline applies.
    pub expansion_timeout_ms: Option<u64>,
}

impl RetrievalConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn expansion_timeout(&self) -> Option<Duration> {
        self.expansion_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_RESULT_LIMIT,
            max_limit: defaults::DEFAULT_MAX_RESULT_LIMIT,
            expand_graph_default: defaults::DEFAULT_EXPAND_GRAPH,
            deadline_ms: None,
            expansion_timeout_ms: None,
        }
    }
}
