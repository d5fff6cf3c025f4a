use serde::{Deserialize, Serialize};

/// A single retrieval request. Created per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    /// Requested result count. `None` takes the configured default.
    pub limit: Option<usize>,
    /// Whether to run graph expansion. `None` takes the configured default.
    pub expand_graph: Option<bool>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
            expand_graph: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_expand_graph(mut self, expand: bool) -> Self {
        self.expand_graph = Some(expand);
        self
    }
}
