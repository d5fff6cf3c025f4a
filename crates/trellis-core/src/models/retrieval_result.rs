use serde::{Deserialize, Serialize};

use super::entities::{AuthorRef, DocumentRef, FragmentRef};
use super::expansion_context::Relation;

/// Context lists attached to a result entry when expansion ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentContext {
    pub related_fragments: Vec<FragmentRef>,
    pub other_documents: Vec<DocumentRef>,
}

/// One entry of the terminal output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedFragment {
    pub fragment_id: String,
    pub text: String,
    pub score: f64,
    pub document: Relation<DocumentRef>,
    pub author: Relation<AuthorRef>,
    /// `None` when expansion did not run for this fragment.
    pub context: Option<FragmentContext>,
}

/// Ranked, capped, context-enriched result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub query: String,
    pub results: Vec<RetrievedFragment>,
    /// Limit carried by the request (or the default when absent).
    pub requested_limit: usize,
    /// Limit after clamping to the configured maximum.
    pub effective_limit: usize,
    /// Whether graph expansion ran.
    pub expanded: bool,
}

impl RetrievalResult {
    pub fn empty(query: impl Into<String>, requested_limit: usize, effective_limit: usize) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            requested_limit,
            effective_limit,
            expanded: false,
        }
    }

    pub fn results_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether the requested limit was reduced to the configured maximum.
    pub fn limit_clamped(&self) -> bool {
        self.effective_limit < self.requested_limit
    }

    pub fn fragment_ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.fragment_id.as_str()).collect()
    }
}
