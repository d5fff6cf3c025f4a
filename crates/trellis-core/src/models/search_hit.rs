use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One candidate produced by vector search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub fragment_id: String,
    /// Higher is more similar. Scale belongs to the adapter; never re-normalized.
    pub score: f64,
    /// Fragment text stored alongside the vector.
    pub text: String,
}

impl SearchHit {
    pub fn new(fragment_id: impl Into<String>, score: f64, text: impl Into<String>) -> Self {
        Self {
            fragment_id: fragment_id.into(),
            score,
            text: text.into(),
        }
    }

    /// Ranking order: score descending, fragment id ascending on ties.
    /// Scores that compare equal (including `0.0` and `-0.0`) are ties.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        tie_zero(other.score)
            .total_cmp(&tie_zero(self.score))
            .then_with(|| self.fragment_id.cmp(&other.fragment_id))
    }
}

/// Map `-0.0` to `0.0`; every other value, NaN included, is unchanged.
fn tie_zero(score: f64) -> f64 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

/// Result of one vector search call, with limit clamping made explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub index_name: String,
    pub hits: Vec<SearchHit>,
    /// Limit the caller asked for.
    pub requested_limit: usize,
    /// Limit actually applied after the server-side cap.
    pub effective_limit: usize,
}

impl SearchOutcome {
    pub fn empty(index_name: impl Into<String>, requested_limit: usize, effective_limit: usize) -> Self {
        Self {
            index_name: index_name.into(),
            hits: Vec::new(),
            requested_limit,
            effective_limit,
        }
    }

    /// Whether the server-side cap reduced the requested limit.
    pub fn truncated(&self) -> bool {
        self.effective_limit < self.requested_limit
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
