use serde::{Deserialize, Serialize};

use super::entities::{AuthorRef, DocumentRef, FragmentRef};

/// Outcome of following one relation in the graph.
///
/// Absence is always explicit: a relation the store does not have is
/// `Missing`, a lookup that failed for this fragment only is `Unavailable`,
/// and a relation that was never looked up because expansion did not run is
/// `Skipped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Relation<T> {
    Found(T),
    Missing,
    Unavailable { reason: String },
    Skipped,
}

impl<T> Relation<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Relation::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Relation::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Relation::Found(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Relation::Unavailable { .. })
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Relation::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Relation<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Relation::Found(v),
            None => Relation::Missing,
        }
    }
}

/// Structural neighborhood of one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionContext {
    pub document: Relation<DocumentRef>,
    pub author: Relation<AuthorRef>,
    /// Same document, excluding the fragment itself. Bounded, ascending id.
    pub related_fragments: Vec<FragmentRef>,
    /// Same author, excluding the owning document. Bounded, ascending id.
    pub other_documents: Vec<DocumentRef>,
}

impl ExpansionContext {
    /// A context where every lookup failed for the same reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            document: Relation::unavailable(reason.clone()),
            author: Relation::unavailable(reason),
            related_fragments: Vec::new(),
            other_documents: Vec::new(),
        }
    }

    /// Whether every relation resolved (found or legitimately missing).
    pub fn is_complete(&self) -> bool {
        !self.document.is_unavailable() && !self.author.is_unavailable()
    }
}
