use serde::{Deserialize, Serialize};

use super::entities::{Author, Document, Fragment};

/// A self-contained set of entities and their edges.
///
/// Edges are implied: `fragment.document_id` is a `contains` edge from the
/// document, `document.author_id` is an `authored` edge from the author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corpus {
    pub authors: Vec<Author>,
    pub documents: Vec<Document>,
    pub fragments: Vec<Fragment>,
}

impl Corpus {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn fragment(&self, id: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
