//! Expansion of a single fragment: four relation lookups in order.

use tracing::warn;

use trellis_core::config::GraphConfig;
use trellis_core::errors::{ExpansionError, GraphStoreError};
use trellis_core::models::{DocumentRef, ExpansionContext, FragmentRef, Relation};
use trellis_core::traits::IGraphStore;

/// Caps on the list-valued relations of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionBounds {
    pub max_sibling_fragments: usize,
    pub max_other_documents: usize,
}

impl From<&GraphConfig> for ExpansionBounds {
    fn from(config: &GraphConfig) -> Self {
        Self {
            max_sibling_fragments: config.max_sibling_fragments,
            max_other_documents: config.max_other_documents,
        }
    }
}

/// Outcome of one lookup: a value, a recoverable marker, or a batch abort.
enum Lookup<T> {
    Value(T),
    Failed(String),
}

fn classify<T>(result: Result<T, GraphStoreError>) -> Result<Lookup<T>, ExpansionError> {
    match result {
        Ok(value) => Ok(Lookup::Value(value)),
        Err(e) if e.is_connection_failure() => Err(ExpansionError::StoreUnavailable {
            reason: e.to_string(),
        }),
        Err(e) => Ok(Lookup::Failed(e.to_string())),
    }
}

/// Expand one fragment.
///
/// Document lookup gates the rest: without a document there is no author
/// and no siblings, and `author` is reported as skipped. Only a lost store
/// connection returns `Err`.
pub(crate) async fn expand_fragment<S: IGraphStore>(
    store: &S,
    fragment_id: &str,
    bounds: ExpansionBounds,
) -> Result<ExpansionContext, ExpansionError> {
    let document = match classify(store.fragment_document(fragment_id).await)? {
        Lookup::Value(Some(doc)) => doc,
        Lookup::Value(None) => {
            return Ok(ExpansionContext {
                document: Relation::Missing,
                author: Relation::Skipped,
                related_fragments: Vec::new(),
                other_documents: Vec::new(),
            })
        }
        Lookup::Failed(reason) => {
            warn!(fragment_id, %reason, "document lookup failed");
            return Ok(ExpansionContext {
                document: Relation::Unavailable { reason },
                author: Relation::Skipped,
                related_fragments: Vec::new(),
                other_documents: Vec::new(),
            });
        }
    };

    let author = match classify(store.document_author(&document.id).await)? {
        Lookup::Value(found) => Relation::from(found),
        Lookup::Failed(reason) => {
            warn!(fragment_id, document_id = %document.id, %reason, "author lookup failed");
            Relation::Unavailable { reason }
        }
    };

    let related_fragments = if bounds.max_sibling_fragments == 0 {
        Vec::new()
    } else {
        match classify(
            store
                .document_fragments(&document.id, fragment_id, bounds.max_sibling_fragments)
                .await,
        )? {
            Lookup::Value(fragments) => normalize_fragments(fragments, fragment_id, bounds.max_sibling_fragments),
            Lookup::Failed(reason) => {
                warn!(fragment_id, document_id = %document.id, %reason, "sibling lookup failed");
                Vec::new()
            }
        }
    };

    let other_documents = match (&author, bounds.max_other_documents) {
        (Relation::Found(author), max) if max > 0 => {
            match classify(store.author_documents(&author.id, &document.id, max).await)? {
                Lookup::Value(documents) => normalize_documents(documents, &document.id, max),
                Lookup::Failed(reason) => {
                    warn!(fragment_id, author_id = %author.id, %reason, "other-documents lookup failed");
                    Vec::new()
                }
            }
        }
        _ => Vec::new(),
    };

    Ok(ExpansionContext {
        document: Relation::Found(document),
        author,
        related_fragments,
        other_documents,
    })
}

/// Ascending id, no self, no duplicates, at most `limit`. Stores promise
/// this already; the expander does not rely on it.
fn normalize_fragments(mut fragments: Vec<FragmentRef>, exclude: &str, limit: usize) -> Vec<FragmentRef> {
    fragments.retain(|f| f.id != exclude);
    fragments.sort_by(|a, b| a.id.cmp(&b.id));
    fragments.dedup_by(|a, b| a.id == b.id);
    fragments.truncate(limit);
    fragments
}

fn normalize_documents(mut documents: Vec<DocumentRef>, exclude: &str, limit: usize) -> Vec<DocumentRef> {
    documents.retain(|d| d.id != exclude);
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    documents.dedup_by(|a, b| a.id == b.id);
    documents.truncate(limit);
    documents
}
