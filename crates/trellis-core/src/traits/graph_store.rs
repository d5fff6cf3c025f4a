use std::future::Future;

use crate::errors::GraphStoreError;
use crate::models::{AuthorRef, DocumentRef, FragmentRef};

/// Relation-level access to the entity graph.
///
/// Edges: `document -contains-> fragment`, `author -authored-> document`.
/// Every call is one sub-call against the store; implementations acquire
/// and release their connection inside it.
pub trait IGraphStore: Send + Sync + 'static {
    /// Owning document via the reverse `contains` edge.
    fn fragment_document(
        &self,
        fragment_id: &str,
    ) -> impl Future<Output = Result<Option<DocumentRef>, GraphStoreError>> + Send;

    /// Authoring entity via the reverse `authored` edge.
    fn document_author(
        &self,
        document_id: &str,
    ) -> impl Future<Output = Result<Option<AuthorRef>, GraphStoreError>> + Send;

    /// Fragments of `document_id` other than `exclude_fragment`, ascending
    /// id, at most `limit`.
    fn document_fragments(
        &self,
        document_id: &str,
        exclude_fragment: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FragmentRef>, GraphStoreError>> + Send;

    /// Documents of `author_id` other than `exclude_document`, ascending id,
    /// at most `limit`.
    fn author_documents(
        &self,
        author_id: &str,
        exclude_document: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DocumentRef>, GraphStoreError>> + Send;
}
