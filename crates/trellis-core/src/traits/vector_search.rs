use std::future::Future;
use std::sync::Arc;

use crate::errors::SearchError;
use crate::models::{EmbeddingVector, SearchOutcome};

/// Port: nearest-neighbor search over fragment vectors in one named index.
pub trait IVectorSearch: Send + Sync {
    /// Return at most `limit` hits ordered by score descending, fragment id
    /// ascending on ties. Limits above the adapter's cap are truncated and
    /// reported through [`SearchOutcome::effective_limit`].
    fn search(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
    ) -> impl Future<Output = Result<SearchOutcome, SearchError>> + Send;

    /// Index the adapter is bound to.
    fn index_name(&self) -> &str;
}

impl<T: IVectorSearch> IVectorSearch for Arc<T> {
    fn search(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
    ) -> impl Future<Output = Result<SearchOutcome, SearchError>> + Send {
        (**self).search(vector, limit)
    }

    fn index_name(&self) -> &str {
        (**self).index_name()
    }
}
