/// Vector search errors. An empty hit list is not an error.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("vector index not found: {index}")]
    IndexNotFound { index: String },

    #[error("vector store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("index {index} holds {expected}-dimensional vectors, query has {actual}")]
    DimensionMismatch {
        index: String,
        expected: usize,
        actual: usize,
    },

    #[error("search limit must be positive")]
    InvalidLimit,
}
