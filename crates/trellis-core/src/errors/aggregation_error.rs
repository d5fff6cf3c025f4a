/// Pipeline invariant violations detected while assembling the result.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("non-finite similarity score for fragment {fragment_id}")]
    NonFiniteScore { fragment_id: String },
}
