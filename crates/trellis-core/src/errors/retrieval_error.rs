use crate::models::PipelineStage;

use super::{
    AggregationError, EmbeddingError, ErrorKind, ExpansionError, ProtocolError, SearchError,
    TimeoutError,
};

/// The error a pipeline stage raised, before stage context is attached.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl StageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StageError::Embedding(_) => ErrorKind::Embedding,
            StageError::Search(_) => ErrorKind::Search,
            StageError::Expansion(_) => ErrorKind::Expansion,
            StageError::Aggregation(_) => ErrorKind::Aggregation,
            StageError::Timeout(_) => ErrorKind::Timeout,
            StageError::Protocol(_) => ErrorKind::Protocol,
        }
    }
}

/// Uniform failure of one `retrieve` call: the stage that was running plus
/// the error it raised.
#[derive(Debug, thiserror::Error)]
#[error("retrieval failed during {stage}: {source}")]
pub struct RetrievalError {
    pub stage: PipelineStage,
    #[source]
    pub source: StageError,
}

impl RetrievalError {
    pub fn new(stage: PipelineStage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// Stable machine-readable code for the structured error response.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Message of the originating error, without the stage prefix.
    pub fn message(&self) -> String {
        self.source.to_string()
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}
