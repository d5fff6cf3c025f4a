mod aggregation_error;
mod embedding_error;
mod expansion_error;
mod graph_store_error;
mod protocol_error;
mod retrieval_error;
mod search_error;
mod storage_error;
mod timeout_error;

pub use aggregation_error::AggregationError;
pub use embedding_error::EmbeddingError;
pub use expansion_error::ExpansionError;
pub use graph_store_error::GraphStoreError;
pub use protocol_error::ProtocolError;
pub use retrieval_error::{RetrievalError, StageError};
pub use search_error::SearchError;
pub use storage_error::StorageError;
pub use timeout_error::TimeoutError;

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum TrellisError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("expansion error: {0}")]
    ExpansionError(#[from] ExpansionError),

    #[error("graph store error: {0}")]
    GraphStoreError(#[from] GraphStoreError),

    #[error("aggregation error: {0}")]
    AggregationError(#[from] AggregationError),

    #[error(transparent)]
    RetrievalError(#[from] RetrievalError),

    #[error("timeout: {0}")]
    TimeoutError(#[from] TimeoutError),

    #[error("protocol error: {0}")]
    ProtocolError(#[from] ProtocolError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl TrellisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrellisError::EmbeddingError(_) => ErrorKind::Embedding,
            TrellisError::SearchError(_) => ErrorKind::Search,
            TrellisError::ExpansionError(_) | TrellisError::GraphStoreError(_) => {
                ErrorKind::Expansion
            }
            TrellisError::AggregationError(_) => ErrorKind::Aggregation,
            TrellisError::RetrievalError(e) => e.kind(),
            TrellisError::TimeoutError(_) => ErrorKind::Timeout,
            TrellisError::ProtocolError(_) => ErrorKind::Protocol,
            TrellisError::StorageError(_) => ErrorKind::Storage,
            TrellisError::ConfigError(_) => ErrorKind::Config,
        }
    }
}

pub type TrellisResult<T> = Result<T, TrellisError>;

/// Error categories rendered at the tool boundary and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Embedding,
    Search,
    Expansion,
    Aggregation,
    Timeout,
    Protocol,
    Storage,
    Config,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Embedding => "embedding_error",
            ErrorKind::Search => "search_error",
            ErrorKind::Expansion => "expansion_error",
            ErrorKind::Aggregation => "aggregation_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Protocol => "protocol_error",
            ErrorKind::Storage => "storage_error",
            ErrorKind::Config => "config_error",
        }
    }
}
