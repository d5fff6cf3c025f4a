//! Span definitions per pipeline stage.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $limit:expr, $expand:expr) => {
        tracing::info_span!(
            "trellis.retrieval",
            query = %$query,
            limit = $limit,
            expand = $expand
        )
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($model:expr, $dimension:expr) => {
        tracing::debug_span!("trellis.embedding", model = %$model, dimension = $dimension)
    };
}

/// Create a vector search span.
#[macro_export]
macro_rules! search_span {
    ($index:expr, $limit:expr) => {
        tracing::debug_span!("trellis.search", index = %$index, limit = $limit)
    };
}

/// Create a graph expansion span.
#[macro_export]
macro_rules! expansion_span {
    ($fragment_count:expr) => {
        tracing::debug_span!("trellis.expansion", fragment_count = $fragment_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "trellis.retrieval";
    pub const EMBEDDING: &str = "trellis.embedding";
    pub const SEARCH: &str = "trellis.search";
    pub const EXPANSION: &str = "trellis.expansion";
}
