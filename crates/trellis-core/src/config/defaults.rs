// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_MODEL: &str = "trellis-hashing-v1";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Vector search ---
pub const DEFAULT_INDEX_NAME: &str = "fragment_embeddings";
pub const DEFAULT_SEARCH_MAX_LIMIT: usize = 50;

// --- Graph expansion ---
// Sibling and related-document bounds are configurable; these are only the
// values used when the config file leaves them out.
pub const DEFAULT_MAX_SIBLING_FRAGMENTS: usize = 3;
pub const DEFAULT_MAX_OTHER_DOCUMENTS: usize = 3;
pub const DEFAULT_EXPANSION_MAX_IN_FLIGHT: usize = 8;

// --- Retrieval ---
pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const DEFAULT_MAX_RESULT_LIMIT: usize = 50;
pub const DEFAULT_EXPAND_GRAPH: bool = true;

// --- Storage ---
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
