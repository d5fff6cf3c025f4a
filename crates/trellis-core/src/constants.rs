/// Trellis version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name under which the retrieval operation is exposed at the tool boundary.
pub const TOOL_NAME: &str = "graph_context_search";

/// Edge label from a document to each fragment it contains.
pub const EDGE_CONTAINS: &str = "contains";

/// Edge label from an author to each document they authored.
pub const EDGE_AUTHORED: &str = "authored";

/// Hard ceiling on any configured result limit.
pub const MAX_RESULT_LIMIT: usize = 1_000;

/// Hard ceiling on concurrent graph lookups per expander.
pub const MAX_EXPANSION_IN_FLIGHT: usize = 256;
