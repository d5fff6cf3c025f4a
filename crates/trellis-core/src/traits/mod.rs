//! Ports the orchestrator is written against.
//!
//! Each port is an async trait using return-position `impl Future + Send`
//! so adapters can be driven from multi-threaded runtimes. Adapters
//! implement these with plain `async fn`.

mod embedder;
mod graph_expansion;
mod graph_store;
mod retriever;
mod vector_search;

pub use embedder::{IEmbedder, IEmbeddingProvider};
pub use graph_expansion::IGraphExpansion;
pub use graph_store::IGraphStore;
pub use retriever::IRetriever;
pub use vector_search::IVectorSearch;
