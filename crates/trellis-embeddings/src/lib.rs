//! # trellis-embeddings
//!
//! Embedder adapter for the retrieval pipeline.
//!
//! `EmbeddingEngine` implements the `IEmbedder` port on top of any
//! synchronous `IEmbeddingProvider`: it rejects blank input, checks vector
//! length against the configured dimension, and caches vectors in an L1
//! `moka` cache. `HashingProvider` is the bundled deterministic provider.

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::L1MemoryCache;
pub use engine::EmbeddingEngine;
pub use providers::HashingProvider;
