//! # trellis-core
//!
//! Foundation crate for the Trellis retrieval engine.
//! Defines the data model, the three subsystem ports, errors, config, and
//! constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TrellisConfig;
pub use errors::{ErrorKind, RetrievalError, TrellisError, TrellisResult};
pub use models::{
    EmbeddingVector, ExpansionContext, PipelineStage, Query, Relation, RetrievalResult, SearchHit,
    SearchOutcome,
};
