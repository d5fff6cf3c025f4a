//! # trellis-observability
//!
//! Subscriber setup (stderr only, so stdout stays free for the tool
//! protocol), span macros for each pipeline stage, and [`QueryLog`].

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_json, init_tracing_with};
