//! # trellis-tool
//!
//! JSON boundary for the retrieval pipeline, exposed as the
//! `graph_context_search` tool.
//!
//! ## Architecture
//!
//! - `tool.rs`: [`RetrievalTool`], request validation, dispatch, query log
//! - `descriptor.rs`: name, description, and input schema
//! - `server.rs`: line-delimited JSON loop over any async reader/writer
//! - `conversions/`: wire shapes for requests, results, and errors

pub mod conversions;
pub mod descriptor;
pub mod server;
pub mod tool;

pub use descriptor::descriptor;
pub use server::serve;
pub use tool::RetrievalTool;
