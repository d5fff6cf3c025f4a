//! # trellis-graph
//!
//! Structural context for search hits. [`GraphExpander`] implements the
//! `IGraphExpansion` port over any `IGraphStore`, fanning out per fragment
//! under a shared concurrency bound. [`IndexedGraph`] is an in-memory
//! `IGraphStore` built on `petgraph`.

pub mod expansion;
pub mod graph;

pub use expansion::{ExpansionBounds, GraphExpander};
pub use graph::{EdgeKind, EntityKind, EntityNode, IndexedGraph};
