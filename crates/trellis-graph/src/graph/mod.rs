//! In-memory entity graph.

mod indexed_graph;

pub use indexed_graph::{EdgeKind, EntityGraph, EntityKind, EntityNode, IndexedGraph};
