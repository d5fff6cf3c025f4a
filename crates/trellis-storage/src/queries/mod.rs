//! Plain SQL operations over a borrowed connection.

pub mod corpus_ops;
pub mod graph_ops;
pub mod vector_search;
