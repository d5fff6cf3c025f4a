//! Fixture corpus loader and deterministic fake ports for Trellis tests.

pub mod fakes;

use std::path::PathBuf;
use std::sync::Arc;

use trellis_core::config::{EmbeddingConfig, StorageConfig};
use trellis_core::models::{Corpus, SearchHit};
use trellis_embeddings::EmbeddingEngine;
use trellis_graph::IndexedGraph;
use trellis_storage::SqliteStore;

pub use fakes::{FakeEmbedder, FakeExpansion, FakeSearch};

/// Name of the bundled corpus.
pub const LIBRARY: &str = "library.json";

/// Index the seeded SQLite store writes embeddings into.
pub const FIXTURE_INDEX: &str = "fragment_embeddings";

/// Directory holding the JSON corpora.
pub fn corpus_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("corpus")
}

pub fn corpus_path(name: &str) -> PathBuf {
    corpus_dir().join(name)
}

/// Load a corpus by file name.
///
/// # Panics
/// Panics if the file is missing or malformed.
pub fn load_corpus(name: &str) -> Corpus {
    let path = corpus_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read corpus {}: {}", path.display(), e));
    Corpus::from_json(&content)
        .unwrap_or_else(|e| panic!("Failed to parse corpus {}: {}", path.display(), e))
}

pub fn library() -> Corpus {
    load_corpus(LIBRARY)
}

/// Small embedding config so tests stay fast.
pub fn embedding_config() -> EmbeddingConfig {
    EmbeddingConfig {
        dimensions: 64,
        ..EmbeddingConfig::default()
    }
}

/// An in-memory SQLite store holding `corpus`, embedded by `engine`.
pub fn seeded_store(corpus: &Corpus, engine: &EmbeddingEngine) -> SqliteStore {
    let store = SqliteStore::open_in_memory(&StorageConfig::default())
        .unwrap_or_else(|e| panic!("Failed to open store: {e}"));
    store
        .import_corpus(corpus, FIXTURE_INDEX, engine.config().dimensions, |text| {
            engine.embed_query(text).map(|v| v.into_inner())
        })
        .unwrap_or_else(|e| panic!("Failed to import corpus: {e}"));
    store
}

pub fn graph(corpus: &Corpus) -> Arc<IndexedGraph> {
    Arc::new(IndexedGraph::from_corpus(corpus))
}

pub fn hit(id: &str, score: f64) -> SearchHit {
    SearchHit::new(id, score, format!("text of {id}"))
}
