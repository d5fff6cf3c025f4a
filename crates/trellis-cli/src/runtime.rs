//! Config loading and pipeline wiring over the SQLite store.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use trellis_core::TrellisConfig;
use trellis_embeddings::EmbeddingEngine;
use trellis_graph::GraphExpander;
use trellis_retrieval::RetrievalOrchestrator;
use trellis_storage::{SqliteStore, SqliteVectorIndex};

pub type Pipeline = RetrievalOrchestrator<EmbeddingEngine, SqliteVectorIndex, GraphExpander<SqliteStore>>;

/// Read `--config` (defaults when absent) and apply `--db` on top.
pub fn load_config(path: Option<&Path>, db: Option<&Path>) -> anyhow::Result<TrellisConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            TrellisConfig::from_toml(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => TrellisConfig::default(),
    };
    if let Some(db) = db {
        config.storage.db_path = Some(db.to_string_lossy().into_owned());
    }
    Ok(config)
}

/// Owns the config and the store handle for one process.
pub struct Runtime {
    config: TrellisConfig,
    store: SqliteStore,
}

impl Runtime {
    pub fn open(config: TrellisConfig) -> anyhow::Result<Self> {
        let store = SqliteStore::from_config(&config.storage).context("failed to open store")?;
        if store.is_in_memory() {
            info!("no database configured, using an empty in-memory store");
        }
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn embedder(&self) -> EmbeddingEngine {
        EmbeddingEngine::new(self.config.embedding.clone())
    }

    pub fn pipeline(&self) -> Pipeline {
        let search = self
            .store
            .vector_index(self.config.search.index_name.clone(), self.config.search.max_limit);
        let expander = GraphExpander::new(Arc::new(self.store.clone()), &self.config.graph);
        RetrievalOrchestrator::new(self.embedder(), search, expander, self.config.retrieval.clone())
    }
}
