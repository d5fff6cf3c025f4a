//! SqliteStore: owns the connection pool and implements `IGraphStore`.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use trellis_core::config::StorageConfig;
use trellis_core::errors::{EmbeddingError, GraphStoreError, StorageError, TrellisResult};
use trellis_core::models::{Author, AuthorRef, Corpus, Document, DocumentRef, Fragment, FragmentRef};
use trellis_core::traits::IGraphStore;

use crate::pool::ConnectionPool;
use crate::queries::corpus_ops::{self, CountedTable};
use crate::queries::{graph_ops, vector_search};
use crate::vector_index::SqliteVectorIndex;
use crate::{to_storage_err, StorageResult};

/// Counts written by [`SqliteStore::import_corpus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub authors: usize,
    pub documents: usize,
    pub fragments: usize,
    pub embeddings: usize,
}

/// Cloneable handle to one SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteStore {
    pub fn open(path: &Path, config: &StorageConfig) -> StorageResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        info!(path = %path.display(), readers = pool.readers.size(), "opened sqlite store");
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub fn open_in_memory(config: &StorageConfig) -> StorageResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        debug!(readers = pool.readers.size(), "opened in-memory sqlite store");
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// File-backed when `db_path` is set, in-memory otherwise.
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        match &config.db_path {
            Some(path) => Self::open(Path::new(path), config),
            None => Self::open_in_memory(config),
        }
    }

    /// A search handle bound to `index_name`, capped at `max_limit` hits.
    pub fn vector_index(&self, index_name: impl Into<String>, max_limit: usize) -> SqliteVectorIndex {
        SqliteVectorIndex::new(self.clone(), index_name.into(), max_limit)
    }

    /// Stop serving. Every later call fails with `ConnectionUnavailable`.
    pub fn close(&self) {
        self.pool.close();
        info!("sqlite store closed");
    }

    pub fn is_in_memory(&self) -> bool {
        self.pool.db_path.is_none()
    }

    /// Run a read on a pooled connection off the async runtime.
    pub(crate) async fn read<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.pool.ensure_open()?;
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || pool.readers.with_conn(f))
            .await
            .map_err(|e| StorageError::ConnectionUnavailable {
                reason: format!("read task failed: {e}"),
            })?
    }

    fn write<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        self.pool.ensure_open()?;
        self.pool.writer.with_conn_sync(f)
    }

    pub fn insert_author(&self, author: &Author) -> StorageResult<()> {
        self.write(|conn| corpus_ops::insert_author(conn, author))
    }

    pub fn insert_document(&self, document: &Document) -> StorageResult<()> {
        self.write(|conn| corpus_ops::insert_document(conn, document))
    }

    pub fn insert_fragment(&self, fragment: &Fragment) -> StorageResult<()> {
        self.write(|conn| corpus_ops::insert_fragment(conn, fragment))
    }

    pub fn create_index(&self, index_name: &str, dimensions: usize) -> StorageResult<()> {
        self.write(|conn| vector_search::create_index(conn, index_name, dimensions))
    }

    pub fn upsert_embedding(&self, index_name: &str, fragment_id: &str, vector: &[f32]) -> StorageResult<()> {
        self.write(|conn| vector_search::upsert_embedding(conn, index_name, fragment_id, vector))
    }

    pub fn count(&self, table: CountedTable) -> StorageResult<usize> {
        self.write(|conn| corpus_ops::count_rows(conn, table))
    }

    /// Write a whole corpus and its embeddings into `index_name` in one
    /// transaction. Vectors are computed before the writer is locked.
    /// Fragments with blank text are stored but not embedded.
    pub fn import_corpus<F>(
        &self,
        corpus: &Corpus,
        index_name: &str,
        dimensions: usize,
        mut embed: F,
    ) -> TrellisResult<ImportSummary>
    where
        F: FnMut(&str) -> Result<Vec<f32>, EmbeddingError>,
    {
        let mut vectors = Vec::with_capacity(corpus.fragments.len());
        for fragment in &corpus.fragments {
            if fragment.text.trim().is_empty() {
                warn!(fragment_id = %fragment.id, "blank fragment text; stored without an embedding");
                continue;
            }
            vectors.push((fragment.id.as_str(), embed(&fragment.text)?));
        }

        let summary = self.write(|conn| {
            let tx = conn.unchecked_transaction().map_err(to_storage_err)?;
            vector_search::create_index(&tx, index_name, dimensions)?;
            for author in &corpus.authors {
                corpus_ops::insert_author(&tx, author)?;
            }
            for document in &corpus.documents {
                corpus_ops::insert_document(&tx, document)?;
            }
            for fragment in &corpus.fragments {
                corpus_ops::insert_fragment(&tx, fragment)?;
            }
            for (fragment_id, vector) in &vectors {
                vector_search::upsert_embedding(&tx, index_name, fragment_id, vector)?;
            }
            tx.commit().map_err(to_storage_err)?;
            Ok(ImportSummary {
                authors: corpus.authors.len(),
                documents: corpus.documents.len(),
                fragments: corpus.fragments.len(),
                embeddings: vectors.len(),
            })
        })?;

        info!(
            index = index_name,
            fragments = summary.fragments,
            documents = summary.documents,
            authors = summary.authors,
            "imported corpus"
        );
        Ok(summary)
    }
}

fn graph_err(entity_id: &str, e: StorageError) -> GraphStoreError {
    match e {
        StorageError::ConnectionUnavailable { reason } => GraphStoreError::ConnectionLost { reason },
        other => GraphStoreError::LookupFailed {
            entity_id: entity_id.to_string(),
            reason: other.to_string(),
        },
    }
}

impl IGraphStore for SqliteStore {
    async fn fragment_document(&self, fragment_id: &str) -> Result<Option<DocumentRef>, GraphStoreError> {
        let id = fragment_id.to_string();
        self.read(move |conn| graph_ops::fragment_document(conn, &id))
            .await
            .map_err(|e| graph_err(fragment_id, e))
    }

    async fn document_author(&self, document_id: &str) -> Result<Option<AuthorRef>, GraphStoreError> {
        let id = document_id.to_string();
        self.read(move |conn| graph_ops::document_author(conn, &id))
            .await
            .map_err(|e| graph_err(document_id, e))
    }

    async fn document_fragments(
        &self,
        document_id: &str,
        exclude_fragment: &str,
        limit: usize,
    ) -> Result<Vec<FragmentRef>, GraphStoreError> {
        let id = document_id.to_string();
        let exclude = exclude_fragment.to_string();
        self.read(move |conn| graph_ops::document_fragments(conn, &id, &exclude, limit))
            .await
            .map_err(|e| graph_err(document_id, e))
    }

    async fn author_documents(
        &self,
        author_id: &str,
        exclude_document: &str,
        limit: usize,
    ) -> Result<Vec<DocumentRef>, GraphStoreError> {
        let id = author_id.to_string();
        let exclude = exclude_document.to_string();
        self.read(move |conn| graph_ops::author_documents(conn, &id, &exclude, limit))
            .await
            .map_err(|e| graph_err(author_id, e))
    }
}
