//! SqliteVectorIndex: `IVectorSearch` over one named index.

use tracing::debug;

use trellis_core::errors::{SearchError, StorageError};
use trellis_core::models::{EmbeddingVector, SearchOutcome};
use trellis_core::traits::IVectorSearch;

use crate::queries::vector_search::{self, IndexScan};
use crate::store::SqliteStore;

pub struct SqliteVectorIndex {
    store: SqliteStore,
    index_name: String,
    max_limit: usize,
}

impl SqliteVectorIndex {
    pub(crate) fn new(store: SqliteStore, index_name: String, max_limit: usize) -> Self {
        Self {
            store,
            index_name,
            max_limit,
        }
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }
}

impl IVectorSearch for SqliteVectorIndex {
    async fn search(&self, vector: &EmbeddingVector, limit: usize) -> Result<SearchOutcome, SearchError> {
        if limit == 0 {
            return Err(SearchError::InvalidLimit);
        }
        let effective = limit.min(self.max_limit);
        let index = self.index_name.clone();
        let query = vector.as_slice().to_vec();
        let actual = query.len();

        let scan = self
            .store
            .read(move |conn| vector_search::scan_index(conn, &index, &query, effective))
            .await
            .map_err(|e| SearchError::StoreUnavailable {
                reason: match e {
                    StorageError::ConnectionUnavailable { reason } => reason,
                    other => other.to_string(),
                },
            })?;

        match scan {
            IndexScan::Missing => Err(SearchError::IndexNotFound {
                index: self.index_name.clone(),
            }),
            IndexScan::DimensionMismatch { dimensions } => Err(SearchError::DimensionMismatch {
                index: self.index_name.clone(),
                expected: dimensions,
                actual,
            }),
            IndexScan::Hits(hits) => {
                debug!(
                    index = %self.index_name,
                    requested = limit,
                    effective,
                    hits = hits.len(),
                    "vector scan complete"
                );
                Ok(SearchOutcome {
                    index_name: self.index_name.clone(),
                    hits,
                    requested_limit: limit,
                    effective_limit: effective,
                })
            }
        }
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }
}
