//! Scripted port implementations with call accounting.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use trellis_core::errors::{EmbeddingError, ExpansionError, SearchError};
use trellis_core::models::{
    AuthorRef, DocumentRef, EmbeddingVector, ExpansionContext, Relation, SearchHit, SearchOutcome,
};
use trellis_core::traits::{IEmbedder, IGraphExpansion, IVectorSearch};

/// Embedder returning a constant unit-ish vector. Blank text is rejected
/// like the real engine does.
pub struct FakeEmbedder {
    dimensions: usize,
    /// Length actually produced; differs from `dimensions` to simulate a
    /// misbehaving model.
    output_len: usize,
    delay: Duration,
    available: bool,
    calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            output_len: dimensions,
            delay: Duration::ZERO,
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_output_len(mut self, len: usize) -> Self {
        self.output_len = len;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput {
                reason: "query text is empty".into(),
            });
        }
        if !self.available {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: "fake".into(),
            });
        }
        Ok(EmbeddingVector::new(vec![1.0; self.output_len]))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

/// Vector search returning a fixed hit list, truncated to the limit.
pub struct FakeSearch {
    hits: Vec<SearchHit>,
    max_limit: usize,
    failure: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
    last_limit: AtomicUsize,
}

impl FakeSearch {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            max_limit: usize::MAX,
            failure: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_limit: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail every call with `StoreUnavailable`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> usize {
        self.last_limit.load(Ordering::SeqCst)
    }
}

impl IVectorSearch for FakeSearch {
    async fn search(&self, _vector: &EmbeddingVector, limit: usize) -> Result<SearchOutcome, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(reason) = &self.failure {
            return Err(SearchError::StoreUnavailable {
                reason: reason.clone(),
            });
        }
        let effective = limit.min(self.max_limit);
        Ok(SearchOutcome {
            index_name: "fake".into(),
            hits: self.hits.iter().take(effective).cloned().collect(),
            requested_limit: limit,
            effective_limit: effective,
        })
    }

    fn index_name(&self) -> &str {
        "fake"
    }
}

/// Expansion returning scripted contexts; unknown ids get a missing document.
pub struct FakeExpansion {
    contexts: BTreeMap<String, ExpansionContext>,
    delay: Duration,
    connection_lost: bool,
    calls: AtomicUsize,
    last_ids: Mutex<Vec<String>>,
}

impl FakeExpansion {
    pub fn new(contexts: BTreeMap<String, ExpansionContext>) -> Self {
        Self {
            contexts,
            delay: Duration::ZERO,
            connection_lost: false,
            calls: AtomicUsize::new(0),
            last_ids: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Every id resolves to document `doc-<id>` by author `author-1`.
    pub fn uniform(ids: &[&str]) -> Self {
        let contexts = ids
            .iter()
            .map(|id| ((*id).to_string(), context(id, Some("author-1"))))
            .collect();
        Self::new(contexts)
    }

    pub fn with_context(mut self, id: &str, context: ExpansionContext) -> Self {
        self.contexts.insert(id.to_string(), context);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn connection_lost(mut self) -> Self {
        self.connection_lost = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_ids(&self) -> Vec<String> {
        self.last_ids.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

impl IGraphExpansion for FakeExpansion {
    async fn expand(&self, fragment_ids: &[String]) -> Result<BTreeMap<String, ExpansionContext>, ExpansionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_ids.lock() {
            *last = fragment_ids.to_vec();
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.connection_lost {
            return Err(ExpansionError::StoreUnavailable {
                reason: "graph store connection lost".into(),
            });
        }
        Ok(fragment_ids
            .iter()
            .map(|id| {
                let ctx = self.contexts.get(id).cloned().unwrap_or(ExpansionContext {
                    document: Relation::Missing,
                    author: Relation::Skipped,
                    related_fragments: Vec::new(),
                    other_documents: Vec::new(),
                });
                (id.clone(), ctx)
            })
            .collect())
    }
}

/// A context with document `doc-<id>` and, optionally, an author.
pub fn context(fragment_id: &str, author_id: Option<&str>) -> ExpansionContext {
    ExpansionContext {
        document: Relation::Found(DocumentRef {
            id: format!("doc-{fragment_id}"),
            title: format!("Document for {fragment_id}"),
        }),
        author: author_id
            .map(|id| AuthorRef {
                id: id.to_string(),
                name: format!("Author {id}"),
            })
            .into(),
        related_fragments: Vec::new(),
        other_documents: Vec::new(),
    }
}
