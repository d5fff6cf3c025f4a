//! RetrievalOrchestrator: the staged pipeline over the three ports.
//!
//! `Embedding → Searching → (Expanding) → Aggregating → Done`. Every failure
//! is wrapped with the stage that was running. No stage is retried.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;

use tokio::time::Instant;
use tracing::{debug, info, warn, Instrument};

use trellis_core::config::RetrievalConfig;
use trellis_core::errors::{AggregationError, ProtocolError, RetrievalError, TimeoutError};
use trellis_core::models::{ExpansionContext, PipelineStage, Query, RetrievalResult, SearchHit};
use trellis_core::traits::{IEmbedder, IGraphExpansion, IRetriever, IVectorSearch};
use trellis_observability::{embedding_span, expansion_span, retrieval_span, search_span};

use crate::aggregator::aggregate;

/// Reason recorded on every context when the expansion budget runs out.
pub const EXPANSION_TIMED_OUT: &str = "expansion timed out";

/// Limits and flags for one call, after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub requested_limit: usize,
    pub effective_limit: usize,
    pub expand_graph: bool,
}

pub struct RetrievalOrchestrator<E, V, G> {
    embedder: E,
    search: V,
    expansion: G,
    config: RetrievalConfig,
}

impl<E, V, G> RetrievalOrchestrator<E, V, G>
where
    E: IEmbedder,
    V: IVectorSearch,
    G: IGraphExpansion,
{
    pub fn new(embedder: E, search: V, expansion: G, config: RetrievalConfig) -> Self {
        info!(
            index = search.index_name(),
            model = embedder.model_name(),
            dims = embedder.dimensions(),
            default_limit = config.default_limit,
            max_limit = config.max_limit,
            "RetrievalOrchestrator initialized"
        );
        Self {
            embedder,
            search,
            expansion,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn search(&self) -> &V {
        &self.search
    }

    pub fn expansion(&self) -> &G {
        &self.expansion
    }

    /// Apply defaults and the configured cap. A zero limit is a malformed
    /// request, not an empty one.
    pub fn resolve(&self, query: &Query) -> Result<ResolvedQuery, ProtocolError> {
        let requested_limit = match query.limit {
            Some(0) => {
                return Err(ProtocolError::InvalidField {
                    field: "limit".to_string(),
                    reason: "must be a positive integer".to_string(),
                })
            }
            Some(n) => n,
            None => self.config.default_limit,
        };
        Ok(ResolvedQuery {
            requested_limit,
            effective_limit: requested_limit.min(self.config.max_limit),
            expand_graph: query.expand_graph.unwrap_or(self.config.expand_graph_default),
        })
    }

    /// Run the pipeline under the configured deadline, if any.
    pub async fn retrieve(&self, query: &Query) -> Result<RetrievalResult, RetrievalError> {
        let deadline = self.config.deadline().map(|d| Instant::now() + d);
        self.run(query, deadline).await
    }

    /// Run the pipeline under an explicit deadline.
    pub async fn retrieve_with_deadline(
        &self,
        query: &Query,
        deadline: Instant,
    ) -> Result<RetrievalResult, RetrievalError> {
        self.run(query, Some(deadline)).await
    }

    async fn run(&self, query: &Query, deadline: Option<Instant>) -> Result<RetrievalResult, RetrievalError> {
        // Rejected before any stage runs; attributed to the entry stage.
        let resolved = self
            .resolve(query)
            .map_err(|e| RetrievalError::new(PipelineStage::Embedding, e))?;

        let span = retrieval_span!(query.text, resolved.effective_limit, resolved.expand_graph);
        let started = Instant::now();
        let outcome = self.stages(query, resolved, deadline, started).instrument(span).await;

        match &outcome {
            Ok(result) => info!(
                results = result.results_count(),
                expanded = result.expanded,
                clamped = result.limit_clamped(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "retrieval complete"
            ),
            Err(e) => warn!(
                stage = %e.stage,
                code = e.code(),
                error = %e,
                "retrieval failed"
            ),
        }
        outcome
    }

    async fn stages(
        &self,
        query: &Query,
        resolved: ResolvedQuery,
        deadline: Option<Instant>,
        started: Instant,
    ) -> Result<RetrievalResult, RetrievalError> {
        transition(PipelineStage::Embedding);
        let vector = within(
            deadline,
            PipelineStage::Embedding,
            started,
            self.embedder
                .embed(&query.text)
                .instrument(embedding_span!(self.embedder.model_name(), self.embedder.dimensions())),
        )
        .await?
        .map_err(|e| RetrievalError::new(PipelineStage::Embedding, e))?;
        vector
            .ensure_dimensions(self.embedder.dimensions())
            .map_err(|e| RetrievalError::new(PipelineStage::Embedding, e))?;

        transition(PipelineStage::Searching);
        let outcome = within(
            deadline,
            PipelineStage::Searching,
            started,
            self.search
                .search(&vector, resolved.effective_limit)
                .instrument(search_span!(self.search.index_name(), resolved.effective_limit)),
        )
        .await?
        .map_err(|e| RetrievalError::new(PipelineStage::Searching, e))?;

        let effective_limit = resolved.effective_limit.min(outcome.effective_limit);
        if outcome.is_empty() {
            debug!("no hits; skipping expansion");
            transition(PipelineStage::Done);
            return Ok(RetrievalResult::empty(
                query.text.clone(),
                resolved.requested_limit,
                effective_limit,
            ));
        }

        let contexts = if resolved.expand_graph {
            transition(PipelineStage::Expanding);
            Some(self.expand(&outcome.hits, deadline, started).await?)
        } else {
            None
        };

        transition(PipelineStage::Aggregating);
        if let Some(at) = deadline {
            if Instant::now() >= at {
                return Err(timeout(PipelineStage::Aggregating, started));
            }
        }
        let result = aggregate(
            &query.text,
            &outcome.hits,
            contexts.as_ref(),
            resolved.requested_limit,
            effective_limit,
        )
        .map_err(|e: AggregationError| RetrievalError::new(PipelineStage::Aggregating, e))?;

        transition(PipelineStage::Done);
        Ok(result)
    }

    /// Expand every distinct hit, not just the ones that survive the cap.
    async fn expand(
        &self,
        hits: &[SearchHit],
        deadline: Option<Instant>,
        started: Instant,
    ) -> Result<BTreeMap<String, ExpansionContext>, RetrievalError> {
        let mut seen = HashSet::with_capacity(hits.len());
        let ids: Vec<String> = hits
            .iter()
            .filter(|h| seen.insert(h.fragment_id.as_str()))
            .map(|h| h.fragment_id.clone())
            .collect();

        let expansion = self
            .expansion
            .expand(&ids)
            .instrument(expansion_span!(ids.len()));

        let contexts = match (deadline, self.config.expansion_timeout()) {
            (Some(at), Some(budget)) => {
                let at = at.min(Instant::now() + budget);
                within(Some(at), PipelineStage::Expanding, started, expansion).await?
            }
            (Some(_), None) => within(deadline, PipelineStage::Expanding, started, expansion).await?,
            (None, Some(budget)) => match tokio::time::timeout(budget, expansion).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        fragments = ids.len(),
                        budget_ms = budget.as_millis() as u64,
                        "expansion exceeded its budget; returning partial result"
                    );
                    return Ok(ids
                        .iter()
                        .map(|id| (id.clone(), ExpansionContext::unavailable(EXPANSION_TIMED_OUT)))
                        .collect());
                }
            },
            (None, None) => expansion.await,
        };
        contexts.map_err(|e| RetrievalError::new(PipelineStage::Expanding, e))
    }
}

impl<E, V, G> IRetriever for RetrievalOrchestrator<E, V, G>
where
    E: IEmbedder,
    V: IVectorSearch,
    G: IGraphExpansion,
{
    async fn retrieve(&self, query: &Query) -> Result<RetrievalResult, RetrievalError> {
        RetrievalOrchestrator::retrieve(self, query).await
    }
}

fn transition(stage: PipelineStage) {
    debug!(stage = %stage, "pipeline stage");
}

fn timeout(stage: PipelineStage, started: Instant) -> RetrievalError {
    RetrievalError::new(
        stage,
        TimeoutError {
            stage,
            elapsed_ms: started.elapsed().as_millis() as u64,
        },
    )
}

/// Await `fut`, bounded by `deadline` when one applies. On expiry the
/// future is dropped, cancelling whatever it was driving.
async fn within<F: Future>(
    deadline: Option<Instant>,
    stage: PipelineStage,
    started: Instant,
    fut: F,
) -> Result<F::Output, RetrievalError> {
    match deadline {
        Some(at) => tokio::time::timeout_at(at, fut)
            .await
            .map_err(|_| timeout(stage, started)),
        None => Ok(fut.await),
    }
}
