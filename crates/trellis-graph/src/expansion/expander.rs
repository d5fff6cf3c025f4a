//! GraphExpander, the `IGraphExpansion` adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use trellis_core::config::GraphConfig;
use trellis_core::errors::ExpansionError;
use trellis_core::models::ExpansionContext;
use trellis_core::traits::{IGraphExpansion, IGraphStore};

use super::fragment::{expand_fragment, ExpansionBounds};

/// Fans expansion out per fragment on a `JoinSet`. Every task holds one
/// permit of a semaphore for its whole run, so at most `max_in_flight`
/// fragments touch the store at once across every caller sharing it.
pub struct GraphExpander<S> {
    store: Arc<S>,
    bounds: ExpansionBounds,
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl<S: IGraphStore> GraphExpander<S> {
    pub fn new(store: Arc<S>, config: &GraphConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_in_flight));
        Self::with_semaphore(store, config, permits, config.max_in_flight)
    }

    /// Share an existing permit pool, e.g. between expanders over
    /// different stores that hit the same backend.
    pub fn with_semaphore(
        store: Arc<S>,
        config: &GraphConfig,
        permits: Arc<Semaphore>,
        max_in_flight: usize,
    ) -> Self {
        Self {
            store,
            bounds: ExpansionBounds::from(config),
            permits,
            max_in_flight,
        }
    }

    pub fn bounds(&self) -> ExpansionBounds {
        self.bounds
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fragments being expanded right now.
    pub fn in_flight(&self) -> usize {
        self.max_in_flight
            .saturating_sub(self.permits.available_permits())
    }
}

impl<S: IGraphStore> IGraphExpansion for GraphExpander<S> {
    async fn expand(&self, fragment_ids: &[String]) -> Result<BTreeMap<String, ExpansionContext>, ExpansionError> {
        let unique: BTreeSet<&String> = fragment_ids.iter().collect();
        debug!(requested = fragment_ids.len(), unique = unique.len(), "expanding fragments");

        // Dropping the set aborts every outstanding task and returns its permit.
        let mut tasks = JoinSet::new();
        for id in unique {
            let store = Arc::clone(&self.store);
            let permits = Arc::clone(&self.permits);
            let bounds = self.bounds;
            let id = id.clone();
            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| ExpansionError::TaskFailed {
                        reason: format!("expansion permits closed: {e}"),
                    })?;
                let context = expand_fragment(store.as_ref(), &id, bounds).await?;
                Ok::<_, ExpansionError>((id, context))
            });
        }

        let mut contexts = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((id, context))) => {
                    contexts.insert(id, context);
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "expansion aborted");
                    return Err(e);
                }
                Err(e) => {
                    return Err(ExpansionError::TaskFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }

        let degraded = contexts.values().filter(|c| !c.is_complete()).count();
        debug!(expanded = contexts.len(), degraded, "expansion complete");
        Ok(contexts)
    }
}
