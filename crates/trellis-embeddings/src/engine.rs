//! EmbeddingEngine, the `IEmbedder` adapter.
//!
//! Wraps one provider with input validation, dimension checks, and the L1
//! cache.

use trellis_core::config::EmbeddingConfig;
use trellis_core::errors::EmbeddingError;
use trellis_core::models::EmbeddingVector;
use trellis_core::traits::{IEmbedder, IEmbeddingProvider};
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::providers::HashingProvider;

/// The embedding engine bound to one model name and dimension.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: Option<L1MemoryCache>,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Engine over the bundled hashing provider.
    pub fn new(config: EmbeddingConfig) -> Self {
        let provider = HashingProvider::named(config.dimensions, config.model_name.clone());
        Self::with_provider(config, Box::new(provider))
    }

    /// Engine over a caller-supplied provider.
    pub fn with_provider(config: EmbeddingConfig, provider: Box<dyn IEmbeddingProvider>) -> Self {
        let cache = (config.cache_size > 0).then(|| L1MemoryCache::new(config.cache_size));
        info!(
            provider = provider.name(),
            model = %config.model_name,
            dims = config.dimensions,
            cache_size = config.cache_size,
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Embed query text synchronously.
    ///
    /// Blank text is rejected before the provider is called. A provider that
    /// returns the wrong vector length is reported, never truncated.
    pub fn embed_query(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput {
                reason: "query text is empty".to_string(),
            });
        }

        let key = L1MemoryCache::key(&self.config.model_name, text);
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            debug!(model = %self.config.model_name, "embedding cache hit");
            return Ok(EmbeddingVector::new(cached));
        }

        if !self.provider.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            });
        }

        let values = self.provider.embed(text)?;
        if values.len() != self.config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: values.len(),
            });
        }

        if let Some(cache) = &self.cache {
            cache.insert(key, values.clone());
        }
        Ok(EmbeddingVector::new(values))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Entries currently cached. Zero when the cache is disabled.
    pub fn cached_entries(&self) -> u64 {
        self.cache.as_ref().map(|c| c.len()).unwrap_or(0)
    }
}

impl IEmbedder for EmbeddingEngine {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        self.embed_query(text)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dims: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            model_name: "test-model".to_string(),
            dimensions: dims,
            cache_size: 64,
        }
    }

    #[test]
    fn embeds_with_configured_dimensions() {
        let engine = EmbeddingEngine::new(config(128));
        let v = engine.embed_query("knowledge graph").unwrap();
        assert_eq!(v.dimensions(), 128);
    }

    #[test]
    fn rejects_blank_text() {
        let engine = EmbeddingEngine::new(config(32));
        for text in ["", "   ", "\n\t"] {
            let err = engine.embed_query(text).unwrap_err();
            assert!(matches!(err, EmbeddingError::InvalidInput { .. }));
        }
    }

    #[test]
    fn caches_repeated_queries() {
        let engine = EmbeddingEngine::new(config(32));
        let a = engine.embed_query("cached query").unwrap();
        let b = engine.embed_query("cached query").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cached_entries(), 1);
    }

    #[test]
    fn zero_cache_size_disables_cache() {
        let mut cfg = config(32);
        cfg.cache_size = 0;
        let engine = EmbeddingEngine::new(cfg);
        engine.embed_query("no cache").unwrap();
        assert_eq!(engine.cached_entries(), 0);
    }

    #[test]
    fn provider_dimension_mismatch_is_reported() {
        let engine =
            EmbeddingEngine::with_provider(config(64), Box::new(HashingProvider::new(32)));
        let err = engine.embed_query("mismatch").unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 64,
                actual: 32
            }
        ));
    }

    struct OfflineProvider;
    impl IEmbeddingProvider for OfflineProvider {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            unreachable!("availability is checked first")
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "offline"
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn unavailable_provider_is_reported() {
        let engine = EmbeddingEngine::with_provider(config(8), Box::new(OfflineProvider));
        let err = engine.embed_query("anything").unwrap_err();
        assert!(matches!(err, EmbeddingError::ProviderUnavailable { .. }));
    }

    #[tokio::test]
    async fn port_impl_reports_model_and_dims() {
        let engine = EmbeddingEngine::new(config(16));
        assert_eq!(IEmbedder::dimensions(&engine), 16);
        assert_eq!(IEmbedder::model_name(&engine), "test-model");
        let v = IEmbedder::embed(&engine, "async path").await.unwrap();
        assert_eq!(v.dimensions(), 16);
    }
}
