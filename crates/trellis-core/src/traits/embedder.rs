use std::future::Future;
use std::sync::Arc;

use crate::errors::EmbeddingError;
use crate::models::EmbeddingVector;

/// Port: turn query text into a vector of the configured length.
pub trait IEmbedder: Send + Sync {
    /// Embed one non-empty text.
    fn embed(&self, text: &str) -> impl Future<Output = Result<EmbeddingVector, EmbeddingError>> + Send;

    /// Vector length D this embedder produces.
    fn dimensions(&self) -> usize;

    /// Model identifier the embedder is bound to.
    fn model_name(&self) -> &str;
}

impl<T: IEmbedder> IEmbedder for Arc<T> {
    fn embed(&self, text: &str) -> impl Future<Output = Result<EmbeddingVector, EmbeddingError>> + Send {
        (**self).embed(text)
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Synchronous model backend wrapped by an embedding engine.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
