//! Feature-hashing provider.
//!
//! Projects unigrams and adjacent-word bigrams into a fixed number of
//! buckets with a signed blake3 hash, then L2-normalizes. No model file and
//! no network: the same text always yields the same vector.

use trellis_core::errors::EmbeddingError;
use trellis_core::traits::IEmbeddingProvider;

/// Bigrams weigh less than unigrams so single strong terms dominate.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic hashing embedder.
pub struct HashingProvider {
    dimensions: usize,
    name: String,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            name: "hashing".to_string(),
        }
    }

    /// Use a custom provider name (reported as the model identifier).
    pub fn named(dimensions: usize, name: impl Into<String>) -> Self {
        Self {
            dimensions,
            name: name.into(),
        }
    }

    /// Lowercase alphanumeric terms of length >= 2.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.chars().count() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Bucket index and sign for one feature.
    fn bucket(feature: &str, dims: usize) -> (usize, f32) {
        let hash = blake3::hash(feature.as_bytes());
        let bytes = hash.as_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[..8]);
        let h = u64::from_le_bytes(word);
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        ((h % dims as u64) as usize, sign)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }
        let tokens = Self::tokenize(text);

        for tok in &tokens {
            let (idx, sign) = Self::bucket(tok, self.dimensions);
            vec[idx] += sign;
        }
        for pair in tokens.windows(2) {
            let feature = format!("{} {}", pair[0], pair[1]);
            let (idx, sign) = Self::bucket(&feature, self.dimensions);
            vec[idx] += sign * BIGRAM_WEIGHT;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn produces_configured_dimensions() {
        let p = HashingProvider::new(384);
        assert_eq!(p.embed("graph traversal engine").unwrap().len(), 384);
    }

    #[test]
    fn output_is_unit_norm() {
        let p = HashingProvider::new(256);
        let v = p.embed("semantic search over fragments").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = HashingProvider::new(128);
        assert_eq!(p.embed("same text").unwrap(), p.embed("same text").unwrap());
    }

    #[test]
    fn punctuation_only_yields_zero_vector() {
        let p = HashingProvider::new(64);
        assert!(p.embed("!? -").unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn overlapping_texts_are_closer() {
        let p = HashingProvider::new(512);
        let a = p.embed("vector similarity search").unwrap();
        let b = p.embed("vector similarity ranking").unwrap();
        let c = p.embed("sourdough bread baking").unwrap();
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[test]
    fn batch_matches_individual() {
        let p = HashingProvider::new(128);
        let texts = vec!["alpha beta".to_string(), "gamma delta".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }
}
