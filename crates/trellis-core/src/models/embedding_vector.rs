use serde::{Deserialize, Serialize};

use crate::errors::AggregationError;

/// Fixed-length numeric representation of a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector {
    values: Vec<f32>,
}

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Construct a vector and check its length against the configured D.
    pub fn with_dimensions(values: Vec<f32>, expected: usize) -> Result<Self, AggregationError> {
        let vector = Self::new(values);
        vector.ensure_dimensions(expected)?;
        Ok(vector)
    }

    /// Mismatched lengths are a defect, never truncated or padded.
    pub fn ensure_dimensions(&self, expected: usize) -> Result<(), AggregationError> {
        if self.values.len() != expected {
            return Err(AggregationError::DimensionMismatch {
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.values
    }

    /// Euclidean norm, accumulated in f64.
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|x| (*x as f64) * (*x as f64))
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|x| *x == 0.0)
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}
