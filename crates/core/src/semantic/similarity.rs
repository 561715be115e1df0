//! Vector math for retrieval
//!
//! This module provides the similarity primitives used by vector stores and
//! the retrieval engine: L2 normalization and cosine similarity over
//! fixed-length `f32` vectors.

use thiserror::Error;

/// Errors that can occur during similarity calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Vector dimensions do not match
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Computes the dot product of two equal-length vectors
///
/// Extra elements of the longer slice are ignored; callers that need a
/// length check should use [`cosine_similarity`].
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Computes the L2 norm (magnitude) of a vector
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// L2-normalizes a vector
///
/// A vector whose norm is exactly zero is returned unchanged, avoiding a
/// division by zero.
///
/// # Examples
///
/// ```
/// use chunkwise_core::semantic::similarity::{magnitude, normalize};
///
/// let v = normalize(&[3.0, 4.0]);
/// assert!((magnitude(&v) - 1.0).abs() < 1e-6);
///
/// let zero = normalize(&[0.0, 0.0]);
/// assert_eq!(zero, vec![0.0, 0.0]);
/// ```
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = magnitude(v);
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}

/// Calculates the cosine similarity between two vectors
///
/// Cosine similarity measures the cosine of the angle between two vectors,
/// ranging from -1 (opposite) to 1 (identical). A value of 0 indicates
/// orthogonal vectors.
///
/// # Errors
///
/// Returns `SimilarityError::DimensionMismatch` if vectors have different dimensions.
///
/// If either vector has zero magnitude the similarity is `0.0` rather than NaN.
///
/// # Examples
///
/// ```
/// use chunkwise_core::semantic::similarity::cosine_similarity;
///
/// let a = vec![1.0, 0.0, 0.0];
/// let b = vec![1.0, 0.0, 0.0];
/// let similarity = cosine_similarity(&a, &b).unwrap();
/// assert!((similarity - 1.0).abs() < 0.0001);
///
/// assert!(cosine_similarity(&[1.0, 2.0], &[1.0]).is_err());
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product(a, b) / (magnitude_a * magnitude_b))
}
