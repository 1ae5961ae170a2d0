//! Cosine-similarity matching against a user's unpleasant exemplar vectors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
    /// Embeddings of different dimensionality must never be compared; a
    /// mismatch means the cache holds vectors from two different models.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Cosine similarity `dot(a, b) / (‖a‖·‖b‖)`.
/// Zero-magnitude vectors compare as 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

/// True when any exemplar is strictly above `threshold`. Short-circuits on
/// the first hit; a similarity exactly equal to the threshold does not match.
/// An empty exemplar list never matches.
pub fn is_similar(
    candidate: &[f32],
    exemplars: &[Vec<f32>],
    threshold: f32,
) -> Result<bool, SimilarityError> {
    for exemplar in exemplars {
        if cosine_similarity(candidate, exemplar)? > threshold {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_have_similarity_one() {
        let v = vec![0.3, 0.5, 0.2];
        let similarity = cosine_similarity(&v, &v).unwrap();
        assert!((similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_have_similarity_zero() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(similarity.abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_has_similarity_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let err = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_match_depends_on_threshold() {
        // cosine([0.99, 0.14], [1, 0]) ≈ 0.990
        let exemplars = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let candidate = [0.99, 0.14];
        assert!(is_similar(&candidate, &exemplars, 0.80).unwrap());
        assert!(!is_similar(&candidate, &exemplars, 0.995).unwrap());
    }

    #[test]
    fn test_threshold_is_strict() {
        // Identical vectors give exactly 1.0, which must not exceed 1.0.
        let exemplars = vec![vec![1.0, 0.0]];
        assert!(!is_similar(&[1.0, 0.0], &exemplars, 1.0).unwrap());
        // One epsilon below and the same candidate matches.
        assert!(is_similar(&[1.0, 0.0], &exemplars, 0.999_999).unwrap());
    }

    #[test]
    fn test_no_exemplars_never_matches() {
        assert!(!is_similar(&[1.0, 0.0], &[], 0.0).unwrap());
    }

    #[test]
    fn test_mismatched_exemplar_propagates_error() {
        let exemplars = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        // First exemplar matches dimensions but misses the threshold; the
        // second must error rather than be truncated.
        assert!(is_similar(&[0.0, 1.0], &exemplars, 0.9).is_err());
    }
}
