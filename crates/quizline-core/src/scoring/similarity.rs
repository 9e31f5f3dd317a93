use crate::embedding::EmbeddingVector;

use super::error::ScoringError;

/// Cosine similarity of two raw vectors, clamped to `[-1, 1]`.
///
/// Accumulates in `f64` so long vectors of small components keep their precision.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(ScoringError::EmptyVector);
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 {
        return Err(ScoringError::DegenerateVector { position: 0 });
    }
    if norm_b == 0.0 {
        return Err(ScoringError::DegenerateVector { position: 1 });
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Cosine similarity of two embeddings.
pub fn score(a: &EmbeddingVector, b: &EmbeddingVector) -> Result<f32, ScoringError> {
    cosine_similarity(a.as_slice(), b.as_slice())
}

/// Rounds a score to `decimals` places for reporting (half away from zero).
pub fn round_score(value: f32, decimals: u32) -> f32 {
    let factor = 10f64.powi(decimals as i32);
    ((f64::from(value) * factor).round() / factor) as f32
}
