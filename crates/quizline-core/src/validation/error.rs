use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
/// Errors returned by answer validation.
pub enum ValidationError {
    /// Candidate or reference was empty (before or after normalization).
    #[error("missing input: '{field}' must be a non-empty answer")]
    MissingInput {
        /// Name of the empty field.
        field: &'static str,
    },

    /// Threshold outside `[0, 1]`.
    #[error("invalid threshold {threshold}: must be between 0.0 and 1.0")]
    InvalidThreshold {
        /// The rejected value.
        threshold: f32,
    },

    /// The embedding provider failed.
    #[error(transparent)]
    ProviderUnavailable(#[from] EmbeddingError),

    /// The embeddings could not be compared.
    #[error("similarity scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

impl ValidationError {
    /// Returns `true` for errors caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ValidationError::MissingInput { .. } | ValidationError::InvalidThreshold { .. }
        )
    }
}
