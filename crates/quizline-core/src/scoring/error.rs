use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Errors returned by the similarity scorer.
pub enum ScoringError {
    /// A vector had zero dimensions.
    #[error("cannot score an empty vector")]
    EmptyVector,

    /// The two vectors have different lengths.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// A vector has zero norm, so cosine similarity is undefined.
    #[error("degenerate vector: zero norm (argument {position})")]
    DegenerateVector {
        /// `0` for the first argument, `1` for the second.
        position: usize,
    },
}
