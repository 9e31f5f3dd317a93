use thiserror::Error;

use super::model::{Difficulty, DifficultyParseError};

#[derive(Debug, Error)]
/// Errors returned by the question and result stores.
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No row with this id.
    #[error("question {id} not found")]
    NotFound {
        /// Requested id.
        id: i64,
    },

    /// Rejected input (empty fields, bad counts, unknown difficulty).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },

    /// A difficulty bucket holds fewer questions than requested.
    #[error(
        "insufficient questions for subject '{subject}' at difficulty '{difficulty}': requested {requested}, available {available}"
    )]
    InsufficientQuestions {
        /// Requested subject.
        subject: String,
        /// Short bucket.
        difficulty: Difficulty,
        /// Requested count.
        requested: u32,
        /// Matching rows.
        available: u32,
    },
}

impl StoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidInput { .. } | StoreError::InsufficientQuestions { .. }
        )
    }
}

impl From<DifficultyParseError> for StoreError {
    fn from(err: DifficultyParseError) -> Self {
        StoreError::invalid(err.to_string())
    }
}
