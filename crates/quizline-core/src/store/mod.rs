//! SQLite-backed question bank and results log.
//!
//! [`Database`] owns the connection pool and runs migrations; [`QuestionStore`] and
//! [`ResultStore`] are cheap handles over the same pool. Each statement commits on its
//! own, except [`ResultStore::insert_batch`], which commits a whole batch at once.
//!
//! [`select_questions`] draws a per-difficulty random set from any [`QuestionSource`]
//! and fails the whole request if one bucket is short.

/// Pool and migrations.
pub mod db;
/// Store errors.
pub mod error;
/// Records and request types.
pub mod model;
/// Question bank CRUD and random reads.
pub mod questions;
/// Validation results log.
pub mod results;
/// Per-difficulty question selection.
pub mod selection;

#[cfg(any(test, feature = "mock"))]
/// In-memory question source for tests.
pub mod mock;

#[cfg(test)]
mod tests;

pub use db::Database;
pub use error::StoreError;
pub use model::{
    Difficulty, DifficultyParseError, NewQuestion, NewResult, PersistedResult, QuestionFilter,
    QuestionRecord,
};
pub use questions::QuestionStore;
pub use results::ResultStore;
pub use selection::{DifficultyCounts, QuestionSource, select_questions};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockQuestionSource;
