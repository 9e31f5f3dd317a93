//! Quizline library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-backed settings
//!
//! ## Answer Validation
//! - [`TextNormalizer`], [`normalize`] - Canonical text form
//! - [`EmbeddingProvider`], [`Embedder`], [`SentenceEmbedder`], [`HttpEmbedder`] - Text to vectors
//! - [`cosine_similarity`], [`score`], [`round_score`] - Similarity scoring
//! - [`AnswerValidator`], [`ValidationResult`], [`KeywordOverlap`] - The decision
//!
//! ## Question Bank & Results
//! - [`Database`], [`QuestionStore`], [`ResultStore`] - SQLite persistence
//! - [`select_questions`], [`DifficultyCounts`], [`QuestionSource`] - Per-difficulty selection
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod normalize;
pub mod scoring;
pub mod store;
pub mod validation;

pub use config::{Config, ConfigError};
pub use embedding::{
    Embedder, EmbedderMode, EmbeddingError, EmbeddingProvider, EmbeddingVector, HttpEmbedder,
    HttpEmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig,
    SentenceEmbedder,
};
pub use normalize::{TextNormalizer, normalize};
pub use scoring::{ScoringError, cosine_similarity, round_score, score};
#[cfg(any(test, feature = "mock"))]
pub use store::MockQuestionSource;
pub use store::{
    Database, Difficulty, DifficultyCounts, DifficultyParseError, NewQuestion, NewResult,
    PersistedResult, QuestionFilter, QuestionRecord, QuestionSource, QuestionStore, ResultStore,
    StoreError, select_questions,
};
pub use validation::{
    AnswerPair, AnswerValidator, Decision, KeywordOverlap, ValidationError, ValidationResult,
    ValidatorConfig,
};
