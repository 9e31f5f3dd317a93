//! Answer validation: normalize, embed, score, decide.
//!
//! [`AnswerValidator`] owns its [`EmbeddingProvider`](crate::embedding::EmbeddingProvider)
//! handle and holds no per-request state, so one instance serves every request.
//!
//! The decision is `similarity >= threshold`. When [`KeywordOverlap`] is enabled the
//! decision is OR-ed with a token containment check; that heuristic can accept short
//! answers that share an incidental word with the reference, so it is off by default.

/// Validator settings.
pub mod config;
/// Validation errors.
pub mod error;
/// Keyword-overlap fallback strategy.
pub mod keyword;
/// Result types.
pub mod types;
/// The validator.
pub mod validator;


pub use config::ValidatorConfig;
pub use error::ValidationError;
pub use keyword::KeywordOverlap;
pub use types::{AnswerPair, Decision, ValidationResult};
pub use validator::AnswerValidator;
