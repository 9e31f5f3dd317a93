//! Cosine similarity between embedding vectors.
//!
//! The scorer is a pure function: no state, no retries, and the same inputs
//! always produce the same score.

/// Scoring errors.
pub mod error;
/// Cosine similarity and score rounding.
pub mod similarity;


pub use error::ScoringError;
pub use similarity::{cosine_similarity, round_score, score};
