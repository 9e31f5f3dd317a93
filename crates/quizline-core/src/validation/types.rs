use serde::{Deserialize, Serialize};

/// Candidate answer paired with its reference. Created per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPair {
    /// The learner's answer.
    pub candidate_text: String,
    /// The expected answer.
    pub reference_text: String,
}

impl AnswerPair {
    /// Creates a pair.
    pub fn new(candidate_text: impl Into<String>, reference_text: impl Into<String>) -> Self {
        Self {
            candidate_text: candidate_text.into(),
            reference_text: reference_text.into(),
        }
    }
}

/// What decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Similarity met the threshold.
    Similarity,
    /// Similarity fell short but the keyword fallback matched.
    KeywordOverlap,
    /// Neither check passed.
    Rejected,
}

impl Decision {
    /// Returns a short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Similarity => "similarity",
            Decision::KeywordOverlap => "keyword_overlap",
            Decision::Rejected => "rejected",
        }
    }
}

/// Outcome of validating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the answer is accepted.
    pub is_correct: bool,
    /// Cosine similarity rounded to two decimals.
    pub similarity: f32,
    /// What decided `is_correct`.
    pub decided_by: Decision,
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.is_correct { "CORRECT" } else { "INCORRECT" };
        write!(
            f,
            "{} (similarity: {:.2}, by: {})",
            verdict,
            self.similarity,
            self.decided_by.as_str()
        )
    }
}
