use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use super::error::StoreError;

/// Question difficulty. Parsed case-insensitively, stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{value}': expected easy, medium or hard")]
/// Returned when a string is not a known difficulty.
pub struct DifficultyParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = DifficultyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row of the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestionRecord {
    /// Row id.
    pub id: i64,
    #[serde(rename = "question")]
    #[sqlx(rename = "question")]
    /// Question text.
    pub question_text: String,
    #[serde(rename = "answer")]
    #[sqlx(rename = "answer")]
    /// Reference answer.
    pub answer_text: String,
    #[sqlx(try_from = "String")]
    /// Difficulty bucket.
    pub difficulty: Difficulty,
    /// Subject, matched case-insensitively.
    pub subject: String,
}

/// Fields for creating or replacing a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(rename = "question", alias = "question_text")]
    /// Question text.
    pub question_text: String,
    #[serde(rename = "answer", alias = "answer_text")]
    /// Reference answer.
    pub answer_text: String,
    /// Difficulty bucket.
    pub difficulty: Difficulty,
    /// Subject.
    pub subject: String,
}

impl NewQuestion {
    /// Creates a question.
    pub fn new(
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
        difficulty: Difficulty,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            difficulty,
            subject: subject.into(),
        }
    }

    /// Rejects blank question, answer or subject.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (field, value) in [
            ("question", &self.question_text),
            ("answer", &self.answer_text),
            ("subject", &self.subject),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::invalid(format!("'{}' must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// Optional filters for listing questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionFilter {
    /// Match this subject (case-insensitive).
    pub subject: Option<String>,
    /// Match this difficulty.
    pub difficulty: Option<Difficulty>,
}

/// One validation outcome to append to the results log.
///
/// Accepts both snake_case and the camelCase keys older clients send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResult {
    #[serde(rename = "question", alias = "question_text")]
    /// Question text shown to the learner.
    pub question_text: String,
    #[serde(rename = "user_answer", alias = "userAnswer", alias = "candidate_text")]
    /// Learner's answer.
    pub candidate_text: String,
    #[serde(rename = "correct_answer", alias = "correctAnswer", alias = "reference_text")]
    /// Reference answer.
    pub reference_text: String,
    #[serde(alias = "isCorrect")]
    /// Validator decision.
    pub is_correct: bool,
    /// Reported similarity.
    pub similarity: f32,
}

impl NewResult {
    /// Rejects non-finite similarity values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !self.similarity.is_finite() {
            return Err(StoreError::invalid("'similarity' must be a finite number"));
        }
        Ok(())
    }
}

/// A stored result row. Serialized with the camelCase keys the quiz frontend reads.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PersistedResult {
    /// Row id (insertion order).
    pub id: i64,
    #[serde(rename = "question")]
    #[sqlx(rename = "question")]
    /// Question text.
    pub question_text: String,
    #[serde(rename = "userAnswer")]
    #[sqlx(rename = "user_answer")]
    /// Learner's answer.
    pub candidate_text: String,
    #[serde(rename = "correctAnswer")]
    #[sqlx(rename = "correct_answer")]
    /// Reference answer.
    pub reference_text: String,
    #[serde(rename = "isCorrect")]
    /// Validator decision.
    pub is_correct: bool,
    /// Reported similarity.
    pub similarity: f32,
    #[serde(rename = "timestamp")]
    #[sqlx(rename = "timestamp")]
    /// Insertion time (UTC, set by SQLite).
    pub created_at: NaiveDateTime,
}
