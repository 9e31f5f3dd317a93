use serde::{Deserialize, Serialize};

use quizline::store::{NewResult, QuestionRecord};

/// Accepts the legacy `user_answer` / `correct_answer` keys as aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateAnswerRequest {
    #[serde(default, alias = "user_answer")]
    pub candidate_text: String,
    #[serde(default, alias = "correct_answer")]
    pub reference_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateAnswerResponse {
    pub is_correct: bool,
    pub similarity: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectQuestionsRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub easy_count: i64,
    #[serde(default)]
    pub medium_count: i64,
    #[serde(default)]
    pub hard_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub num_questions: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveResultsRequest {
    #[serde(default)]
    pub results: Vec<NewResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResultsResponse {
    pub message: String,
    pub saved: usize,
}
