use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use quizline::constants::DEFAULT_QUESTION_COUNT;
use quizline::embedding::EmbeddingProvider;
use quizline::store::{
    DifficultyCounts, NewQuestion, PersistedResult, QuestionFilter, QuestionRecord,
    select_questions,
};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    CreatedResponse, GenerateQuestionsRequest, QuestionsResponse, SaveResultsRequest,
    SaveResultsResponse, SelectQuestionsRequest, ValidateAnswerRequest, ValidateAnswerResponse,
};
use crate::gateway::state::HandlerState;

pub const BANNER: &str =
    "Backend is running! Use '/generate_questions' and '/validate_answer' endpoints.";

/// Unwraps a JSON body and decodes it, mapping both failures to 400.
pub(crate) fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, GatewayError> {
    let Json(value) =
        payload.map_err(|e| GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e)))?;
    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, GatewayError> {
    id.map(|Path(id)| id)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid question id: {}", e)))
}

pub async fn root_handler() -> &'static str {
    BANNER
}

#[instrument(skip(state, payload))]
pub async fn validate_answer_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ValidateAnswerResponse>, GatewayError> {
    let request: ValidateAnswerRequest = parse_body(payload)?;

    let result = state
        .validator
        .validate(&request.candidate_text, &request.reference_text)
        .await?;

    info!(
        is_correct = result.is_correct,
        similarity = result.similarity,
        decided_by = result.decided_by.as_str(),
        "Answer validated"
    );

    Ok(Json(ValidateAnswerResponse {
        is_correct: result.is_correct,
        similarity: result.similarity,
    }))
}

#[instrument(skip(state, payload))]
pub async fn select_questions_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, GatewayError> {
    let request: SelectQuestionsRequest = parse_body(payload)?;
    let counts = DifficultyCounts::from_signed(
        request.easy_count,
        request.medium_count,
        request.hard_count,
    )?;

    let questions = select_questions(&state.questions, &request.subject, counts).await?;

    info!(subject = %request.subject, count = questions.len(), "Questions selected");
    Ok(Json(QuestionsResponse { questions }))
}

#[instrument(skip(state, payload))]
pub async fn generate_questions_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, GatewayError> {
    let request: GenerateQuestionsRequest = parse_body(payload)?;

    let requested = request
        .num_questions
        .unwrap_or(i64::from(DEFAULT_QUESTION_COUNT));
    if requested <= 0 {
        return Err(GatewayError::InvalidRequest(
            "Invalid input for 'num_questions': must be greater than zero".to_string(),
        ));
    }
    let limit = u32::try_from(requested).unwrap_or(u32::MAX);

    let questions = state.questions.sample(limit).await?;

    info!(requested, count = questions.len(), "Questions generated");
    Ok(Json(QuestionsResponse { questions }))
}

#[instrument(skip(state, filter))]
pub async fn list_questions_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    filter: Result<Query<QuestionFilter>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, GatewayError> {
    let Query(filter) =
        filter.map_err(|e| GatewayError::InvalidRequest(format!("Invalid query: {}", e)))?;

    let questions = state.questions.list(&filter).await?;

    debug!(count = questions.len(), "Questions listed");
    Ok(Json(QuestionsResponse { questions }))
}

#[instrument(skip(state, payload))]
pub async fn create_question_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let question: NewQuestion = parse_body(payload)?;

    let id = state.questions.insert(&question).await?;

    info!(id, subject = %question.subject, "Question created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })).into_response())
}

#[instrument(skip(state, id))]
pub async fn get_question_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<QuestionRecord>, GatewayError> {
    let id = parse_id(id)?;
    Ok(Json(state.questions.get(id).await?))
}

#[instrument(skip(state, id, payload))]
pub async fn update_question_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<QuestionRecord>, GatewayError> {
    let id = parse_id(id)?;
    let question: NewQuestion = parse_body(payload)?;

    state.questions.update(id, &question).await?;

    info!(id, "Question updated");
    Ok(Json(state.questions.get(id).await?))
}

#[instrument(skip(state, id))]
pub async fn delete_question_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, GatewayError> {
    let id = parse_id(id)?;

    state.questions.delete(id).await?;

    info!(id, "Question deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, payload))]
pub async fn save_results_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SaveResultsResponse>, GatewayError> {
    let request: SaveResultsRequest = parse_body(payload)?;

    let saved = state.results.insert_batch(&request.results).await?;

    info!(saved, "Results saved");
    Ok(Json(SaveResultsResponse {
        message: "Results saved successfully!".to_string(),
        saved,
    }))
}

#[instrument(skip(state))]
pub async fn get_results_handler<E: EmbeddingProvider + 'static>(
    State(state): State<HandlerState<E>>,
) -> Result<Json<Vec<PersistedResult>>, GatewayError> {
    let results = state.results.list().await?;

    debug!(count = results.len(), "Results fetched");
    Ok(Json(results))
}
