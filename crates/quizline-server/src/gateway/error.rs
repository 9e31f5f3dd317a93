use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use quizline::store::StoreError;
use quizline::validation::ValidationError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InsufficientQuestions(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    ProviderUnavailable(String),

    #[error("scoring failed: {0}")]
    ScoringFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::InsufficientQuestions(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::ProviderUnavailable(_)
            | GatewayError::ScoringFailed(_)
            | GatewayError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the caller. Storage and provider causes stay in the logs.
    fn public_message(&self) -> String {
        match self {
            GatewayError::StorageError(_) => "storage error".to_string(),
            GatewayError::ProviderUnavailable(_) => "embedding provider unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingInput { .. } | ValidationError::InvalidThreshold { .. } => {
                GatewayError::InvalidRequest(err.to_string())
            }
            ValidationError::ProviderUnavailable(inner) => {
                error!(error = %inner, "Embedding provider failed");
                GatewayError::ProviderUnavailable(inner.to_string())
            }
            ValidationError::Scoring(inner) => {
                error!(error = %inner, "Similarity scoring failed");
                GatewayError::ScoringFailed(inner.to_string())
            }
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput { reason } => GatewayError::InvalidRequest(reason),
            StoreError::NotFound { .. } => GatewayError::NotFound(err.to_string()),
            StoreError::InsufficientQuestions { .. } => {
                GatewayError::InsufficientQuestions(err.to_string())
            }
            StoreError::Database(inner) => {
                error!(error = %inner, "Database operation failed");
                GatewayError::StorageError(inner.to_string())
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.public_message(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
