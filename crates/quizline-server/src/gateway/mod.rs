//! HTTP gateway (Axum) for answer validation, question selection and results.
//!
//! This module is primarily used by the `quizline` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    routing::post,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

pub use error::GatewayError;
pub use handler::{
    create_question_handler, delete_question_handler, generate_questions_handler,
    get_question_handler, get_results_handler, list_questions_handler, root_handler,
    save_results_handler, select_questions_handler, update_question_handler,
    validate_answer_handler,
};
pub use state::HandlerState;

use quizline::embedding::EmbeddingProvider;

pub const STATUS_READY: &str = "ready";
pub const STATUS_ERROR: &str = "error";

pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: EmbeddingProvider + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E>))
        .route("/validate_answer", post(validate_answer_handler::<E>))
        .route("/select_questions", post(select_questions_handler::<E>))
        .route("/generate_questions", post(generate_questions_handler::<E>))
        .route(
            "/questions",
            get(list_questions_handler::<E>).post(create_question_handler::<E>),
        )
        .route(
            "/questions/{id}",
            get(get_question_handler::<E>)
                .put(update_question_handler::<E>)
                .delete(delete_question_handler::<E>),
        )
        .route("/save_results", post(save_results_handler::<E>))
        .route("/get_results", get(get_results_handler::<E>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser frontend at `origin`.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub database: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

/// GETs `/healthz` on the loopback `port`. True only for a 2xx answer within `timeout`.
pub async fn check_liveness(port: u16, timeout: Duration) -> bool {
    let url = format!("http://127.0.0.1:{}/healthz", port);
    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(_) => return false,
    };

    match client.get(&url).send().await {
        Ok(res) => res.status().is_success(),
        Err(e) => {
            debug!(error = %e, url = %url, "Liveness check failed");
            false
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: EmbeddingProvider + 'static,
{
    let database_status = match state.database.ping().await {
        Ok(()) => STATUS_READY,
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            STATUS_ERROR
        }
    };

    let components = ComponentStatus {
        http: STATUS_READY,
        database: database_status,
        embedder_mode: state.validator.provider().mode().as_str(),
    };

    let is_ready = components.database == STATUS_READY;
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    (
        status_code,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
