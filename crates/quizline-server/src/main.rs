//! Quizline HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use quizline::config::Config;
use quizline::embedding::{Embedder, EmbeddingProvider};
use quizline::store::Database;
use quizline::validation::{AnswerValidator, ValidatorConfig};
use quizline_server::gateway::{
    HandlerState, check_liveness, cors_layer, create_router_with_state,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        threshold = config.similarity_threshold,
        keyword_fallback = config.keyword_fallback,
        "Quizline starting"
    );

    let embedder = Embedder::from_config(&config)?;
    tracing::info!(mode = embedder.mode().as_str(), "Embedding provider ready");

    let validator = AnswerValidator::with_config(embedder, ValidatorConfig::from(&config))?;

    let database = Database::connect(&config.database_url).await?;
    let questions = database.questions().count().await?;
    tracing::info!(questions, "Question bank loaded");

    let state = HandlerState::new(validator, database.clone());
    let cors = cors_layer(&config.allowed_origin)
        .with_context(|| format!("QUIZLINE_ALLOWED_ORIGIN={}", config.allowed_origin))?;
    let app = create_router_with_state(state).layer(cors);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    tracing::info!("Quizline shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("QUIZLINE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    if check_liveness(port, Duration::from_secs(1)).await {
        0
    } else {
        1
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
