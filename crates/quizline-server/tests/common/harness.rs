//! Test server harness.

use std::net::SocketAddr;

use quizline::embedding::SentenceEmbedder;
use quizline::store::{Database, Difficulty, NewQuestion};
use quizline::validation::{AnswerValidator, ValidatorConfig};
use quizline_server::gateway::{HandlerState, create_router_with_state};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const TEST_DATABASE_FILE: &str = "quizline_test.db";

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub threshold: f32,
    pub keyword_fallback: bool,
    pub seed_questions: Vec<NewQuestion>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            threshold: 0.70,
            keyword_fallback: false,
            seed_questions: Vec::new(),
        }
    }
}

impl TestServerConfig {
    pub fn with_keyword_fallback(mut self) -> Self {
        self.keyword_fallback = true;
        self
    }

    /// Seeds `count` generated questions for one subject and difficulty.
    pub fn with_questions(mut self, subject: &str, difficulty: Difficulty, count: usize) -> Self {
        let start = self.seed_questions.len();
        self.seed_questions.extend((start..start + count).map(|i| {
            NewQuestion::new(
                format!("{} {} question {}", subject, difficulty, i),
                format!("answer {}", i),
                difficulty,
                subject,
            )
        }));
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub database: Database,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.database.close().await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server backed by the stub embedder and a fresh SQLite file in a temp dir.
///
/// The listener is bound before the server task starts, so requests can be sent as
/// soon as this returns.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let temp_dir = TempDir::new()?;
    let url = format!(
        "sqlite://{}",
        temp_dir.path().join(TEST_DATABASE_FILE).display()
    );
    let database = Database::connect(&url)
        .await
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let questions = database.questions();
    for question in &config.seed_questions {
        questions
            .insert(question)
            .await
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    }

    let embedder =
        SentenceEmbedder::stub().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let validator_config = ValidatorConfig::default()
        .with_threshold(config.threshold)
        .with_keyword_fallback(config.keyword_fallback);
    let validator = AnswerValidator::with_config(embedder, validator_config)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let app = create_router_with_state(HandlerState::new(validator, database.clone()));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    Ok(TestServer {
        addr: local_addr,
        database,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _temp_dir: temp_dir,
    })
}
