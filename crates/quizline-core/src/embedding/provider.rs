use std::future::Future;

use tracing::{info, warn};

use crate::config::Config;

use super::error::EmbeddingError;
use super::remote::{HttpEmbedder, HttpEmbedderConfig};
use super::sentence::{SentenceConfig, SentenceEmbedder};

/// Fixed-dimension embedding produced by an [`EmbeddingProvider`].
///
/// Immutable once produced; the scorer only ever borrows the values.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// Wraps raw values.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Returns the values.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Returns the number of dimensions.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Returns the euclidean norm.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Consumes the vector and returns the values.
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// How a provider produces its vectors (reported by the readiness probe).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderMode {
    /// Deterministic hash-based vectors, no model loaded.
    Stub,
    /// Local transformer model.
    Local,
    /// Remote HTTP API.
    Remote,
}

impl EmbedderMode {
    /// Returns a short lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedderMode::Stub => "stub",
            EmbedderMode::Local => "local",
            EmbedderMode::Remote => "remote",
        }
    }
}

/// Maps text to an embedding vector.
///
/// Implementations are shared across concurrent requests and must not keep per-call state.
pub trait EmbeddingProvider: Send + Sync {
    /// Encodes one string.
    fn encode(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<EmbeddingVector, EmbeddingError>> + Send;

    /// Reports how vectors are produced.
    fn mode(&self) -> EmbedderMode;
}

impl EmbeddingProvider for SentenceEmbedder {
    async fn encode(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        self.embed(text).map(EmbeddingVector::new)
    }

    fn mode(&self) -> EmbedderMode {
        if self.is_stub() {
            EmbedderMode::Stub
        } else {
            EmbedderMode::Local
        }
    }
}

impl EmbeddingProvider for HttpEmbedder {
    async fn encode(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        self.embed(text).await.map(EmbeddingVector::new)
    }

    fn mode(&self) -> EmbedderMode {
        EmbedderMode::Remote
    }
}

/// Provider chosen at startup from configuration.
#[derive(Debug)]
pub enum Embedder {
    /// Local model or stub.
    Local(SentenceEmbedder),
    /// OpenAI-compatible HTTP API.
    Remote(HttpEmbedder),
}

impl Embedder {
    /// Picks a provider: remote URL first, then a local model directory, else the stub.
    pub fn from_config(config: &Config) -> Result<Self, EmbeddingError> {
        if let Some(url) = &config.embedding_url {
            let mut remote = HttpEmbedderConfig::new(url.as_str())
                .with_model(config.embedding_model.as_str());
            if let Some(key) = &config.embedding_api_key {
                remote = remote.with_api_key(key.as_str());
            }
            info!(url = %url, model = %config.embedding_model, "Using remote embedding provider");
            return Ok(HttpEmbedder::new(remote)?.into());
        }

        let sentence = match &config.model_path {
            Some(path) => {
                info!(path = %path.display(), "Loading local embedding model");
                SentenceConfig::new(path.clone())
            }
            None => {
                warn!("No QUIZLINE_MODEL_PATH configured, running embedder in stub mode");
                SentenceConfig::stub()
            }
        };
        Ok(SentenceEmbedder::load(sentence)?.into())
    }
}

impl EmbeddingProvider for Embedder {
    async fn encode(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        match self {
            Embedder::Local(embedder) => embedder.encode(text).await,
            Embedder::Remote(embedder) => embedder.encode(text).await,
        }
    }

    fn mode(&self) -> EmbedderMode {
        match self {
            Embedder::Local(embedder) => embedder.mode(),
            Embedder::Remote(embedder) => embedder.mode(),
        }
    }
}

impl From<SentenceEmbedder> for Embedder {
    fn from(embedder: SentenceEmbedder) -> Self {
        Embedder::Local(embedder)
    }
}

impl From<HttpEmbedder> for Embedder {
    fn from(embedder: HttpEmbedder) -> Self {
        Embedder::Remote(embedder)
    }
}
