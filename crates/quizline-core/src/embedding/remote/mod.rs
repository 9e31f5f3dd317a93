//! OpenAI-compatible embeddings over HTTP.
//!
//! No timeout or retry is applied here; wrap calls if you need either.


use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::DEFAULT_EMBEDDING_MODEL;
use crate::embedding::error::EmbeddingError;

/// Settings for [`HttpEmbedder`].
#[derive(Debug, Clone)]
pub struct HttpEmbedderConfig {
    /// Base URL; `/embeddings` is appended (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
}

impl HttpEmbedderConfig {
    /// Creates a config for `base_url` using the default model.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
        }
    }

    /// Sets the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingsDatum>,
}

#[derive(Deserialize)]
struct EmbeddingsDatum {
    embedding: Vec<f32>,
}

/// Embedding provider backed by a remote `/embeddings` endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    config: HttpEmbedderConfig,
}

impl std::fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("endpoint", &self.endpoint)
            .field("model", &self.config.model)
            .field("api_key", &self.config.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpEmbedder {
    /// Builds the HTTP client.
    pub fn new(config: HttpEmbedderConfig) -> Result<Self, EmbeddingError> {
        if config.base_url.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding base_url cannot be empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            config,
        })
    }

    /// Returns the full `/embeddings` URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Requests an embedding for `text`.
    #[instrument(skip(self, text), fields(model = %self.config.model, text_len = text.len()))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingsRequest {
            model: &self.config.model,
            input: text,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ProviderUnavailable {
                reason: format!("status {}: {}", status.as_u16(), body),
            });
        }

        let parsed: EmbeddingsResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: format!("failed to parse response: {}", e),
                })?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "response contained no embeddings".to_string(),
            })?;

        if embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse {
                reason: "embedding was empty".to_string(),
            });
        }

        debug!(dim = embedding.len(), "Remote embedding received");
        Ok(embedding)
    }
}
