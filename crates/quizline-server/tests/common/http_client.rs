//! HTTP client helpers for tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn into_result(resp: reqwest::Response) -> Result<Value, TestClientError> {
        match resp.status().as_u16() {
            200 | 201 => Ok(resp.json().await?),
            204 => Ok(Value::Null),
            400 => Err(TestClientError::BadRequest(resp.json().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, TestClientError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::into_result(resp).await
    }

    pub async fn get(&self, path: &str) -> Result<Value, TestClientError> {
        let resp = self.client.get(self.url(path)).send().await?;
        Self::into_result(resp).await
    }

    pub async fn banner(&self) -> Result<String, TestClientError> {
        Ok(self.client.get(self.url("/")).send().await?.text().await?)
    }

    pub async fn validate_answer(
        &self,
        user_answer: &str,
        correct_answer: &str,
    ) -> Result<ValidateAnswerResponse, TestClientError> {
        let body = serde_json::json!({
            "user_answer": user_answer,
            "correct_answer": correct_answer,
        });
        Ok(serde_json::from_value(self.post("/validate_answer", &body).await?)?)
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        Ok(serde_json::from_value(self.get("/healthz").await?)?)
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        Ok(serde_json::from_value(self.get("/ready").await?)?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidateAnswerResponse {
    pub is_correct: bool,
    pub similarity: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub database: String,
    pub embedder_mode: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to decode body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(Value),
}
