//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `QUIZLINE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_ALLOWED_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_SIMILARITY_THRESHOLD};

/// Default model name sent to a remote embeddings endpoint.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QUIZLINE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// SQLite connection URL for the question bank and results.
    pub database_url: String,

    /// Directory holding the sentence-embedding model (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). Unset runs the stub embedder.
    pub model_path: Option<PathBuf>,

    /// Base URL of an OpenAI-compatible embeddings API. Takes precedence over `model_path`.
    pub embedding_url: Option<String>,

    /// Model name sent to the remote embeddings API.
    pub embedding_model: String,

    /// Bearer token for the remote embeddings API.
    pub embedding_api_key: Option<String>,

    /// Similarity at or above which an answer is correct. Default: `0.70`.
    pub similarity_threshold: f32,

    /// OR the similarity decision with keyword overlap. Default: `false`.
    pub keyword_fallback: bool,

    /// Strip punctuation during normalization. Default: `true`.
    pub strip_punctuation: bool,

    /// Origin allowed by CORS. Default: `http://localhost:3000`.
    pub allowed_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            model_path: None,
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            keyword_fallback: false,
            strip_punctuation: true,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "QUIZLINE_PORT";
    const ENV_BIND_ADDR: &'static str = "QUIZLINE_BIND_ADDR";
    const ENV_DATABASE_URL: &'static str = "QUIZLINE_DATABASE_URL";
    const ENV_MODEL_PATH: &'static str = "QUIZLINE_MODEL_PATH";
    const ENV_EMBEDDING_URL: &'static str = "QUIZLINE_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "QUIZLINE_EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "QUIZLINE_EMBEDDING_API_KEY";
    const ENV_THRESHOLD: &'static str = "QUIZLINE_SIMILARITY_THRESHOLD";
    const ENV_KEYWORD_FALLBACK: &'static str = "QUIZLINE_KEYWORD_FALLBACK";
    const ENV_STRIP_PUNCTUATION: &'static str = "QUIZLINE_STRIP_PUNCTUATION";
    const ENV_ALLOWED_ORIGIN: &'static str = "QUIZLINE_ALLOWED_ORIGIN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let database_url =
            Self::parse_string_from_env(Self::ENV_DATABASE_URL, defaults.database_url);
        let model_path = Self::parse_optional_string_from_env(Self::ENV_MODEL_PATH).map(PathBuf::from);
        let embedding_url = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_URL);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let similarity_threshold = Self::parse_threshold_from_env(defaults.similarity_threshold)?;
        let keyword_fallback =
            Self::parse_bool_from_env(Self::ENV_KEYWORD_FALLBACK, defaults.keyword_fallback)?;
        let strip_punctuation =
            Self::parse_bool_from_env(Self::ENV_STRIP_PUNCTUATION, defaults.strip_punctuation)?;
        let allowed_origin =
            Self::parse_string_from_env(Self::ENV_ALLOWED_ORIGIN, defaults.allowed_origin);

        Ok(Self {
            port,
            bind_addr,
            database_url,
            model_path,
            embedding_url,
            embedding_model,
            embedding_api_key,
            similarity_threshold,
            keyword_fallback,
            strip_punctuation,
            allowed_origin,
        })
    }

    /// Validates paths and basic invariants (does not touch the database).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold.to_string(),
            });
        }

        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_DATABASE_URL,
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                "" => Ok(default),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }
}
