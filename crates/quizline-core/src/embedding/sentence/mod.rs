//! Local sentence encoder (BERT + tokenizer) with a deterministic stub mode.
//!
//! Use [`SentenceConfig::stub`] for tests and development without model files.

/// Sentence encoder configuration.
pub mod config;
pub(crate) mod model;


pub use config::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig};

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer_with_truncation;

use model::MeanPooledBert;

enum EncoderBackend {
    Model {
        model: MeanPooledBert,
        tokenizer: tokenizers::Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedding generator (supports stub mode).
pub struct SentenceEmbedder {
    backend: EncoderBackend,
    config: SentenceConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: SentenceConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        let model = MeanPooledBert::load(&config.config_path(), &config.weights_path(), &device)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&config.model_dir, config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            model_dir = %config.model_dir.display(),
            hidden_size = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    /// Shorthand for `load(SentenceConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(SentenceConfig::stub())
    }

    /// Generates a unit-length embedding for a single string.
    ///
    /// Empty input yields a zero vector.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Generates embeddings for a batch of strings.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &MeanPooledBert,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Ok(vec![0.0; model.hidden_size()]);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating sentence embedding"
        );

        let input_ids = Tensor::new(tokens, device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model
            .forward(&input_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;
        Ok(l2_normalize(embedding))
    }

    /// Bag-of-tokens stub: each whitespace token seeds a pseudo-random direction via
    /// blake3's XOF and the directions are summed. Identical texts map to identical
    /// vectors; texts without shared tokens are nearly orthogonal.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut embedding = vec![0.0f32; dim];
        let mut bytes = vec![0u8; dim * 4];

        for token in text.split_whitespace() {
            let mut hasher = blake3::Hasher::new();
            hasher.update(token.as_bytes());
            hasher.finalize_xof().fill(&mut bytes);

            for (slot, chunk) in embedding.iter_mut().zip(bytes.chunks_exact(4)) {
                let raw = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                *slot += (raw as f32 / u32::MAX as f32) * 2.0 - 1.0;
            }
        }

        l2_normalize(embedding)
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Stub => self.config.embedding_dim,
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }
}

fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
