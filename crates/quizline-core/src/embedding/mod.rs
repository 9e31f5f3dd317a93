//! Embedding providers.
//!
//! - [`EmbeddingProvider`] is the capability the validator depends on.
//! - [`sentence`] runs a local BERT-family sentence encoder (or a deterministic stub).
//! - [`remote`] calls an OpenAI-compatible `/embeddings` endpoint.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Provider trait, vector type and the runtime-selected [`Embedder`].
pub mod provider;
/// Remote HTTP embeddings.
pub mod remote;
/// Local sentence encoder.
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;


pub use error::EmbeddingError;
pub use provider::{Embedder, EmbedderMode, EmbeddingProvider, EmbeddingVector};
pub use remote::{HttpEmbedder, HttpEmbedderConfig};
pub use sentence::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig, SentenceEmbedder};
