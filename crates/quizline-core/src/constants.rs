//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Output dimension of the default sentence-embedding model (MiniLM family).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence-embedding model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Similarity at or above which an answer counts as correct.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.70;

/// Decimal places kept when reporting a similarity score.
pub const SIMILARITY_REPORT_DECIMALS: u32 = 2;

/// Number of questions served by `/generate_questions` when none is requested.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Default SQLite location for questions and results.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://quizline.db?mode=rwc";

/// Default origin allowed by CORS (the browser frontend).
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
