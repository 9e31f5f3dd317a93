use crate::config::Config;
use crate::constants::DEFAULT_SIMILARITY_THRESHOLD;

use super::error::ValidationError;

/// Settings for [`AnswerValidator`](super::AnswerValidator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorConfig {
    /// Similarity at or above which an answer is correct.
    pub threshold: f32,
    /// OR the decision with [`KeywordOverlap`](super::KeywordOverlap).
    pub keyword_fallback: bool,
    /// Strip punctuation during normalization.
    pub strip_punctuation: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            keyword_fallback: false,
            strip_punctuation: true,
        }
    }
}

impl ValidatorConfig {
    /// Sets the threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enables or disables the keyword fallback.
    pub fn with_keyword_fallback(mut self, enabled: bool) -> Self {
        self.keyword_fallback = enabled;
        self
    }

    /// Enables or disables punctuation stripping.
    pub fn with_strip_punctuation(mut self, enabled: bool) -> Self {
        self.strip_punctuation = enabled;
        self
    }

    /// Rejects thresholds outside `[0, 1]` (including NaN).
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_threshold(self.threshold)
    }
}

impl From<&Config> for ValidatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            threshold: config.similarity_threshold,
            keyword_fallback: config.keyword_fallback,
            strip_punctuation: config.strip_punctuation,
        }
    }
}

pub(crate) fn check_threshold(threshold: f32) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ValidationError::InvalidThreshold { threshold })
    }
}
