use tracing::{debug, instrument};

use crate::constants::SIMILARITY_REPORT_DECIMALS;
use crate::embedding::EmbeddingProvider;
use crate::normalize::TextNormalizer;
use crate::scoring::{round_score, score};

use super::config::{ValidatorConfig, check_threshold};
use super::error::ValidationError;
use super::keyword::KeywordOverlap;
use super::types::{Decision, ValidationResult};

const CANDIDATE_FIELD: &str = "candidate_text";
const REFERENCE_FIELD: &str = "reference_text";

/// Decides whether a candidate answer matches a reference answer.
///
/// Generic over the provider so tests can inject a failing or deterministic one.
#[derive(Debug)]
pub struct AnswerValidator<E> {
    provider: E,
    normalizer: TextNormalizer,
    config: ValidatorConfig,
    keyword: Option<KeywordOverlap>,
}

impl<E: EmbeddingProvider> AnswerValidator<E> {
    /// Creates a validator with default settings (threshold 0.70, no fallback).
    pub fn new(provider: E) -> Self {
        Self::build(provider, ValidatorConfig::default())
    }

    /// Creates a validator, rejecting an out-of-range threshold.
    pub fn with_config(provider: E, config: ValidatorConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::build(provider, config))
    }

    fn build(provider: E, config: ValidatorConfig) -> Self {
        Self {
            provider,
            normalizer: TextNormalizer::new(config.strip_punctuation),
            keyword: config.keyword_fallback.then_some(KeywordOverlap),
            config,
        }
    }

    /// Returns the embedding provider.
    pub fn provider(&self) -> &E {
        &self.provider
    }

    /// Returns the active settings.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> f32 {
        self.config.threshold
    }

    /// Validates with the configured threshold.
    pub async fn validate(
        &self,
        candidate: &str,
        reference: &str,
    ) -> Result<ValidationResult, ValidationError> {
        self.validate_with_threshold(candidate, reference, self.config.threshold)
            .await
    }

    /// Validates with an explicit threshold in `[0, 1]`.
    #[instrument(skip(self, candidate, reference), fields(mode = self.provider.mode().as_str()))]
    pub async fn validate_with_threshold(
        &self,
        candidate: &str,
        reference: &str,
        threshold: f32,
    ) -> Result<ValidationResult, ValidationError> {
        check_threshold(threshold)?;
        require_text(candidate, CANDIDATE_FIELD)?;
        require_text(reference, REFERENCE_FIELD)?;

        let candidate = self.normalizer.normalize(candidate);
        let reference = self.normalizer.normalize(reference);
        require_text(&candidate, CANDIDATE_FIELD)?;
        require_text(&reference, REFERENCE_FIELD)?;

        let (candidate_vec, reference_vec) = tokio::try_join!(
            self.provider.encode(&candidate),
            self.provider.encode(&reference)
        )?;

        let similarity = score(&candidate_vec, &reference_vec)?;

        let decided_by = if similarity >= threshold {
            Decision::Similarity
        } else if self
            .keyword
            .is_some_and(|keyword| keyword.matches(&candidate, &reference))
        {
            Decision::KeywordOverlap
        } else {
            Decision::Rejected
        };

        let result = ValidationResult {
            is_correct: decided_by != Decision::Rejected,
            similarity: round_score(similarity, SIMILARITY_REPORT_DECIMALS),
            decided_by,
        };

        debug!(
            similarity,
            threshold,
            decided_by = decided_by.as_str(),
            "Answer validated"
        );

        Ok(result)
    }
}

fn require_text(text: &str, field: &'static str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::MissingInput { field })
    } else {
        Ok(())
    }
}
