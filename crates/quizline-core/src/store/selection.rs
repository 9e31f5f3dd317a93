use std::future::Future;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::StoreError;
use super::model::{Difficulty, QuestionRecord};

/// Random reads by subject and difficulty.
///
/// Implemented by [`QuestionStore`](super::QuestionStore); the selection logic only
/// needs this one query.
pub trait QuestionSource: Send + Sync {
    /// Returns up to `limit` distinct questions matching `subject` and `difficulty`,
    /// in random order.
    fn random_questions(
        &self,
        subject: &str,
        difficulty: Difficulty,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<QuestionRecord>, StoreError>> + Send;
}

/// Requested question count per difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCounts {
    /// Easy questions.
    pub easy: u32,
    /// Medium questions.
    pub medium: u32,
    /// Hard questions.
    pub hard: u32,
}

impl DifficultyCounts {
    /// Creates counts.
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    /// Converts signed counts, rejecting negatives and values above `u32::MAX`.
    pub fn from_signed(easy: i64, medium: i64, hard: i64) -> Result<Self, StoreError> {
        let convert = |value: i64, difficulty: Difficulty| {
            u32::try_from(value).map_err(|_| {
                StoreError::invalid(format!(
                    "'{}_count' must be between 0 and {}, got {}",
                    difficulty,
                    u32::MAX,
                    value
                ))
            })
        };

        Ok(Self {
            easy: convert(easy, Difficulty::Easy)?,
            medium: convert(medium, Difficulty::Medium)?,
            hard: convert(hard, Difficulty::Hard)?,
        })
    }

    /// Returns the count for one difficulty.
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Returns the total requested.
    pub fn total(&self) -> u64 {
        Difficulty::ALL
            .iter()
            .map(|d| u64::from(self.get(*d)))
            .sum()
    }

    /// Iterates over the non-zero buckets, easiest first.
    pub fn requested(&self) -> impl Iterator<Item = (Difficulty, u32)> + '_ {
        Difficulty::ALL
            .into_iter()
            .map(|d| (d, self.get(d)))
            .filter(|(_, count)| *count > 0)
    }
}

/// Draws `counts` questions for `subject`, then shuffles the combined set.
///
/// Fails with [`StoreError::InsufficientQuestions`] naming the first short bucket; no
/// questions are returned in that case.
pub async fn select_questions<S: QuestionSource>(
    source: &S,
    subject: &str,
    counts: DifficultyCounts,
) -> Result<Vec<QuestionRecord>, StoreError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(StoreError::invalid("'subject' must not be empty"));
    }
    if counts.total() == 0 {
        return Err(StoreError::invalid(
            "at least one of easy_count, medium_count, hard_count must be positive",
        ));
    }

    let mut selected = Vec::with_capacity(counts.total().min(1024) as usize);

    for (difficulty, requested) in counts.requested() {
        let batch = source
            .random_questions(subject, difficulty, requested)
            .await?;

        let available = u32::try_from(batch.len()).unwrap_or(u32::MAX);
        if available < requested {
            warn!(
                subject,
                difficulty = %difficulty,
                requested,
                available,
                "Not enough questions for selection"
            );
            return Err(StoreError::InsufficientQuestions {
                subject: subject.to_string(),
                difficulty,
                requested,
                available,
            });
        }

        selected.extend(batch.into_iter().take(requested as usize));
    }

    selected.shuffle(&mut rand::rng());

    debug!(subject, count = selected.len(), "Questions selected");
    Ok(selected)
}
