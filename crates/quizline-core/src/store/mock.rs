use std::sync::atomic::{AtomicUsize, Ordering};

use rand::seq::SliceRandom;

use super::error::StoreError;
use super::model::{Difficulty, QuestionRecord};
use super::selection::QuestionSource;

/// In-memory [`QuestionSource`] over a fixed list of questions.
#[derive(Debug, Default)]
pub struct MockQuestionSource {
    questions: Vec<QuestionRecord>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockQuestionSource {
    /// Creates a source over `questions`.
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Creates a source whose every read fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Adds `count` generated questions for one subject and difficulty.
    pub fn with_generated(mut self, subject: &str, difficulty: Difficulty, count: usize) -> Self {
        let start = self.questions.len() as i64;
        self.questions.extend((0..count).map(|i| {
            let id = start + i as i64 + 1;
            QuestionRecord {
                id,
                question_text: format!("{} {} question {}", subject, difficulty, id),
                answer_text: format!("answer {}", id),
                difficulty,
                subject: subject.to_string(),
            }
        }));
        self
    }

    /// Returns how many reads were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl QuestionSource for MockQuestionSource {
    async fn random_questions(
        &self,
        subject: &str,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<QuestionRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }

        let mut matching: Vec<QuestionRecord> = self
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty && q.subject.eq_ignore_ascii_case(subject))
            .cloned()
            .collect();

        matching.shuffle(&mut rand::rng());
        matching.truncate(limit as usize);
        Ok(matching)
    }
}
