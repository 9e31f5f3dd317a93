use sqlx::sqlite::SqlitePool;
use tracing::{debug, instrument};

use super::error::StoreError;
use super::model::{Difficulty, NewQuestion, QuestionFilter, QuestionRecord};
use super::selection::QuestionSource;

const SELECT_COLUMNS: &str = "SELECT id, question, answer, difficulty, subject FROM questions";

/// CRUD and random reads over the `questions` table.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    pool: SqlitePool,
}

impl QuestionStore {
    /// Wraps an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a question and returns its id.
    pub async fn insert(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        question.validate()?;

        let result = sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, subject) VALUES (?, ?, ?, ?)",
        )
        .bind(question.question_text.trim())
        .bind(question.answer_text.trim())
        .bind(question.difficulty.as_str())
        .bind(question.subject.trim())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, subject = %question.subject, difficulty = %question.difficulty, "Question inserted");
        Ok(id)
    }

    /// Fetches one question.
    pub async fn get(&self, id: i64) -> Result<QuestionRecord, StoreError> {
        sqlx::query_as::<_, QuestionRecord>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    /// Replaces every field of an existing question.
    pub async fn update(&self, id: i64, question: &NewQuestion) -> Result<(), StoreError> {
        question.validate()?;

        let result = sqlx::query(
            "UPDATE questions SET question = ?, answer = ?, difficulty = ?, subject = ? WHERE id = ?",
        )
        .bind(question.question_text.trim())
        .bind(question.answer_text.trim())
        .bind(question.difficulty.as_str())
        .bind(question.subject.trim())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "Question updated");
        Ok(())
    }

    /// Deletes a question.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "Question deleted");
        Ok(())
    }

    /// Lists questions in id order, optionally filtered.
    pub async fn list(&self, filter: &QuestionFilter) -> Result<Vec<QuestionRecord>, StoreError> {
        let subject = filter.subject.as_deref().map(str::trim);
        let difficulty = filter.difficulty.map(|d| d.as_str());

        let rows = sqlx::query_as::<_, QuestionRecord>(&format!(
            "{} WHERE (?1 IS NULL OR subject = ?1 COLLATE NOCASE) \
             AND (?2 IS NULL OR difficulty = ?2 COLLATE NOCASE) ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(subject)
        .bind(difficulty)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns up to `limit` random questions for one subject and difficulty.
    #[instrument(skip(self), level = "debug")]
    pub async fn random(
        &self,
        subject: &str,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<QuestionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRecord>(&format!(
            "{} WHERE subject = ? COLLATE NOCASE AND difficulty = ? COLLATE NOCASE \
             ORDER BY RANDOM() LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(subject.trim())
        .bind(difficulty.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns up to `limit` random questions from the whole bank.
    pub async fn sample(&self, limit: u32) -> Result<Vec<QuestionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRecord>(&format!(
            "{} ORDER BY RANDOM() LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts every question in the bank.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}

impl QuestionSource for QuestionStore {
    async fn random_questions(
        &self,
        subject: &str,
        difficulty: Difficulty,
        limit: u32,
    ) -> Result<Vec<QuestionRecord>, StoreError> {
        self.random(subject, difficulty, limit).await
    }
}
