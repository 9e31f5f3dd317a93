use sqlx::sqlite::SqlitePool;
use tracing::{debug, instrument};

use super::error::StoreError;
use super::model::{NewResult, PersistedResult};

const INSERT_RESULT: &str = "INSERT INTO results (question, user_answer, correct_answer, is_correct, similarity) \
     VALUES (?, ?, ?, ?, ?)";

/// Append-only log of validation outcomes.
#[derive(Debug, Clone)]
pub struct ResultStore {
    pool: SqlitePool,
}

impl ResultStore {
    /// Wraps an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends one result and returns its id.
    pub async fn insert(&self, result: &NewResult) -> Result<i64, StoreError> {
        result.validate()?;

        let id = sqlx::query(INSERT_RESULT)
            .bind(&result.question_text)
            .bind(&result.candidate_text)
            .bind(&result.reference_text)
            .bind(result.is_correct)
            .bind(result.similarity)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    /// Appends every result in one transaction; nothing is stored if any row fails.
    #[instrument(skip_all, fields(count = results.len()))]
    pub async fn insert_batch(&self, results: &[NewResult]) -> Result<usize, StoreError> {
        for result in results {
            result.validate()?;
        }

        let mut tx = self.pool.begin().await?;
        for result in results {
            sqlx::query(INSERT_RESULT)
                .bind(&result.question_text)
                .bind(&result.candidate_text)
                .bind(&result.reference_text)
                .bind(result.is_correct)
                .bind(result.similarity)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!(count = results.len(), "Results saved");
        Ok(results.len())
    }

    /// Returns every result in insertion order.
    pub async fn list(&self) -> Result<Vec<PersistedResult>, StoreError> {
        let rows = sqlx::query_as::<_, PersistedResult>(
            "SELECT id, question, user_answer, correct_answer, is_correct, similarity, timestamp \
             FROM results ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
