use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};
use tracing::warn;

use crate::error::{Result, StorageError};
use crate::models::{Star, UserSubmission, decode_slot, encode_slot};

#[derive(FromRow)]
struct SubmissionRow {
    id: i64,
    year: i32,
    user_id: i64,
    day: String,
    submission_url: String,
    language_name: String,
    modifier_permille: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl SubmissionRow {
    /// Rows whose stored slot cannot be parsed are dropped with a warning.
    fn into_submission(self) -> Option<UserSubmission> {
        let Some((day, star)) = decode_slot(&self.day) else {
            warn!(
                "Got invalid day format '{}' for submission {}",
                self.day, self.id
            );
            return None;
        };

        Some(UserSubmission {
            id: self.id,
            user_id: self.user_id,
            year: self.year,
            day,
            star,
            submission_url: self.submission_url,
            language_name: self.language_name,
            bonus_permille: self.modifier_permille,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_submissions(rows: Vec<SubmissionRow>) -> Vec<UserSubmission> {
    rows.into_iter()
        .filter_map(SubmissionRow::into_submission)
        .collect()
}

/// Fields written for a submission once it passed validation.
#[derive(Debug, Clone)]
pub struct SubmissionRecord<'r> {
    pub day: u32,
    pub star: Star,
    pub submission_url: &'r str,
    pub language_name: &'r str,
    pub bonus_permille: i64,
}

const SUBMISSION_COLUMNS: &str = "id, year, user_id, day, submission_url, language_name, \
                                  modifier_permille, created_at, updated_at";

pub struct SubmissionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<UserSubmission> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM modifier_submissions WHERE id = ?",
            SUBMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        row.into_submission().ok_or(StorageError::NotFound)
    }

    /// Submissions of one user for one year, ordered by slot
    pub async fn list_for(&self, user_id: i64, year: i32) -> Result<Vec<UserSubmission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM modifier_submissions WHERE user_id = ? AND year = ? ORDER BY day, id",
            SUBMISSION_COLUMNS
        ))
        .bind(user_id)
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(into_submissions(rows))
    }

    /// All submissions of a year, ordered by user then slot
    pub async fn list_for_year(&self, year: i32) -> Result<Vec<UserSubmission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM modifier_submissions WHERE year = ? ORDER BY user_id, day, id",
            SUBMISSION_COLUMNS
        ))
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(into_submissions(rows))
    }

    pub async fn insert(
        &self,
        user_id: i64,
        year: i32,
        record: &SubmissionRecord<'_>,
    ) -> Result<UserSubmission> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            INSERT INTO modifier_submissions
                (year, user_id, day, submission_url, language_name, modifier_permille)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(year)
        .bind(user_id)
        .bind(encode_slot(record.day, record.star))
        .bind(record.submission_url)
        .bind(record.language_name)
        .bind(record.bonus_permille)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_submission()
            .ok_or_else(|| StorageError::validation("stored submission slot is invalid"))
    }

    pub async fn update(&self, id: i64, record: &SubmissionRecord<'_>) -> Result<UserSubmission> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            UPDATE modifier_submissions
            SET day = ?,
                submission_url = ?,
                language_name = ?,
                modifier_permille = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(encode_slot(record.day, record.star))
        .bind(record.submission_url)
        .bind(record.language_name)
        .bind(record.bonus_permille)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        row.into_submission()
            .ok_or_else(|| StorageError::validation("stored submission slot is invalid"))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM modifier_submissions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}
