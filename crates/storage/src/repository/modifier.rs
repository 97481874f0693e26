use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::SubmissionModifier;

pub struct ModifierRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ModifierRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the catalog, highest bonus first, ties by language name
    pub async fn list(&self) -> Result<Vec<SubmissionModifier>> {
        let modifiers = sqlx::query_as::<_, SubmissionModifier>(
            r#"
            SELECT language_name, modifier_permille
            FROM modifiers
            ORDER BY modifier_permille DESC, language_name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(modifiers)
    }

    pub async fn find_by_language(&self, language_name: &str) -> Result<Option<SubmissionModifier>> {
        let modifier = sqlx::query_as::<_, SubmissionModifier>(
            r#"
            SELECT language_name, modifier_permille
            FROM modifiers
            WHERE language_name = ?
            "#,
        )
        .bind(language_name)
        .fetch_optional(self.pool)
        .await?;

        Ok(modifier)
    }

    /// Insert or replace catalog entries in one transaction.
    pub async fn upsert_many(&self, modifiers: &[SubmissionModifier]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for modifier in modifiers {
            let result = sqlx::query(
                r#"
                INSERT INTO modifiers (language_name, modifier_permille)
                VALUES (?, ?)
                ON CONFLICT (language_name)
                DO UPDATE SET modifier_permille = excluded.modifier_permille
                "#,
            )
            .bind(&modifier.language_name)
            .bind(modifier.bonus_permille)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;

        Ok(written)
    }

    pub async fn delete(&self, language_name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM modifiers WHERE language_name = ?")
            .bind(language_name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
