use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{Result, StorageError};
use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by Advent of Code id
    pub async fn find_by_id(&self, user_id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT aoc_id, name, github_id, avatar_url
            FROM aoc_users
            WHERE aoc_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Find the user linked to a GitHub account, if any
    pub async fn find_by_github_id(&self, github_id: i64) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_github_id_on(&mut conn, github_id).await
    }

    async fn find_by_github_id_on(
        conn: &mut SqliteConnection,
        github_id: i64,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT aoc_id, name, github_id, avatar_url
            FROM aoc_users
            WHERE github_id = ?
            "#,
        )
        .bind(github_id)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Pair a GitHub account with a leaderboard member.
    ///
    /// Links are one-to-one: the GitHub id must not be linked yet and the
    /// member must not already carry another GitHub id.
    pub async fn link_github(
        &self,
        github_id: i64,
        avatar_url: &str,
        user_id: i64,
    ) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        if Self::find_by_github_id_on(&mut tx, github_id).await?.is_some() {
            return Err(StorageError::AlreadyLinked);
        }

        let existing_link = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT github_id FROM aoc_users WHERE aoc_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if existing_link.is_some() {
            return Err(StorageError::AlreadyLinked);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE aoc_users
            SET github_id = ?, avatar_url = ?
            WHERE aoc_id = ?
            RETURNING aoc_id, name, github_id, avatar_url
            "#,
        )
        .bind(github_id)
        .bind(avatar_url)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::AlreadyLinked
            } else {
                e
            }
        })?;

        tx.commit().await?;

        Ok(user)
    }

    /// Insert a member on first sighting, otherwise refresh their display name.
    /// GitHub link columns are left untouched.
    pub(crate) async fn upsert_member(
        conn: &mut SqliteConnection,
        user_id: i64,
        name: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO aoc_users (aoc_id, name)
            VALUES (?, ?)
            ON CONFLICT (aoc_id) DO UPDATE SET name = excluded.name
            "#,
        )
        .bind(user_id)
        .bind(name)
        .execute(conn)
        .await?;

        Ok(())
    }
}
