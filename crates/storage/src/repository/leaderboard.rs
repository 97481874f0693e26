use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::Result;
use crate::models::{CompletionSet, LeaderboardEntry, LeaderboardRow, LeaderboardSnapshot};
use crate::repository::submission::SubmissionRepository;
use crate::repository::user::UserRepository;

#[derive(FromRow)]
struct EntryRow {
    year: i32,
    user_id: i64,
    name: Option<String>,
    score: i64,
    day_completions: String,
    fetched_at: NaiveDateTime,
}

pub struct LeaderboardRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Merge a fetched snapshot into storage.
    ///
    /// Members are created on first sighting and renamed when their display
    /// name changed. Each `(year, user)` row is replaced with the current
    /// score and completions. The whole snapshot is written in a single
    /// transaction; any failure leaves the stored leaderboard untouched.
    ///
    /// `fetched_at` always moves to the time of this call, so storing the
    /// same snapshot twice only differs in that column.
    pub async fn upsert_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<Vec<LeaderboardRow>> {
        let mut tx = self.pool.begin().await?;
        let fetched_at = Utc::now().naive_utc();
        let mut stored = Vec::with_capacity(snapshot.members.len());

        for member in &snapshot.members {
            UserRepository::upsert_member(&mut tx, member.user_id, &member.name).await?;

            let encoded = member.completions.encode();
            debug!(
                "Storing {} for {}: score {}, completions '{}'",
                member.user_id, snapshot.year, member.local_score, encoded
            );

            sqlx::query(
                r#"
                INSERT INTO leaderboard_entries (year, user_id, score, day_completions, fetched_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT (year, user_id)
                DO UPDATE SET
                    score = excluded.score,
                    day_completions = excluded.day_completions,
                    fetched_at = excluded.fetched_at
                "#,
            )
            .bind(snapshot.year)
            .bind(member.user_id)
            .bind(member.local_score)
            .bind(&encoded)
            .bind(fetched_at)
            .execute(&mut *tx)
            .await?;

            stored.push(LeaderboardRow {
                year: snapshot.year,
                user_id: member.user_id,
                score: member.local_score,
                completions: member.completions.clone(),
                fetched_at,
            });
        }

        tx.commit().await?;

        Ok(stored)
    }

    /// Stored rows for a year without names or submissions
    pub async fn list_rows(&self, year: i32) -> Result<Vec<LeaderboardRow>> {
        let rows = self.fetch_entry_rows(year).await?;

        Ok(rows
            .into_iter()
            .map(|row| LeaderboardRow {
                year: row.year,
                user_id: row.user_id,
                score: row.score,
                completions: CompletionSet::decode(&row.day_completions),
                fetched_at: row.fetched_at,
            })
            .collect())
    }

    /// Load every entry of a year, with display names and the members'
    /// submissions attached so adjusted scores can be computed.
    pub async fn get_snapshot(&self, year: i32) -> Result<BTreeMap<i64, LeaderboardEntry>> {
        let rows = self.fetch_entry_rows(year).await?;

        let mut submissions_by_user: HashMap<i64, Vec<_>> = HashMap::new();
        for submission in SubmissionRepository::new(self.pool).list_for_year(year).await? {
            submissions_by_user
                .entry(submission.user_id)
                .or_default()
                .push(submission);
        }

        let entries = rows
            .into_iter()
            .map(|row| {
                let submissions = submissions_by_user.remove(&row.user_id).unwrap_or_default();
                let mut entry = LeaderboardEntry::new(
                    row.year,
                    row.user_id,
                    row.name.unwrap_or_else(|| anonymous_name(row.user_id)),
                    row.score,
                    CompletionSet::decode(&row.day_completions),
                )
                .with_submissions(submissions);
                entry.fetched_at = Some(row.fetched_at);

                (entry.user_id, entry)
            })
            .collect();

        Ok(entries)
    }

    /// Years that have at least one stored row, newest first
    pub async fn list_years(&self) -> Result<Vec<i32>> {
        let years = sqlx::query_scalar::<_, i32>(
            "SELECT DISTINCT year FROM leaderboard_entries ORDER BY year DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(years)
    }

    async fn fetch_entry_rows(&self, year: i32) -> Result<Vec<EntryRow>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT le.year, le.user_id, u.name, le.score, le.day_completions, le.fetched_at
            FROM leaderboard_entries le
            LEFT JOIN aoc_users u ON u.aoc_id = le.user_id
            WHERE le.year = ?
            ORDER BY le.user_id
            "#,
        )
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// Name shown for members who keep their Advent of Code profile anonymous.
pub fn anonymous_name(user_id: i64) -> String {
    format!("(anonymous user #{})", user_id)
}
