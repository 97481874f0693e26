use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::info;

use crate::Database;
use crate::error::Result;
use crate::models::{LeaderboardEntry, LeaderboardRow, LeaderboardSnapshot};
use crate::repository::leaderboard::LeaderboardRepository;

/// Persist a fetched snapshot under the store lock.
pub async fn store_snapshot(db: &Database, snapshot: &LeaderboardSnapshot) -> Result<Vec<LeaderboardRow>> {
    let _guard = db.exclusive().await;

    let stored = LeaderboardRepository::new(db.pool())
        .upsert_snapshot(snapshot)
        .await?;

    info!(
        "Stored {} leaderboard entries for {}",
        stored.len(),
        snapshot.year
    );

    Ok(stored)
}

/// Every entry of a year keyed by user id, submissions attached.
pub async fn get_leaderboard(db: &Database, year: i32) -> Result<BTreeMap<i64, LeaderboardEntry>> {
    let _guard = db.exclusive().await;
    LeaderboardRepository::new(db.pool()).get_snapshot(year).await
}

pub async fn list_years(db: &Database) -> Result<Vec<i32>> {
    let _guard = db.exclusive().await;
    LeaderboardRepository::new(db.pool()).list_years().await
}

/// Ranking order: adjusted score, then base score, both descending, then
/// display name and user id.
pub fn ranking_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.adjusted_score()
        .cmp(&a.adjusted_score())
        .then_with(|| b.base_score.cmp(&a.base_score))
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

pub fn rank_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<LeaderboardEntry> = entries.into_iter().collect();
    ranked.sort_by(ranking_order);
    ranked
}
