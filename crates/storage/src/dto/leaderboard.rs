use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CompletionSet, LeaderboardEntry, UserSubmission, estimate_day_count};
use crate::services::leaderboard::rank_entries;

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub year: i32,
    /// Number of puzzle days in the event, for sizing the star grid
    pub day_count: u32,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankedEntry {
    pub rank: usize,
    pub user_id: i64,
    pub name: String,
    pub base_score: i64,
    pub adjusted_score: i64,
    pub stars: u32,
    /// Day number -> `{ "star1": bool, "star2": bool }`
    #[schema(value_type = Object)]
    pub completions: CompletionSet,
    pub submissions: Vec<UserSubmission>,
    pub fetched_at: Option<NaiveDateTime>,
}

impl LeaderboardResponse {
    pub fn new(year: i32, entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let entries = rank_entries(entries)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| RankedEntry {
                rank: index + 1,
                adjusted_score: entry.adjusted_score(),
                stars: entry.total_stars(),
                user_id: entry.user_id,
                name: entry.display_name,
                base_score: entry.base_score,
                completions: entry.completions,
                submissions: entry.submissions,
                fetched_at: entry.fetched_at,
            })
            .collect();

        Self {
            year,
            day_count: estimate_day_count(year),
            entries,
        }
    }
}
