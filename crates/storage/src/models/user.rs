use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A leaderboard member, keyed by their Advent of Code id.
///
/// Rows are created the first time a member shows up in a fetched snapshot;
/// the GitHub columns stay empty until the member links an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    #[sqlx(rename = "aoc_id")]
    pub user_id: i64,
    pub name: String,
    pub github_id: Option<i64>,
    pub avatar_url: Option<String>,
}
