use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Private leaderboard payload as served by `/{year}/leaderboard/private/view/{id}.json`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiResponse {
    pub owner_id: i64,
    pub event: String,
    pub num_days: Option<u32>,
    pub day1_ts: Option<i64>,
    #[serde(default)]
    pub members: HashMap<String, Member>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Member {
    pub id: i64,
    /// `null` for members who did not set a public name
    pub name: Option<String>,
    pub local_score: i64,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub last_star_ts: i64,
    #[serde(default)]
    pub completion_day_level: HashMap<String, DayLevel>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayLevel {
    #[serde(rename = "1")]
    pub star1: Option<StarInfo>,
    #[serde(rename = "2")]
    pub star2: Option<StarInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StarInfo {
    pub get_star_ts: i64,
    #[serde(default)]
    pub star_index: i64,
}
