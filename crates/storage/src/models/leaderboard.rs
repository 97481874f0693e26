use std::sync::OnceLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::completion::CompletionSet;
use super::submission::UserSubmission;
use crate::services::scoring;

/// One member's standing for one event year, as loaded from storage.
///
/// The adjusted score is computed lazily on first access and then kept for
/// the lifetime of this instance. Reload the entry to pick up changes.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub year: i32,
    pub user_id: i64,
    pub display_name: String,
    pub base_score: i64,
    pub completions: CompletionSet,
    pub submissions: Vec<UserSubmission>,
    pub fetched_at: Option<NaiveDateTime>,
    #[serde(skip)]
    adjusted_score: OnceLock<i64>,
}

impl LeaderboardEntry {
    pub fn new(
        year: i32,
        user_id: i64,
        display_name: impl Into<String>,
        base_score: i64,
        completions: CompletionSet,
    ) -> Self {
        Self {
            year,
            user_id,
            display_name: display_name.into(),
            base_score,
            completions,
            submissions: Vec::new(),
            fetched_at: None,
            adjusted_score: OnceLock::new(),
        }
    }

    pub fn with_submissions(mut self, submissions: Vec<UserSubmission>) -> Self {
        self.submissions = submissions;
        self
    }

    pub fn adjusted_score(&self) -> i64 {
        *self
            .adjusted_score
            .get_or_init(|| scoring::adjusted_score(self.base_score, &self.submissions))
    }

    pub fn is_score_computed(&self) -> bool {
        self.adjusted_score.get().is_some()
    }

    pub fn total_stars(&self) -> u32 {
        self.completions.total_stars()
    }
}

/// A stored `(year, user)` leaderboard row without names or submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub year: i32,
    pub user_id: i64,
    pub score: i64,
    pub completions: CompletionSet,
    pub fetched_at: NaiveDateTime,
}

/// Normalised leaderboard as fetched from the external API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub year: i32,
    pub owner_id: i64,
    pub members: Vec<SnapshotMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMember {
    pub user_id: i64,
    pub name: String,
    pub local_score: i64,
    pub completions: CompletionSet,
}
