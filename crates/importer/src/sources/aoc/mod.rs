mod client;
mod models;
mod transformer;

pub use client::AocClient;
pub use models::*;
pub use transformer::AocTransformer;

use crate::{Result, traits::LeaderboardSource};
use storage::models::LeaderboardSnapshot;
use tracing::info;

#[derive(Clone)]
pub struct AocConfig {
    pub session: String,
    pub leaderboard_id: String,
    pub year: i32,
}

/// Pulls one private leaderboard for one event year from adventofcode.com.
pub struct AdventOfCodeSource {
    client: AocClient,
    leaderboard_id: String,
    year: i32,
}

impl AdventOfCodeSource {
    pub fn new(config: AocConfig) -> Result<Self> {
        Ok(Self {
            client: AocClient::new(&config.session)?,
            leaderboard_id: config.leaderboard_id,
            year: config.year,
        })
    }

    pub fn with_client(client: AocClient, leaderboard_id: String, year: i32) -> Self {
        Self {
            client,
            leaderboard_id,
            year,
        }
    }
}

#[async_trait::async_trait]
impl LeaderboardSource for AdventOfCodeSource {
    async fn fetch(&self) -> Result<Option<LeaderboardSnapshot>> {
        info!(
            "Fetching private leaderboard {} for {}",
            self.leaderboard_id, self.year
        );

        let Some(response) = self
            .client
            .fetch_private_leaderboard(self.year, &self.leaderboard_id)
            .await?
        else {
            return Ok(None);
        };

        let snapshot = AocTransformer::into_snapshot(response)?;
        info!(
            "Leaderboard {} ({}) has {} member(s)",
            self.leaderboard_id,
            snapshot.year,
            snapshot.members.len()
        );

        Ok(Some(snapshot))
    }

    fn name(&self) -> &'static str {
        "Advent of Code"
    }
}
