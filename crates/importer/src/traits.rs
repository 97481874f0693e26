use crate::Result;
use storage::models::LeaderboardSnapshot;

/// Anything that can produce the current standings of a private leaderboard.
///
/// `Ok(None)` means the upstream answered without a leaderboard (empty or
/// `null` payload); callers treat it as "nothing to store".
#[async_trait::async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<LeaderboardSnapshot>>;

    fn name(&self) -> &'static str;
}
