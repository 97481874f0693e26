use std::sync::Arc;
use std::time::Duration;

use storage::Database;
use storage::services::leaderboard;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::{LeaderboardSource, Result};

/// One fetch-and-store pass. Returns the number of stored rows; an empty
/// upstream payload stores nothing and is not an error.
pub async fn run_cycle(source: &dyn LeaderboardSource, db: &Database) -> Result<usize> {
    let Some(snapshot) = source.fetch().await? else {
        info!("{} returned no leaderboard, nothing to store", source.name());
        return Ok(0);
    };

    let rows = leaderboard::store_snapshot(db, &snapshot).await?;
    Ok(rows.len())
}

/// Runs [`run_cycle`] on a fixed period, starting immediately. Failed cycles
/// are logged and skipped; the next tick tries again.
pub fn spawn(source: Arc<dyn LeaderboardSource>, db: Database, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Fetching from {} every {}s",
            source.name(),
            period.as_secs()
        );

        loop {
            ticker.tick().await;

            match run_cycle(source.as_ref(), &db).await {
                Ok(count) => info!("Stored {} leaderboard row(s)", count),
                Err(e) => error!("Leaderboard fetch from {} failed: {}", source.name(), e),
            }
        }
    })
}
