use storage::{
    Database, dto::leaderboard::LeaderboardResponse, error::Result, services::leaderboard,
};

/// Ranked leaderboard for one event year
pub async fn get_leaderboard(db: &Database, year: i32) -> Result<LeaderboardResponse> {
    let entries = leaderboard::get_leaderboard(db, year).await?;
    Ok(LeaderboardResponse::new(year, entries.into_values()))
}

/// Years with stored standings, newest first
pub async fn list_years(db: &Database) -> Result<Vec<i32>> {
    leaderboard::list_years(db).await
}
