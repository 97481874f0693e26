use axum::{Router, routing::get};

use super::handlers::{get_leaderboard, list_years};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/years", get(list_years))
}
