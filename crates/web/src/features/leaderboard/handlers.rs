use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::{common::YearQuery, leaderboard::LeaderboardResponse};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(YearQuery),
    responses(
        (status = 200, description = "Ranked leaderboard with adjusted scores", body = LeaderboardResponse),
        (status = 400, description = "Invalid year")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Response, WebError> {
    query.validate()?;

    let response = services::get_leaderboard(&state.db, query.year_or(state.default_year)).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/years",
    responses(
        (status = 200, description = "Years with stored standings, newest first", body = Vec<i32>)
    ),
    tag = "leaderboard"
)]
pub async fn list_years(State(state): State<AppState>) -> Result<Response, WebError> {
    let years = services::list_years(&state.db).await?;

    Ok(Json(years).into_response())
}
