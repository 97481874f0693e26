use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{common::YearQuery, submission::SubmissionRequest},
    models::UserSubmission,
    services::NeedsRecompute,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

pub const HX_TRIGGER: &str = "hx-trigger";
pub const REFRESH_LEADERBOARD: &str = "refresh-leaderboard";

/// Turns a ledger change into a response that tells the page to reload the
/// leaderboard.
fn refreshing<T>(
    status: StatusCode,
    change: NeedsRecompute<T>,
) -> (StatusCode, [(&'static str, &'static str); 1], T) {
    (status, [(HX_TRIGGER, REFRESH_LEADERBOARD)], change.into_inner())
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(YearQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's submissions for the year", body = Vec<UserSubmission>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "GitHub account not linked")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<YearQuery>,
) -> Result<Response, WebError> {
    query.validate()?;

    let submissions =
        services::list_submissions(&state.db, user.user_id, query.year_or(state.default_year)).await?;

    Ok(Json(submissions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission found", body = UserSubmission),
        (status = 403, description = "Submission belongs to someone else"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let submission = services::get_submission(&state.db, user.user_id, id).await?;

    Ok(Json(submission).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    params(YearQuery),
    request_body = SubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Submission created", body = UserSubmission),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid star, url, day or language")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<YearQuery>,
    Json(req): Json<SubmissionRequest>,
) -> Result<Response, WebError> {
    query.validate()?;
    req.validate()?;

    let year = query.year_or(state.default_year);
    let created = services::add_submission(&state.db, user.user_id, year, &req).await?;

    let (status, headers, submission) = refreshing(StatusCode::CREATED, created);
    Ok((status, headers, Json(submission)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    request_body = SubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission updated", body = UserSubmission),
        (status = 403, description = "Submission belongs to someone else"),
        (status = 404, description = "Submission not found"),
        (status = 422, description = "Invalid star, url, day or language")
    ),
    tag = "submissions"
)]
pub async fn update_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<SubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_submission(&state.db, user.user_id, id, &req).await?;

    let (status, headers, submission) = refreshing(StatusCode::OK, updated);
    Ok((status, headers, Json(submission)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 403, description = "Submission belongs to someone else"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn delete_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let deleted = services::delete_submission(&state.db, user.user_id, id).await?;

    let (status, headers, ()) = refreshing(StatusCode::NO_CONTENT, deleted);
    Ok((status, headers).into_response())
}
