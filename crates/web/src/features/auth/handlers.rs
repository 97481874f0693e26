use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use storage::{dto::user::LinkAccountRequest, models::User};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::WebError;
use crate::github::GithubIdentity;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    /// Authorization code handed back by GitHub
    pub code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUrlResponse {
    pub authorize_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Send as `Authorization: Bearer <token>` on authenticated calls
    pub access_token: String,
    pub github: GithubIdentity,
    /// `null` until the account is linked to a leaderboard member
    pub user: Option<User>,
}

#[utoipa::path(
    get,
    path = "/api/auth/github/login",
    responses(
        (status = 200, description = "GitHub authorize URL", body = LoginUrlResponse),
        (status = 400, description = "GitHub login not configured")
    ),
    tag = "auth"
)]
pub async fn login_url(State(state): State<AppState>) -> Result<Response, WebError> {
    let authorize_url = services::authorize_url(&state.oauth)?;

    Ok(Json(LoginUrlResponse { authorize_url }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/github/callback",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing code"),
        (status = 401, description = "Code rejected by GitHub")
    ),
    tag = "auth"
)]
pub async fn github_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, WebError> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| WebError::BadRequest("Missing authorization code".to_string()))?;

    let (access_token, github, user) =
        services::complete_login(&state.db, state.identity.as_ref(), &code).await?;

    Ok(Json(LoginResponse {
        access_token,
        github,
        user,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/link",
    request_body = LinkAccountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Account linked", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown Advent of Code id"),
        (status = 409, description = "Already linked")
    ),
    tag = "auth"
)]
pub async fn link_account(
    State(state): State<AppState>,
    Extension(github): Extension<GithubIdentity>,
    Json(req): Json<LinkAccountRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::link_account(&state.db, &github, req.aoc_id).await?;

    Ok(Json(user).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The linked leaderboard member", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "GitHub account not linked")
    ),
    tag = "auth"
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Result<Response, WebError> {
    Ok(Json(user).into_response())
}
