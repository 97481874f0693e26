use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use storage::models::User;
use storage::services::identity;

use crate::error::WebError;
use crate::github::GithubIdentity;
use crate::state::AppState;

/// The leaderboard member behind the request's GitHub token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Requires a valid GitHub bearer token; exposes [`GithubIdentity`].
pub async fn require_github(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let github = resolve_identity(&state, req.headers()).await?;
    req.extensions_mut().insert(github);
    Ok(next.run(req).await)
}

/// Requires a GitHub token that is linked to a leaderboard member; exposes
/// both [`GithubIdentity`] and [`CurrentUser`].
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let github = resolve_identity(&state, req.headers()).await?;

    let user = identity::find_by_github_id(&state.db, github.github_id)
        .await?
        .ok_or(WebError::NotLinked)?;

    req.extensions_mut().insert(github);
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Result<GithubIdentity, WebError> {
    let token = bearer_token(headers).ok_or(WebError::Unauthorized)?;
    state.identity.identify(token).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}
