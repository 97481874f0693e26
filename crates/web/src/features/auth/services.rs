use reqwest::Url;
use storage::{Database, error::Result, models::User, services::identity};

use crate::config::GithubOAuth;
use crate::error::{ApiResult, WebError};
use crate::github::{GithubIdentity, IdentityProvider};

/// GitHub authorize page the login button points at.
pub fn authorize_url(oauth: &GithubOAuth) -> ApiResult<String> {
    if oauth.client_id.is_empty() {
        return Err(WebError::BadRequest("GitHub login is not configured".to_string()));
    }

    let mut params = vec![("client_id", oauth.client_id.as_str())];
    if !oauth.redirect_uri.is_empty() {
        params.push(("redirect_uri", oauth.redirect_uri.as_str()));
    }

    Url::parse_with_params("https://github.com/login/oauth/authorize", &params)
        .map(String::from)
        .map_err(|e| WebError::BadRequest(format!("Invalid OAuth configuration: {}", e)))
}

/// Exchanges an authorization code and looks up the linked member, if any.
pub async fn complete_login(
    db: &Database,
    provider: &dyn IdentityProvider,
    code: &str,
) -> ApiResult<(String, GithubIdentity, Option<User>)> {
    let access_token = provider.exchange_code(code).await?;
    let github = provider.identify(&access_token).await?;
    let user = identity::find_by_github_id(db, github.github_id).await?;

    tracing::info!(
        "GitHub user {} logged in ({})",
        github.login,
        if user.is_some() { "linked" } else { "not linked" }
    );

    Ok((access_token, github, user))
}

pub async fn link_account(db: &Database, github: &GithubIdentity, aoc_id: i64) -> Result<User> {
    identity::link_github_user(db, github.github_id, &github.avatar_url, aoc_id).await
}
