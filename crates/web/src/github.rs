use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::GithubOAuth;
use crate::error::{ApiResult, WebError};

/// The caller as GitHub knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GithubIdentity {
    #[serde(rename = "id")]
    pub github_id: i64,
    pub login: String,
    pub avatar_url: String,
}

/// OAuth boundary. Implementations turn an authorization code into an access
/// token and an access token into an identity; a rejected code or token is
/// reported as [`WebError::Unauthorized`].
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> ApiResult<String>;

    async fn identify(&self, access_token: &str) -> ApiResult<GithubIdentity>;
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

pub struct GithubClient {
    oauth: GithubOAuth,
    client: reqwest::Client,
}

impl GithubClient {
    pub fn new(oauth: GithubOAuth) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("aoc-leaderboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { oauth, client })
    }
}

fn upstream(e: reqwest::Error) -> WebError {
    WebError::Upstream(e.to_string())
}

#[async_trait::async_trait]
impl IdentityProvider for GithubClient {
    async fn exchange_code(&self, code: &str) -> ApiResult<String> {
        let response = self
            .client
            .post("https://github.com/login/oauth/access_token")
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.oauth.client_id.as_str()),
                ("client_secret", self.oauth.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.oauth.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(upstream)?;

        if !response.status().is_success() {
            return Err(WebError::Upstream(format!(
                "token exchange answered {}",
                response.status()
            )));
        }

        let body: AccessTokenResponse = response.json().await.map_err(upstream)?;
        match (body.access_token, body.error) {
            (Some(token), _) if !token.is_empty() => Ok(token),
            (_, Some(error)) => {
                tracing::warn!("GitHub rejected the authorization code: {}", error);
                Err(WebError::Unauthorized)
            }
            _ => Err(WebError::Unauthorized),
        }
    }

    async fn identify(&self, access_token: &str) -> ApiResult<GithubIdentity> {
        let response = self
            .client
            .get("https://api.github.com/user")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(upstream)?;

        match response.status() {
            status if status.is_success() => response.json().await.map_err(upstream),
            reqwest::StatusCode::UNAUTHORIZED => Err(WebError::Unauthorized),
            status => Err(WebError::Upstream(format!("user endpoint answered {}", status))),
        }
    }
}
