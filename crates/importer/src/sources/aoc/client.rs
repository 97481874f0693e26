use super::models::ApiResponse;
use crate::error::{ImporterError, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::debug;

const USER_AGENT: &str = concat!("aoc-leaderboard/", env!("CARGO_PKG_VERSION"));

pub struct AocClient {
    base_url: String,
    client: reqwest::Client,
}

impl AocClient {
    pub fn new(session: &str) -> Result<Self> {
        Self::with_base_url("https://adventofcode.com", session)
    }

    pub fn with_base_url(base_url: impl Into<String>, session: &str) -> Result<Self> {
        let mut cookie = HeaderValue::from_str(&format!("session={}", session.trim()))
            .map_err(|_| ImporterError::ValidationError("Session token is not a valid header value".to_string()))?;
        cookie.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `Ok(None)` when the body is JSON `null`.
    pub async fn fetch_private_leaderboard(
        &self,
        year: i32,
        leaderboard_id: &str,
    ) -> Result<Option<ApiResponse>> {
        let url = format!(
            "{}/{}/leaderboard/private/view/{}.json",
            self.base_url, year, leaderboard_id
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::StatusError(status.as_u16()));
        }

        // An expired session is redirected to an HTML login page; parsing the
        // text ourselves surfaces that as a JSON error.
        let body = response.text().await?;
        let data = serde_json::from_str::<Option<ApiResponse>>(&body)?;

        Ok(data)
    }
}
