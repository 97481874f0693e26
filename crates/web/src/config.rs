use anyhow::{Context, Result};
use chrono::Datelike;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub year: i32,
    pub fetch_interval: Duration,
    pub aoc: Option<AocCredentials>,
    pub github: GithubOAuth,
}

/// Both values are required for the background fetcher to run.
#[derive(Clone)]
pub struct AocCredentials {
    pub session: String,
    pub leaderboard_id: String,
}

impl std::fmt::Debug for AocCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AocCredentials")
            .field("session", &"<redacted>")
            .field("leaderboard_id", &self.leaderboard_id)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GithubOAuth {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "7071")
                .parse()
                .context("PORT must be a number")?,
            database_url: var_or("DATABASE_URL", "sqlite://data.sqlite3?mode=rwc"),
            year: match optional_var("AOC_YEAR") {
                Some(year) => year.parse().context("AOC_YEAR must be a number")?,
                None => chrono::Utc::now().year(),
            },
            fetch_interval: Duration::from_secs(
                var_or("FETCH_INTERVAL_SECS", "900")
                    .parse()
                    .context("FETCH_INTERVAL_SECS must be a number of seconds")?,
            ),
            aoc: match (optional_var("AOC_SESSION_ID"), optional_var("AOC_LEADERBOARD_ID")) {
                (Some(session), Some(leaderboard_id)) => Some(AocCredentials {
                    session,
                    leaderboard_id,
                }),
                _ => None,
            },
            github: GithubOAuth {
                client_id: var_or("GITHUB_OAUTH_ID", ""),
                client_secret: var_or("GITHUB_OAUTH_SECRET", ""),
                redirect_uri: var_or("GITHUB_OAUTH_REDIRECT_URI", ""),
            },
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_string())
}
