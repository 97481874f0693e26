use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use storage::Database;
use storage::dto::modifier::ModifierSeedEntry;
use storage::models::{Completion, LeaderboardSnapshot, SnapshotMember};
use storage::services::{catalog, identity, leaderboard};
use tower::ServiceExt;
use web::config::GithubOAuth;
use web::error::{ApiResult, WebError};
use web::github::{GithubIdentity, IdentityProvider};
use web::state::AppState;

/// Tokens are `token-<login>`; only the logins below exist.
struct FakeGithub;

const ACCOUNTS: [(&str, i64); 3] = [("ada", 9001), ("eve", 9002), ("grace", 9003)];

#[async_trait::async_trait]
impl IdentityProvider for FakeGithub {
    async fn exchange_code(&self, code: &str) -> ApiResult<String> {
        match code.strip_prefix("code-") {
            Some(login) if ACCOUNTS.iter().any(|(l, _)| *l == login) => Ok(format!("token-{}", login)),
            _ => Err(WebError::Unauthorized),
        }
    }

    async fn identify(&self, access_token: &str) -> ApiResult<GithubIdentity> {
        let login = access_token.strip_prefix("token-").ok_or(WebError::Unauthorized)?;
        let (login, github_id) = ACCOUNTS
            .iter()
            .find(|(l, _)| *l == login)
            .ok_or(WebError::Unauthorized)?;

        Ok(GithubIdentity {
            github_id: *github_id,
            login: login.to_string(),
            avatar_url: format!("https://avatars.example/{}", login),
        })
    }
}

fn member(user_id: i64, name: &str, local_score: i64, days: &[(u32, bool, bool)]) -> SnapshotMember {
    SnapshotMember {
        user_id,
        name: name.to_string(),
        local_score,
        completions: days
            .iter()
            .map(|&(day, star1, star2)| (day, Completion { star1, star2 }))
            .collect(),
    }
}

/// Ada (42, 150 points) and Grace (7, 90 points) on the 2024 board, a small
/// catalog, and optionally both linked to their GitHub accounts.
async fn setup(linked: bool) -> (Router, Database) {
    let db = Database::in_memory().await.unwrap();

    catalog::seed_modifiers(
        &db,
        [("Rust", 25), ("Haskell", 50), ("Python", 0)]
            .into_iter()
            .map(|(language_name, bonus_permille)| ModifierSeedEntry {
                language_name: language_name.to_string(),
                bonus_permille,
            })
            .collect(),
    )
    .await
    .unwrap();

    leaderboard::store_snapshot(
        &db,
        &LeaderboardSnapshot {
            year: 2024,
            owner_id: 42,
            members: vec![
                member(42, "Ada", 150, &[(1, true, true), (2, true, false)]),
                member(7, "Grace", 90, &[(1, true, false)]),
            ],
        },
    )
    .await
    .unwrap();

    if linked {
        identity::link_github_user(&db, 9001, "https://avatars.example/ada", 42)
            .await
            .unwrap();
        identity::link_github_user(&db, 9003, "https://avatars.example/grace", 7)
            .await
            .unwrap();
    }

    let state = AppState {
        db: db.clone(),
        identity: Arc::new(FakeGithub),
        oauth: GithubOAuth {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://aoc.example/oauth2".to_string(),
        },
        default_year: 2024,
    };

    (web::app(state), db)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn hx_trigger(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("hx-trigger")
        .and_then(|v| v.to_str().ok())
}

fn claim(day: i64, star: i64, language: &str) -> Value {
    json!({
        "day": day,
        "star": star,
        "language": language,
        "submission_url": format!("https://github.com/ada/aoc/day{}.rs", day),
    })
}

#[tokio::test]
async fn test_leaderboard_is_ranked() {
    let (app, _) = setup(false).await;

    let response = send(&app, Method::GET, "/api/leaderboard?year=2024", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["day_count"], 25);

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["name"], "Ada");
    assert_eq!(entries[0]["adjusted_score"], 150);
    assert_eq!(entries[0]["stars"], 3);
    assert_eq!(entries[0]["completions"]["1"]["star2"], true);
    assert_eq!(entries[1]["name"], "Grace");
}

#[tokio::test]
async fn test_leaderboard_defaults_and_bounds() {
    let (app, _) = setup(false).await;

    let response = send(&app, Method::GET, "/api/leaderboard", None, None).await;
    assert_eq!(json_body(response).await["entries"].as_array().unwrap().len(), 2);

    let response = send(&app, Method::GET, "/api/leaderboard?year=1999", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, "/api/leaderboard/years", None, None).await;
    assert_eq!(json_body(response).await, json!([2024]));
}

#[tokio::test]
async fn test_modifier_catalog() {
    let (app, _) = setup(false).await;

    let body = json_body(send(&app, Method::GET, "/api/modifiers", None, None).await).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["language_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Haskell", "Rust", "Python"]);

    let response = send(&app, Method::GET, "/api/modifiers/Rust", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["bonus"], "2.5%");

    let response = send(&app, Method::GET, "/api/modifiers/Cobol", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submissions_require_linked_account() {
    let (app, _) = setup(true).await;

    let response = send(&app, Method::POST, "/api/submissions", None, Some(claim(1, 1, "Rust"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, "/api/submissions", Some("forged"), Some(claim(1, 1, "Rust"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, "/api/submissions", Some("token-eve"), Some(claim(1, 1, "Rust"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_submission_adjusts_score() {
    let (app, _) = setup(true).await;

    let response = send(
        &app,
        Method::POST,
        "/api/submissions?year=2024",
        Some("token-ada"),
        Some(claim(1, 1, "Rust")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(hx_trigger(&response), Some("refresh-leaderboard"));

    let created = json_body(response).await;
    assert_eq!(created["bonus_permille"], 25);
    assert_eq!(created["star"], 1);

    let body = json_body(send(&app, Method::GET, "/api/leaderboard?year=2024", None, None).await).await;
    assert_eq!(body["entries"][0]["adjusted_score"], 153);
    assert_eq!(body["entries"][0]["base_score"], 150);

    let mine = json_body(send(&app, Method::GET, "/api/submissions", Some("token-ada"), None).await).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_claim_is_unprocessable() {
    let (app, _) = setup(true).await;

    let response = send(&app, Method::POST, "/api/submissions", Some("token-ada"), Some(claim(1, 3, "Cobol"))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(hx_trigger(&response).is_none());
    assert_eq!(json_body(response).await["error"], "Invalid star");

    let response = send(&app, Method::POST, "/api/submissions", Some("token-ada"), Some(claim(26, 1, "Rust"))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_submission_ownership() {
    let (app, _) = setup(true).await;

    let created = json_body(
        send(&app, Method::POST, "/api/submissions", Some("token-ada"), Some(claim(1, 1, "Rust"))).await,
    )
    .await;
    let uri = format!("/api/submissions/{}", created["id"]);

    let response = send(&app, Method::PATCH, &uri, Some("token-grace"), Some(claim(1, 1, "Haskell"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::DELETE, &uri, Some("token-grace"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::GET, &uri, Some("token-grace"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let unchanged = json_body(send(&app, Method::GET, &uri, Some("token-ada"), None).await).await;
    assert_eq!(unchanged["language_name"], "Rust");

    let response = send(&app, Method::PATCH, &uri, Some("token-ada"), Some(claim(1, 1, "Haskell"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hx_trigger(&response), Some("refresh-leaderboard"));
    assert_eq!(json_body(response).await["bonus_permille"], 50);

    let response = send(&app, Method::DELETE, &uri, Some("token-ada"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(hx_trigger(&response), Some("refresh-leaderboard"));

    let response = send(&app, Method::GET, &uri, Some("token-ada"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_github_callback() {
    let (app, _) = setup(true).await;

    let response = send(&app, Method::GET, "/api/auth/github/callback", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, "/api/auth/github/callback?code=bogus", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(send(&app, Method::GET, "/api/auth/github/callback?code=code-ada", None, None).await).await;
    assert_eq!(body["access_token"], "token-ada");
    assert_eq!(body["github"]["id"], 9001);
    assert_eq!(body["user"]["user_id"], 42);

    let body = json_body(send(&app, Method::GET, "/api/auth/github/callback?code=code-eve", None, None).await).await;
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn test_link_account_flow() {
    let (app, _) = setup(false).await;

    let response = send(&app, Method::GET, "/api/auth/me", Some("token-ada"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::POST, "/api/auth/link", None, Some(json!({"aoc_id": 42}))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, "/api/auth/link", Some("token-ada"), Some(json!({"aoc_id": 555}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::POST, "/api/auth/link", Some("token-ada"), Some(json!({"aoc_id": 42}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["avatar_url"], "https://avatars.example/ada");

    let response = send(&app, Method::POST, "/api/auth/link", Some("token-ada"), Some(json!({"aoc_id": 7}))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, Method::GET, "/api/auth/me", Some("token-ada"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Ada");
}

#[tokio::test]
async fn test_login_url_and_openapi() {
    let (app, _) = setup(false).await;

    let body = json_body(send(&app, Method::GET, "/api/auth/github/login", None, None).await).await;
    let url = body["authorize_url"].as_str().unwrap();
    assert!(url.starts_with("https://github.com/login/oauth/authorize?client_id=client-123"));

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/submissions/{id}"].is_object());
}
