#![allow(dead_code)]

use storage::Database;
use storage::dto::modifier::ModifierSeedEntry;
use storage::dto::submission::SubmissionRequest;
use storage::models::{Completion, CompletionSet, LeaderboardSnapshot, SnapshotMember};
use storage::services::{catalog, leaderboard};

pub async fn test_db() -> Database {
    Database::in_memory().await.expect("in-memory database")
}

pub async fn seed_catalog(db: &Database) {
    let entries = [("Rust", 25), ("Haskell", 50), ("Go", 20), ("Python", 0), ("Scratch", -15)]
        .into_iter()
        .map(|(language_name, bonus_permille)| ModifierSeedEntry {
            language_name: language_name.to_string(),
            bonus_permille,
        })
        .collect();

    catalog::seed_modifiers(db, entries).await.expect("seed catalog");
}

pub fn completions(days: &[(u32, bool, bool)]) -> CompletionSet {
    days.iter()
        .map(|&(day, star1, star2)| (day, Completion { star1, star2 }))
        .collect()
}

pub fn member(user_id: i64, name: &str, local_score: i64, days: &[(u32, bool, bool)]) -> SnapshotMember {
    SnapshotMember {
        user_id,
        name: name.to_string(),
        local_score,
        completions: completions(days),
    }
}

pub fn ada_snapshot() -> LeaderboardSnapshot {
    LeaderboardSnapshot {
        year: 2024,
        owner_id: 42,
        members: vec![
            member(42, "Ada", 150, &[(1, true, true), (2, true, false)]),
            member(7, "Grace", 90, &[(1, true, false)]),
        ],
    }
}

pub async fn store_ada(db: &Database) {
    leaderboard::store_snapshot(db, &ada_snapshot())
        .await
        .expect("store snapshot");
}

pub fn request(day: i64, star: i64, language: &str, url: &str) -> SubmissionRequest {
    SubmissionRequest {
        day,
        star,
        language: language.to_string(),
        submission_url: url.to_string(),
    }
}
