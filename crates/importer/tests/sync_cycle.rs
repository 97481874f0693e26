use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use importer::{ImporterError, LeaderboardSource, Result, modifiers, sync};
use storage::Database;
use storage::models::{CompletionSet, LeaderboardSnapshot, SnapshotMember, Star};
use storage::services::{catalog, leaderboard};

enum Behaviour {
    Fail,
    Empty,
    Snapshot(LeaderboardSnapshot),
}

struct FakeSource {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl LeaderboardSource for FakeSource {
    async fn fetch(&self) -> Result<Option<LeaderboardSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Fail => Err(ImporterError::StatusError(502)),
            Behaviour::Empty => Ok(None),
            Behaviour::Snapshot(snapshot) => Ok(Some(snapshot.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn snapshot(score: i64) -> LeaderboardSnapshot {
    let mut completions = CompletionSet::new();
    completions.mark(1, Star::First);

    LeaderboardSnapshot {
        year: 2024,
        owner_id: 42,
        members: vec![SnapshotMember {
            user_id: 42,
            name: "Ada".to_string(),
            local_score: score,
            completions,
        }],
    }
}

#[tokio::test]
async fn test_failed_cycle_leaves_store_untouched() {
    let db = Database::in_memory().await.unwrap();
    leaderboard::store_snapshot(&db, &snapshot(150)).await.unwrap();

    let source = FakeSource::new(Behaviour::Fail);
    let result = sync::run_cycle(&source, &db).await;

    assert!(matches!(result, Err(ImporterError::StatusError(502))));
    let entries = leaderboard::get_leaderboard(&db, 2024).await.unwrap();
    assert_eq!(entries[&42].base_score, 150);
}

#[tokio::test]
async fn test_empty_payload_stores_nothing() {
    let db = Database::in_memory().await.unwrap();

    let stored = sync::run_cycle(&FakeSource::new(Behaviour::Empty), &db)
        .await
        .unwrap();

    assert_eq!(stored, 0);
    assert!(leaderboard::list_years(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_cycle_stores_snapshot() {
    let db = Database::in_memory().await.unwrap();

    let stored = sync::run_cycle(&FakeSource::new(Behaviour::Snapshot(snapshot(200))), &db)
        .await
        .unwrap();

    assert_eq!(stored, 1);
    let entries = leaderboard::get_leaderboard(&db, 2024).await.unwrap();
    assert_eq!(entries[&42].base_score, 200);
    assert_eq!(entries[&42].completions.encode(), "01d1");
}

#[tokio::test]
async fn test_scheduler_keeps_running_after_failure() {
    let db = Database::in_memory().await.unwrap();
    let source = Arc::new(FakeSource::new(Behaviour::Fail));

    let handle = sync::spawn(source.clone(), db, Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.abort();

    assert!(source.calls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_seed_file_loads_into_catalog() {
    let db = Database::in_memory().await.unwrap();
    let path = std::env::temp_dir().join(format!("modifiers-{}.json", std::process::id()));
    tokio::fs::write(
        &path,
        r#"[{"language_name": "Rust", "bonus_permille": 25}, {"language_name": "Go", "bonus_permille": 20}]"#,
    )
    .await
    .unwrap();

    let written = modifiers::seed_from_file(&db, &path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(written, 2);
    let names: Vec<String> = catalog::list_modifiers(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.language_name)
        .collect();
    assert_eq!(names, vec!["Rust", "Go"]);
}

#[tokio::test]
async fn test_missing_seed_file_is_io_error() {
    let result = modifiers::load_seed_file(std::path::Path::new("/nonexistent/modifiers.json")).await;
    assert!(matches!(result, Err(ImporterError::IoError(_))));
}
