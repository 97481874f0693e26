use tracing::info;

use crate::Database;
use crate::dto::submission::SubmissionRequest;
use crate::error::{Result, StorageError};
use crate::models::{Star, UserSubmission, estimate_day_count, is_valid_day};
use crate::repository::modifier::ModifierRepository;
use crate::repository::submission::{SubmissionRecord, SubmissionRepository};

/// Result of a successful ledger mutation. Scores are not written here; the
/// caller is expected to tell the presentation layer to refresh the
/// leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "ledger changes must trigger a leaderboard refresh"]
pub struct NeedsRecompute<T>(pub T);

impl<T> NeedsRecompute<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Per-user language claims, resolved against the modifier catalog at
/// write time. Every operation holds the store lock for its duration.
pub struct SubmissionLedger<'a> {
    db: &'a Database,
}

impl<'a> SubmissionLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn add(
        &self,
        caller: i64,
        year: i32,
        request: &SubmissionRequest,
    ) -> Result<NeedsRecompute<UserSubmission>> {
        let _guard = self.db.exclusive().await;

        let record = self.resolve(year, request).await?;
        let submission = SubmissionRepository::new(self.db.pool())
            .insert(caller, year, &record)
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    StorageError::NotFound
                } else {
                    e
                }
            })?;

        info!(
            "User {} added submission {} (day {} star {}, {})",
            caller, submission.id, submission.day, submission.star, submission.language_name
        );

        Ok(NeedsRecompute(submission))
    }

    pub async fn update(
        &self,
        caller: i64,
        id: i64,
        request: &SubmissionRequest,
    ) -> Result<NeedsRecompute<UserSubmission>> {
        let _guard = self.db.exclusive().await;
        let repo = SubmissionRepository::new(self.db.pool());

        let existing = repo.find_by_id(id).await?;
        ensure_owner(caller, &existing)?;

        let record = self.resolve(existing.year, request).await?;
        let submission = repo.update(id, &record).await?;

        info!("User {} updated submission {}", caller, id);

        Ok(NeedsRecompute(submission))
    }

    pub async fn delete(&self, caller: i64, id: i64) -> Result<NeedsRecompute<()>> {
        let _guard = self.db.exclusive().await;
        let repo = SubmissionRepository::new(self.db.pool());

        let existing = repo.find_by_id(id).await?;
        ensure_owner(caller, &existing)?;

        repo.delete(id).await?;

        info!("User {} deleted submission {}", caller, id);

        Ok(NeedsRecompute(()))
    }

    pub async fn get(&self, id: i64) -> Result<UserSubmission> {
        let _guard = self.db.exclusive().await;
        SubmissionRepository::new(self.db.pool()).find_by_id(id).await
    }

    /// Like [`SubmissionLedger::get`], but only the owner may read it.
    pub async fn get_owned(&self, caller: i64, id: i64) -> Result<UserSubmission> {
        let submission = self.get(id).await?;
        ensure_owner(caller, &submission)?;
        Ok(submission)
    }

    pub async fn list_for(&self, user_id: i64, year: i32) -> Result<Vec<UserSubmission>> {
        let _guard = self.db.exclusive().await;
        SubmissionRepository::new(self.db.pool())
            .list_for(user_id, year)
            .await
    }

    /// Validates a claim in a fixed order and reports the first failure:
    /// star, url, day, language. On success the catalog bonus is resolved.
    async fn resolve<'r>(
        &self,
        year: i32,
        request: &'r SubmissionRequest,
    ) -> Result<SubmissionRecord<'r>> {
        let star = Star::try_from(request.star).map_err(|_| StorageError::validation("Invalid star"))?;

        let submission_url = request.submission_url.trim();
        if submission_url.is_empty() {
            return Err(StorageError::validation("Missing submission url"));
        }

        if !is_valid_day(year, request.day) {
            return Err(StorageError::validation(format!(
                "Invalid date: day must be between 1 and {}",
                estimate_day_count(year)
            )));
        }
        let day = u32::try_from(request.day).map_err(|_| StorageError::validation("Invalid date"))?;

        let modifier = ModifierRepository::new(self.db.pool())
            .find_by_language(&request.language)
            .await?
            .ok_or_else(|| StorageError::validation("Invalid language selection"))?;

        Ok(SubmissionRecord {
            day,
            star,
            submission_url,
            language_name: &request.language,
            bonus_permille: modifier.bonus_permille,
        })
    }
}

fn ensure_owner(caller: i64, submission: &UserSubmission) -> Result<()> {
    if submission.user_id == caller {
        Ok(())
    } else {
        Err(StorageError::Forbidden)
    }
}
