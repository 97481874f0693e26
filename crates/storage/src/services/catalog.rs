use tracing::info;
use validator::Validate;

use crate::Database;
use crate::dto::modifier::{MAX_BONUS_PERMILLE, ModifierSeedEntry};
use crate::error::{Result, StorageError};
use crate::models::SubmissionModifier;
use crate::repository::modifier::ModifierRepository;

/// Catalog sorted by bonus descending, then language name.
pub async fn list_modifiers(db: &Database) -> Result<Vec<SubmissionModifier>> {
    let _guard = db.exclusive().await;
    ModifierRepository::new(db.pool()).list().await
}

pub async fn get_modifier(db: &Database, language_name: &str) -> Result<SubmissionModifier> {
    let _guard = db.exclusive().await;
    ModifierRepository::new(db.pool())
        .find_by_language(language_name)
        .await?
        .ok_or(StorageError::NotFound)
}

/// Admin seeding: validate every entry first, then upsert them all at once.
/// Already stored submissions keep the bonus they were saved with.
pub async fn seed_modifiers(db: &Database, entries: Vec<ModifierSeedEntry>) -> Result<u64> {
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| StorageError::validation(format!("{}: {}", entry.language_name, e)))?;

        if !(-MAX_BONUS_PERMILLE..=MAX_BONUS_PERMILLE).contains(&entry.bonus_permille) {
            return Err(StorageError::validation(format!(
                "{}: bonus must be between -{} and {} permille",
                entry.language_name, MAX_BONUS_PERMILLE, MAX_BONUS_PERMILLE
            )));
        }
    }

    let modifiers: Vec<SubmissionModifier> = entries.into_iter().map(Into::into).collect();

    let _guard = db.exclusive().await;
    let written = ModifierRepository::new(db.pool())
        .upsert_many(&modifiers)
        .await?;

    info!("Seeded {} modifier(s)", written);

    Ok(written)
}

pub async fn remove_modifier(db: &Database, language_name: &str) -> Result<()> {
    let _guard = db.exclusive().await;

    if ModifierRepository::new(db.pool()).delete(language_name).await? {
        info!("Removed modifier {}", language_name);
        Ok(())
    } else {
        Err(StorageError::NotFound)
    }
}
