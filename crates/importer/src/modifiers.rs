use std::path::Path;

use storage::Database;
use storage::dto::modifier::ModifierSeedEntry;
use storage::services::catalog;
use tracing::info;

use crate::Result;

/// Reads a JSON array of `{"language_name", "bonus_permille"}` entries.
pub async fn load_seed_file(path: &Path) -> Result<Vec<ModifierSeedEntry>> {
    let content = tokio::fs::read_to_string(path).await?;
    let entries: Vec<ModifierSeedEntry> = serde_json::from_str(&content)?;

    info!("Loaded {} modifier(s) from {}", entries.len(), path.display());

    Ok(entries)
}

pub async fn seed_from_file(db: &Database, path: &Path) -> Result<u64> {
    let entries = load_seed_file(path).await?;
    Ok(catalog::seed_modifiers(db, entries).await?)
}
