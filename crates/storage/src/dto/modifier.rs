use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::SubmissionModifier;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModifierResponse {
    pub language_name: String,
    pub bonus_permille: i64,
    /// Human readable bonus, e.g. "2.5%"
    pub bonus: String,
}

impl From<SubmissionModifier> for ModifierResponse {
    fn from(modifier: SubmissionModifier) -> Self {
        Self {
            bonus: modifier.formatted_bonus(),
            language_name: modifier.language_name,
            bonus_permille: modifier.bonus_permille,
        }
    }
}

/// Largest bonus or penalty magnitude accepted into the catalog (100%).
pub const MAX_BONUS_PERMILLE: i64 = 1000;

/// One catalog line of a modifier seed file
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ModifierSeedEntry {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Language name must be between 1 and 64 characters"
    ))]
    pub language_name: String,

    /// Checked against [`MAX_BONUS_PERMILLE`] when the catalog is seeded
    pub bonus_permille: i64,
}

impl From<ModifierSeedEntry> for SubmissionModifier {
    fn from(entry: ModifierSeedEntry) -> Self {
        SubmissionModifier::new(entry.language_name, entry.bonus_permille)
    }
}
