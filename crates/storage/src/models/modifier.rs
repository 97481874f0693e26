use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Catalog entry granting a fixed bonus to submissions written in a language.
///
/// The bonus is stored in permille: 25 means +2.5%. Negative values act as
/// penalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionModifier {
    pub language_name: String,
    #[sqlx(rename = "modifier_permille")]
    pub bonus_permille: i64,
}

impl SubmissionModifier {
    pub fn new(language_name: impl Into<String>, bonus_permille: i64) -> Self {
        Self {
            language_name: language_name.into(),
            bonus_permille,
        }
    }

    pub fn formatted_bonus(&self) -> String {
        format_bonus(self.bonus_permille)
    }
}

/// Formats a permille bonus as a percentage with one decimal, e.g. `25` -> `"2.5%"`.
pub fn format_bonus(permille: i64) -> String {
    let sign = if permille < 0 { "-" } else { "" };
    let magnitude = permille.unsigned_abs();
    format!("{}{}.{}%", sign, magnitude / 10, magnitude % 10)
}
