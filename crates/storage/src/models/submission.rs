use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::completion::Star;

/// A language claim for one star of one day.
///
/// `bonus_permille` is copied from the modifier catalog when the submission
/// is created or updated and is never re-resolved on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSubmission {
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub day: u32,
    #[schema(value_type = u8, minimum = 1, maximum = 2)]
    pub star: Star,
    pub submission_url: String,
    pub language_name: String,
    pub bonus_permille: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserSubmission {
    pub fn slot(&self) -> (u32, Star) {
        (self.day, self.star)
    }
}
