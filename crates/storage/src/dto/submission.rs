use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating or updating a submission.
///
/// Only shape limits are checked here; the ledger applies the ordered
/// business validation (star, url, day, language).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmissionRequest {
    pub day: i64,

    pub star: i64,

    #[validate(length(max = 64, message = "Language name must be at most 64 characters"))]
    pub language: String,

    #[validate(length(max = 2048, message = "Submission url must be at most 2048 characters"))]
    pub submission_url: String,
}
