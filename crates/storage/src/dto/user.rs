use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for pairing the caller's GitHub account with a
/// leaderboard member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LinkAccountRequest {
    /// Advent of Code user id, as shown on the private leaderboard page
    #[validate(range(min = 1, message = "aoc_id must be a positive number"))]
    pub aoc_id: i64,
}
