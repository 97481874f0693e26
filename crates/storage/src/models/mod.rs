mod completion;
mod day_count;
mod leaderboard;
mod modifier;
mod submission;
mod user;

pub use completion::{Completion, CompletionSet, Star, decode_slot, encode_slot};
pub use day_count::{estimate_day_count, is_valid_day};
pub use leaderboard::{LeaderboardEntry, LeaderboardRow, LeaderboardSnapshot, SnapshotMember};
pub use modifier::{SubmissionModifier, format_bonus};
pub use submission::UserSubmission;
pub use user::User;
