pub mod common;
pub mod leaderboard;
pub mod modifier;
pub mod submission;
pub mod user;
