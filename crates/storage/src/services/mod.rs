pub mod catalog;
pub mod identity;
pub mod leaderboard;
pub mod scoring;
pub mod submission_ledger;

pub use submission_ledger::{NeedsRecompute, SubmissionLedger};
