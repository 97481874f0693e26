pub mod auth;
pub mod leaderboard;
pub mod modifiers;
pub mod submissions;
