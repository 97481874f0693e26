pub mod error;
pub mod modifiers;
pub mod sources;
pub mod sync;
pub mod traits;

pub use error::{ImporterError, Result};
pub use traits::LeaderboardSource;

pub use sources::aoc::{AdventOfCodeSource, AocClient, AocConfig};
