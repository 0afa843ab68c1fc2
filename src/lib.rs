//! Club Swiss - Swiss-system pairing and Elo rating for chess-club tournaments
//!
//! This crate provides the pairing engine (random first round, greedy
//! score-bucket Swiss rounds after that), Elo rating updates, and a tournament
//! manager that drives them round by round against a pluggable store.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pairing;
pub mod rating;
pub mod tournament;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TournamentError};
pub use types::*;

// Re-export key components
pub use pairing::{generate_first_round_pairings, generate_swiss_pairings, pair_round};
pub use rating::{apply_decisive_result, apply_draw_result, expected_score};
pub use tournament::{InMemoryTournamentStore, TournamentManager, TournamentStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
