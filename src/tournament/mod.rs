//! Tournament lifecycle: round state machine, storage and orchestration
//!
//! This module owns everything stateful; the pairing and rating engine it
//! drives is pure.

pub mod manager;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use manager::TournamentManager;
pub use state::TournamentStatus;
pub use storage::{InMemoryTournamentStore, ResultCommit, RoundCommit, TournamentStore};
