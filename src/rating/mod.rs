//! Elo rating calculations
//!
//! This module provides the pure two-player Elo update functions and the
//! calculator trait the tournament manager uses to rate reported games.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{EloRatingCalculator, NoOpRatingCalculator, RatingCalculator};
pub use elo::{
    apply_decisive_result, apply_draw_result, expected_score, DecisiveRatingUpdate,
    DrawRatingUpdate, DEFAULT_K_FACTOR,
};
