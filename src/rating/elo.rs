//! Elo rating updates for two-player games
//!
//! Pure functions over integer ratings. The logistic expectation comes from the
//! skillratings crate; rounding and the per-side update rules are local.
//!
//! Winner and loser deltas on a decisive game are rounded independently, so
//! they are not guaranteed to be equal and opposite.

use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score as elo_expected_score, EloRating};

/// Default K-factor for rating updates
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// New ratings after a decisive game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisiveRatingUpdate {
    pub winner_new_rating: i32,
    pub loser_new_rating: i32,
    /// Points gained by the winner
    pub delta: i32,
}

/// New ratings after a drawn game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRatingUpdate {
    pub new_rating_a: i32,
    pub new_rating_b: i32,
}

/// Expected score of a player rated `rating_a` against one rated `rating_b`
///
/// Standard logistic curve: `1 / (1 + 10^((b - a) / 400))`, always in (0, 1).
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    let (expected_a, _) = elo_expected_score(
        &EloRating {
            rating: f64::from(rating_a),
        },
        &EloRating {
            rating: f64::from(rating_b),
        },
    );
    expected_a
}

/// Apply a decisive result with the given K-factor.
///
/// The K-factor is not validated.
pub fn apply_decisive_result(
    winner_rating: i32,
    loser_rating: i32,
    k_factor: f64,
) -> DecisiveRatingUpdate {
    let delta = round_points(k_factor * (1.0 - expected_score(winner_rating, loser_rating)));
    let loser_loss = round_points(k_factor * expected_score(loser_rating, winner_rating));

    DecisiveRatingUpdate {
        winner_new_rating: winner_rating + delta,
        loser_new_rating: loser_rating - loser_loss,
        delta,
    }
}

/// Apply a drawn result with the given K-factor
pub fn apply_draw_result(rating_a: i32, rating_b: i32, k_factor: f64) -> DrawRatingUpdate {
    let change_a = round_points(k_factor * (0.5 - expected_score(rating_a, rating_b)));
    let change_b = round_points(k_factor * (0.5 - expected_score(rating_b, rating_a)));

    DrawRatingUpdate {
        new_rating_a: rating_a + change_a,
        new_rating_b: rating_b + change_b,
    }
}

/// Round to the nearest whole point, halves toward positive infinity
fn round_points(points: f64) -> i32 {
    (points + 0.5).floor() as i32
}
