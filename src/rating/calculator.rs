//! Rating calculator trait and implementations
//!
//! The tournament manager rates finished games through this trait so that
//! unrated events can swap in a calculator that leaves ratings untouched.

use crate::config::RatingConfig;
use crate::error::{Result, TournamentError};
use crate::rating::elo::{apply_decisive_result, apply_draw_result};
use crate::types::{GameOutcome, RatingChange};

/// Trait for calculating rating changes after a game
pub trait RatingCalculator: Send + Sync {
    /// Rate a finished game between white and black
    ///
    /// # Arguments
    /// * `white_rating` - White's rating before the game
    /// * `black_rating` - Black's rating before the game
    /// * `outcome` - Game outcome; byes are not rateable
    fn rate_game(
        &self,
        white_rating: i32,
        black_rating: i32,
        outcome: GameOutcome,
    ) -> Result<RatingChange>;

    /// Get the initial rating for players registered without one
    fn initial_rating(&self) -> i32;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

fn reject_bye() -> anyhow::Error {
    TournamentError::InvalidResult {
        reason: "a bye has no opponent to rate against".to_string(),
    }
    .into()
}

/// Elo rating calculator with a fixed K-factor
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo calculator
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn rate_game(
        &self,
        white_rating: i32,
        black_rating: i32,
        outcome: GameOutcome,
    ) -> Result<RatingChange> {
        let k_factor = self.config.k_factor;

        let change = match outcome {
            GameOutcome::WhiteWins => {
                let update = apply_decisive_result(white_rating, black_rating, k_factor);
                RatingChange {
                    white_before: white_rating,
                    white_after: update.winner_new_rating,
                    black_before: black_rating,
                    black_after: update.loser_new_rating,
                    delta: update.delta,
                }
            }
            GameOutcome::BlackWins => {
                let update = apply_decisive_result(black_rating, white_rating, k_factor);
                RatingChange {
                    white_before: white_rating,
                    white_after: update.loser_new_rating,
                    black_before: black_rating,
                    black_after: update.winner_new_rating,
                    delta: update.delta,
                }
            }
            GameOutcome::Draw => {
                let update = apply_draw_result(white_rating, black_rating, k_factor);
                RatingChange {
                    white_before: white_rating,
                    white_after: update.new_rating_a,
                    black_before: black_rating,
                    black_after: update.new_rating_b,
                    delta: update.new_rating_a - white_rating,
                }
            }
            GameOutcome::Bye => return Err(reject_bye()),
        };

        Ok(change)
    }

    fn initial_rating(&self) -> i32 {
        self.config.default_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k_factor,
            "initial_rating": self.config.default_rating
        })
    }
}

/// Calculator for unrated events: scores move, ratings never do
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: i32,
}

impl NoOpRatingCalculator {
    pub fn new(initial_rating: i32) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(RatingConfig::default().default_rating)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn rate_game(
        &self,
        white_rating: i32,
        black_rating: i32,
        outcome: GameOutcome,
    ) -> Result<RatingChange> {
        if outcome == GameOutcome::Bye {
            return Err(reject_bye());
        }

        Ok(RatingChange {
            white_before: white_rating,
            white_after: white_rating,
            black_before: black_rating,
            black_after: black_rating,
            delta: 0,
        })
    }

    fn initial_rating(&self) -> i32 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating
        })
    }
}
