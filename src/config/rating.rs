//! Rating system configuration

use crate::error::{Result, TournamentError};
use crate::rating::DEFAULT_K_FACTOR;
use serde::{Deserialize, Serialize};

/// Default rating for players registered without one
pub const DEFAULT_RATING: i32 = 1200;

/// Elo settings applied to every rated game in a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub default_rating: i32,
    pub k_factor: f64,
    /// Unrated events still keep score but never move ratings
    pub rated: bool,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            k_factor: DEFAULT_K_FACTOR,
            rated: true,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(TournamentError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            }
            .into());
        }

        if self.default_rating <= 0 {
            return Err(TournamentError::ConfigurationError {
                message: format!(
                    "Default rating must be positive, got {}",
                    self.default_rating
                ),
            }
            .into());
        }

        Ok(())
    }
}
