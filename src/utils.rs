//! Utility functions for the tournament service

use crate::types::{PairingId, PlayerId, TournamentId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique tournament ID
pub fn generate_tournament_id() -> TournamentId {
    Uuid::new_v4()
}

/// Generate a new unique pairing ID
pub fn generate_pairing_id() -> PairingId {
    Uuid::new_v4()
}

/// Generate a new unique player ID
pub fn generate_player_id() -> PlayerId {
    Uuid::new_v4().to_string()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Calculate the absolute difference between two tournament scores
pub fn score_difference(score1: f64, score2: f64) -> f64 {
    (score1 - score2).abs()
}

/// Check if two scores are within the given window
pub fn scores_within_window(score1: f64, score2: f64, window: f64) -> bool {
    score_difference(score1, score2) <= window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_tournament_id();
        let id2 = generate_tournament_id();
        assert_ne!(id1, id2);

        assert_ne!(generate_pairing_id(), generate_pairing_id());
        assert_ne!(generate_player_id(), generate_player_id());
    }

    #[test]
    fn test_score_difference() {
        assert_eq!(score_difference(2.0, 1.5), 0.5);
        assert_eq!(score_difference(1.5, 2.0), 0.5);
        assert_eq!(score_difference(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_scores_within_window() {
        assert!(scores_within_window(2.0, 1.0, 1.0));
        assert!(!scores_within_window(2.5, 1.0, 1.0));
        assert!(scores_within_window(0.0, 0.0, 0.0));
    }
}
