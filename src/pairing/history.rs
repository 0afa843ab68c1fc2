//! Lookup of who has already met whom in a tournament

use crate::types::{Pairing, PlayerId};
use std::collections::HashSet;

/// Unordered set of opponent pairs taken from prior rounds
#[derive(Debug, Clone, Default)]
pub struct PairingHistory {
    met: HashSet<(PlayerId, PlayerId)>,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the history from every prior pairing; byes are ignored
    pub fn from_pairings(pairings: &[Pairing]) -> Self {
        let mut history = Self::new();
        for pairing in pairings {
            if let Some(black) = &pairing.black {
                history.record(&pairing.white, black);
            }
        }
        history
    }

    /// Record that two players have met, in either colour order
    pub fn record(&mut self, white: &str, black: &str) {
        self.met.insert(Self::key(white, black));
    }

    /// Whether the two players have already been paired against each other
    pub fn have_played(&self, player1: &str, player2: &str) -> bool {
        self.met.contains(&Self::key(player1, player2))
    }

    /// Number of distinct games recorded
    pub fn len(&self) -> usize {
        self.met.len()
    }

    pub fn is_empty(&self) -> bool {
        self.met.is_empty()
    }

    fn key(a: &str, b: &str) -> (PlayerId, PlayerId) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}
