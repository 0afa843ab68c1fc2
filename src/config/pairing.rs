//! Pairing configuration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Controls the random source used for first-round shuffles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Fixed seed for reproducible first rounds; entropy when unset
    pub seed: Option<u64>,
}

impl PairingConfig {
    /// Build the random source for first-round shuffles
    pub fn create_rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
