//! Random pairings for the opening round

use crate::types::{Player, RoundPairing};
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle the field and pair neighbours: 0 v 1, 2 v 3, ...
///
/// With an odd field the last player in the shuffled order gets the bye.
/// The shuffle draws from `rng`, so a seeded generator gives reproducible output.
pub fn generate_first_round_pairings<R: Rng + ?Sized>(
    players: &[Player],
    rng: &mut R,
) -> Vec<RoundPairing> {
    let mut shuffled: Vec<&Player> = players.iter().collect();
    shuffled.shuffle(rng);

    shuffled
        .chunks(2)
        .map(|boards| RoundPairing {
            white: boards[0].id.clone(),
            black: boards.get(1).map(|p| p.id.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn field(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{i}"), 1200 + i as i32))
            .collect()
    }

    #[test]
    fn test_even_field_has_no_bye() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pairings = generate_first_round_pairings(&field(8), &mut rng);

        assert_eq!(pairings.len(), 4);
        assert!(pairings.iter().all(|p| !p.is_bye()));
    }

    #[test]
    fn test_odd_field_has_one_bye_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pairings = generate_first_round_pairings(&field(5), &mut rng);

        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings.iter().filter(|p| p.is_bye()).count(), 1);
        assert!(pairings.last().unwrap().is_bye());
    }

    #[test]
    fn test_every_player_appears_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let players = field(11);
        let pairings = generate_first_round_pairings(&players, &mut rng);

        let mut seen = HashSet::new();
        for pairing in &pairings {
            assert!(seen.insert(pairing.white.clone()));
            if let Some(black) = &pairing.black {
                assert_ne!(&pairing.white, black);
                assert!(seen.insert(black.clone()));
            }
        }
        assert_eq!(seen.len(), players.len());
    }

    #[test]
    fn test_same_seed_same_pairings() {
        let players = field(10);
        let first = generate_first_round_pairings(&players, &mut ChaCha8Rng::seed_from_u64(99));
        let second = generate_first_round_pairings(&players, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_single_player() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate_first_round_pairings(&[], &mut rng).is_empty());

        let pairings = generate_first_round_pairings(&field(1), &mut rng);
        assert_eq!(pairings, vec![RoundPairing::bye("p0")]);
    }
}
