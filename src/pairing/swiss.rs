//! Greedy score-bucket Swiss pairings for rounds after the first
//!
//! Players are ranked by score then rating, and each unpaired player takes the
//! first lower-ranked unpaired player they have not met whose score is within
//! [`SCORE_WINDOW`]. A player with no such candidate receives a bye. Rematches
//! are never forced.
//!
//! This is a forward greedy scan, not a maximum matching: once early boards
//! consume the legal opponents of a later player, that player gets a bye even
//! if a different assignment would have paired everyone. Several byes in one
//! round are possible late in a small tournament.

use crate::pairing::history::PairingHistory;
use crate::types::{Pairing, Player, RoundPairing};
use crate::utils::scores_within_window;
use std::collections::HashSet;
use tracing::debug;

/// Largest score gap allowed between two opponents
pub const SCORE_WINDOW: f64 = 1.0;

/// Players in standings order: score descending, then rating descending.
///
/// The sort is stable, so exact ties keep their input order.
pub fn standings_order(players: &[Player]) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.current_rating.cmp(&a.current_rating))
    });
    sorted
}

/// Pair a Swiss round given the full pairing history of the tournament.
///
/// The higher-ranked player of each board takes white. Deterministic for a
/// given input order.
pub fn generate_swiss_pairings(players: &[Player], prior_pairings: &[Pairing]) -> Vec<RoundPairing> {
    let history = PairingHistory::from_pairings(prior_pairings);
    let sorted = standings_order(players);

    let mut paired: HashSet<&str> = HashSet::with_capacity(sorted.len());
    let mut pairings = Vec::with_capacity(sorted.len() / 2 + 1);

    for (i, player) in sorted.iter().enumerate() {
        if paired.contains(player.id.as_str()) {
            continue;
        }

        let opponent = sorted[i + 1..].iter().find(|candidate| {
            candidate.id != player.id
                && !paired.contains(candidate.id.as_str())
                && !history.have_played(&player.id, &candidate.id)
                && scores_within_window(player.score, candidate.score, SCORE_WINDOW)
        });

        paired.insert(player.id.as_str());
        match opponent {
            Some(opponent) => {
                paired.insert(opponent.id.as_str());
                pairings.push(RoundPairing::game(player.id.clone(), opponent.id.clone()));
            }
            None => {
                debug!(
                    "No eligible opponent for '{}' (score {:.1}), awarding bye",
                    player.id, player.score
                );
                pairings.push(RoundPairing::bye(player.id.clone()));
            }
        }
    }

    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn history(games: &[(&str, &str)]) -> Vec<Pairing> {
        games
            .iter()
            .map(|(white, black)| {
                Pairing::from_round_pairing(Uuid::nil(), 1, RoundPairing::game(*white, *black))
            })
            .collect()
    }

    #[test]
    fn test_top_two_and_bottom_two() {
        let players = vec![
            Player::new("d", 1300).with_score(1.0),
            Player::new("a", 1500).with_score(2.0),
            Player::new("c", 1400).with_score(1.0),
            Player::new("b", 1200).with_score(1.5),
        ];

        let pairings = generate_swiss_pairings(&players, &[]);
        assert_eq!(
            pairings,
            vec![RoundPairing::game("a", "b"), RoundPairing::game("c", "d")]
        );
    }

    #[test]
    fn test_rating_breaks_score_ties() {
        let players = vec![
            Player::new("low", 1100).with_score(1.0),
            Player::new("high", 1700).with_score(1.0),
        ];

        let pairings = generate_swiss_pairings(&players, &[]);
        assert_eq!(pairings, vec![RoundPairing::game("high", "low")]);
    }

    #[test]
    fn test_exact_ties_keep_input_order() {
        let players = vec![
            Player::new("first", 1500).with_score(1.0),
            Player::new("second", 1500).with_score(1.0),
            Player::new("third", 1500).with_score(1.0),
            Player::new("fourth", 1500).with_score(1.0),
        ];

        let pairings = generate_swiss_pairings(&players, &[]);
        assert_eq!(
            pairings,
            vec![
                RoundPairing::game("first", "second"),
                RoundPairing::game("third", "fourth"),
            ]
        );
    }

    #[test]
    fn test_rematch_skipped_for_next_candidate() {
        let players = vec![
            Player::new("a", 1600).with_score(1.0),
            Player::new("b", 1500).with_score(1.0),
            Player::new("c", 1400).with_score(0.0),
            Player::new("d", 1300).with_score(0.0),
        ];
        let prior = history(&[("a", "b"), ("d", "c")]);

        let pairings = generate_swiss_pairings(&players, &prior);
        assert_eq!(
            pairings,
            vec![RoundPairing::game("a", "c"), RoundPairing::game("b", "d")]
        );
    }

    #[test]
    fn test_score_window_excludes_distant_players() {
        let players = vec![
            Player::new("leader", 1500).with_score(3.0),
            Player::new("trailer", 1500).with_score(1.5),
        ];

        let pairings = generate_swiss_pairings(&players, &[]);
        assert_eq!(
            pairings,
            vec![RoundPairing::bye("leader"), RoundPairing::bye("trailer")]
        );
    }

    #[test]
    fn test_everyone_has_met_gives_all_byes() {
        let players = vec![
            Player::new("a", 1500).with_score(1.0),
            Player::new("b", 1400).with_score(1.0),
            Player::new("c", 1300).with_score(1.0),
        ];
        let prior = history(&[("a", "b"), ("b", "c"), ("c", "a")]);

        let pairings = generate_swiss_pairings(&players, &prior);
        assert_eq!(pairings.len(), 3);
        assert!(pairings.iter().all(|p| p.is_bye()));
    }

    #[test]
    fn test_greedy_scan_can_strand_a_player() {
        // a takes b; c and d have met, so both are left with byes even though
        // a v c and b v d would have paired everyone
        let players = vec![
            Player::new("a", 1800).with_score(1.0),
            Player::new("b", 1700).with_score(1.0),
            Player::new("c", 1600).with_score(1.0),
            Player::new("d", 1500).with_score(1.0),
        ];
        let prior = history(&[("c", "d")]);

        let pairings = generate_swiss_pairings(&players, &prior);
        assert_eq!(
            pairings,
            vec![
                RoundPairing::game("a", "b"),
                RoundPairing::bye("c"),
                RoundPairing::bye("d"),
            ]
        );
    }

    #[test]
    fn test_empty_field() {
        assert!(generate_swiss_pairings(&[], &[]).is_empty());
    }

    #[test]
    fn test_duplicate_ids_never_self_paired() {
        let players = vec![
            Player::new("same", 1500).with_score(1.0),
            Player::new("same", 1500).with_score(1.0),
        ];

        let pairings = generate_swiss_pairings(&players, &[]);
        assert_eq!(pairings, vec![RoundPairing::bye("same")]);
    }
}
