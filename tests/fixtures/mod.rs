//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use club_swiss::config::TournamentSettings;
use club_swiss::metrics::MetricsCollector;
use club_swiss::rating::EloRatingCalculator;
use club_swiss::tournament::{InMemoryTournamentStore, TournamentManager};
use club_swiss::types::{Pairing, Player, RoundPairing, TournamentId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Manager over a fresh in-memory store with a seeded first-round shuffle
pub fn seeded_manager(seed: u64) -> TournamentManager {
    TournamentManager::with_components(
        Arc::new(InMemoryTournamentStore::new()),
        Arc::new(EloRatingCalculator::default()),
        Arc::new(MetricsCollector::new().expect("metrics collector")),
        TournamentSettings::default(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Create a tournament and register `ratings.len()` members
pub async fn tournament_with_field(
    manager: &TournamentManager,
    total_rounds: u32,
    ratings: &[i32],
) -> TournamentId {
    let tournament = manager
        .create_tournament("test-club", "Fixture Open", Some(total_rounds))
        .await
        .expect("create tournament");

    for (i, rating) in ratings.iter().enumerate() {
        manager
            .register_player(tournament.id, &format!("member-{i:02}"), Some(*rating))
            .await
            .expect("register player");
    }

    tournament.id
}

/// Field of players named p0, p1, ... with the given scores and descending ratings
pub fn scored_field(scores: &[f64]) -> Vec<Player> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| Player::new(format!("p{i}"), 2000 - 10 * i as i32).with_score(*score))
        .collect()
}

/// History in which every pair of the given players has already met
pub fn round_robin_history(players: &[Player]) -> Vec<Pairing> {
    let mut history = Vec::new();
    for (i, white) in players.iter().enumerate() {
        for black in &players[i + 1..] {
            history.push(Pairing::from_round_pairing(
                Uuid::nil(),
                1,
                RoundPairing::game(white.id.clone(), black.id.clone()),
            ));
        }
    }
    history
}
