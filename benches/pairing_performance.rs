//! Performance benchmarks for pairing and rating calculations

use club_swiss::config::AppConfig;
use club_swiss::pairing::{generate_first_round_pairings, generate_swiss_pairings};
use club_swiss::rating::{apply_decisive_result, apply_draw_result};
use club_swiss::tournament::{InMemoryTournamentStore, TournamentManager};
use club_swiss::types::{GameOutcome, Pairing, Player, RoundPairing};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use uuid::Uuid;

fn bench_field(size: usize) -> Vec<Player> {
    (0..size)
        .map(|i| {
            Player::new(format!("player_{}", i), 1200 + ((i * 37) % 900) as i32)
                .with_score((i % 7) as f64 / 2.0)
        })
        .collect()
}

/// Two prior rounds of neighbour pairings
fn bench_history(players: &[Player]) -> Vec<Pairing> {
    let mut history = Vec::new();
    for (round, offset) in [(1u32, 0usize), (2, 1)] {
        for i in (offset..players.len().saturating_sub(1)).step_by(2) {
            history.push(Pairing::from_round_pairing(
                Uuid::nil(),
                round,
                RoundPairing::game(players[i].id.clone(), players[i + 1].id.clone()),
            ));
        }
    }
    history
}

fn bench_rating_calculations(c: &mut Criterion) {
    c.bench_function("elo_decisive_update", |b| {
        b.iter(|| apply_decisive_result(black_box(1650), black_box(1480), black_box(32.0)))
    });

    c.bench_function("elo_draw_update", |b| {
        b.iter(|| apply_draw_result(black_box(1650), black_box(1480), black_box(32.0)))
    });
}

fn bench_first_round(c: &mut Criterion) {
    let players = bench_field(64);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("first_round_64_players", |b| {
        b.iter(|| black_box(generate_first_round_pairings(&players, &mut rng)))
    });
}

fn bench_swiss_round(c: &mut Criterion) {
    let players = bench_field(64);
    let history = bench_history(&players);

    c.bench_function("swiss_round_64_players", |b| {
        b.iter(|| black_box(generate_swiss_pairings(&players, &history)))
    });
}

fn bench_full_tournament(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut config = AppConfig::default();
    config.pairing.seed = Some(7);

    c.bench_function("five_round_tournament_32_players", |b| {
        b.iter(|| {
            rt.block_on(async {
                let manager =
                    TournamentManager::new(Arc::new(InMemoryTournamentStore::new()), &config)
                        .unwrap();
                let tournament = manager
                    .create_tournament("bench", "Bench Swiss", Some(5))
                    .await
                    .unwrap();
                for i in 0..32 {
                    manager
                        .register_player(tournament.id, &format!("member_{}", i), Some(1200 + i * 20))
                        .await
                        .unwrap();
                }

                for round in 1..=5 {
                    let pairings = manager.generate_pairings(tournament.id, round).await.unwrap();
                    for pairing in pairings.iter().filter(|p| !p.is_bye) {
                        manager
                            .record_result(pairing.id, GameOutcome::WhiteWins)
                            .await
                            .unwrap();
                    }
                }

                black_box(manager.standings(tournament.id).await)
            })
        })
    });
}

criterion_group!(
    benches,
    bench_rating_calculations,
    bench_first_round,
    bench_swiss_round,
    bench_full_tournament
);
criterion_main!(benches);
