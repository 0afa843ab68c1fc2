//! Tournament manager: the orchestrator around the pairing and rating engine
//!
//! Loads snapshots from the store, runs the stateless engine, and commits the
//! results. All round-advancing work for one tournament is serialized behind a
//! per-tournament async lock, and every commit is conditional in the store, so
//! a round is paired at most once even under duplicate requests.

use crate::config::{AppConfig, TournamentSettings};
use crate::error::{Result, TournamentError};
use crate::metrics::MetricsCollector;
use crate::pairing::{pair_round, standings_order};
use crate::rating::{EloRatingCalculator, NoOpRatingCalculator, RatingCalculator};
use crate::tournament::state::TournamentStatus;
use crate::tournament::storage::{ResultCommit, RoundCommit, TournamentStore};
use crate::types::{GameOutcome, Pairing, PairingId, Player, Tournament, TournamentId};
use crate::utils::{current_timestamp, generate_player_id, generate_tournament_id};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// The main tournament manager
pub struct TournamentManager {
    /// Backing store for tournaments, players and pairings
    store: Arc<dyn TournamentStore>,
    /// Rating calculator for reported games
    rating_calculator: Arc<dyn RatingCalculator>,
    /// Metrics collector for recording pairing and result data
    metrics_collector: Arc<MetricsCollector>,
    /// Tournament defaults
    settings: TournamentSettings,
    /// Random source for first-round shuffles
    rng: Mutex<ChaCha8Rng>,
    /// One async lock per tournament guarding round transitions
    round_locks: Mutex<HashMap<TournamentId, Arc<tokio::sync::Mutex<()>>>>,
}

impl TournamentManager {
    /// Create a manager from application configuration
    pub fn new(store: Arc<dyn TournamentStore>, config: &AppConfig) -> Result<Self> {
        let rating_calculator: Arc<dyn RatingCalculator> = if config.rating.rated {
            Arc::new(EloRatingCalculator::new(config.rating.clone())?)
        } else {
            Arc::new(NoOpRatingCalculator::new(config.rating.default_rating))
        };

        let metrics_collector = Arc::new(MetricsCollector::new()?);

        Ok(Self::with_components(
            store,
            rating_calculator,
            metrics_collector,
            config.tournament.clone(),
            config.pairing.create_rng(),
        ))
    }

    /// Create with explicit collaborators
    pub fn with_components(
        store: Arc<dyn TournamentStore>,
        rating_calculator: Arc<dyn RatingCalculator>,
        metrics_collector: Arc<MetricsCollector>,
        settings: TournamentSettings,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            store,
            rating_calculator,
            metrics_collector,
            settings,
            rng: Mutex::new(rng),
            round_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }

    /// Create a new tournament for a club
    pub async fn create_tournament(
        &self,
        club_id: &str,
        name: &str,
        total_rounds: Option<u32>,
    ) -> Result<Tournament> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidTournament {
                reason: "Tournament name is required".to_string(),
            }
            .into());
        }

        let total_rounds = total_rounds.unwrap_or(self.settings.default_total_rounds);
        if total_rounds == 0 {
            return Err(TournamentError::InvalidTournament {
                reason: "A tournament needs at least one round".to_string(),
            }
            .into());
        }

        let tournament = Tournament {
            id: generate_tournament_id(),
            club_id: club_id.to_string(),
            name: name.to_string(),
            status: TournamentStatus::Pending,
            current_round: 0,
            total_rounds,
            created_at: current_timestamp(),
        };

        self.store.insert_tournament(tournament.clone()).await?;

        info!(
            "Created tournament '{}' ({}) for club '{}' - {} rounds",
            tournament.name, tournament.id, club_id, total_rounds
        );
        Ok(tournament)
    }

    /// Register a club member for a pending tournament
    pub async fn register_player(
        &self,
        tournament_id: TournamentId,
        member_id: &str,
        initial_rating: Option<i32>,
    ) -> Result<Player> {
        if member_id.trim().is_empty() {
            return Err(TournamentError::InvalidPlayer {
                reason: "Member ID is required".to_string(),
            }
            .into());
        }

        let rating = initial_rating.unwrap_or_else(|| self.rating_calculator.initial_rating());
        if rating <= 0 {
            return Err(TournamentError::InvalidPlayer {
                reason: format!("Initial rating must be positive, got {}", rating),
            }
            .into());
        }

        let lock = self.round_lock(tournament_id).await?;
        let _guard = lock.lock().await;

        let tournament = self.tournament(tournament_id).await?;
        if !tournament.status.accepts_registrations() {
            return Err(TournamentError::RegistrationClosed { tournament_id }.into());
        }

        let players = self.store.players(tournament_id).await?;
        if players.iter().any(|p| p.member_id == member_id) {
            return Err(TournamentError::DuplicatePlayer {
                tournament_id,
                member_id: member_id.to_string(),
            }
            .into());
        }

        let player = Player {
            id: generate_player_id(),
            member_id: member_id.to_string(),
            initial_rating: rating,
            current_rating: rating,
            score: 0.0,
            registered_at: current_timestamp(),
        };
        self.store.insert_player(tournament_id, player.clone()).await?;

        info!(
            "Registered member '{}' as player {} in tournament {} - rating: {}",
            member_id, player.id, tournament_id, rating
        );
        Ok(player)
    }

    /// Get a tournament or fail with `TournamentNotFound`
    pub async fn tournament(&self, tournament_id: TournamentId) -> Result<Tournament> {
        self.store
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| TournamentError::TournamentNotFound { tournament_id }.into())
    }

    /// All tournaments run by a club
    pub async fn tournaments_for_club(&self, club_id: &str) -> Result<Vec<Tournament>> {
        self.store.tournaments_for_club(club_id).await
    }

    /// Players in registration order
    pub async fn players(&self, tournament_id: TournamentId) -> Result<Vec<Player>> {
        self.tournament(tournament_id).await?;
        self.store.players(tournament_id).await
    }

    /// Every pairing of the tournament
    pub async fn pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>> {
        self.tournament(tournament_id).await?;
        self.store.pairings(tournament_id).await
    }

    /// Pairings of a single round
    pub async fn round_pairings(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> Result<Vec<Pairing>> {
        Ok(self
            .pairings(tournament_id)
            .await?
            .into_iter()
            .filter(|p| p.round == round)
            .collect())
    }

    /// Players ranked by score, then rating
    pub async fn standings(&self, tournament_id: TournamentId) -> Result<Vec<Player>> {
        let players = self.players(tournament_id).await?;
        Ok(standings_order(&players).into_iter().cloned().collect())
    }

    /// Pair `round` of a tournament.
    ///
    /// Succeeds at most once per (tournament, round). The round must be the one
    /// after the current round, and every result of the current round must be in.
    pub async fn generate_pairings(
        &self,
        tournament_id: TournamentId,
        round: u32,
    ) -> Result<Vec<Pairing>> {
        let lock = self.round_lock(tournament_id).await?;
        let _guard = lock.lock().await;

        let tournament = self.tournament(tournament_id).await?;
        if tournament.status == TournamentStatus::Completed {
            self.release_round_lock(tournament_id)?;
        }
        let prior_pairings = self.store.pairings(tournament_id).await?;
        let pending = prior_pairings
            .iter()
            .filter(|p| p.round == tournament.current_round && !p.is_complete())
            .count();

        let next_status = match tournament.status.begin_round(&tournament, round, pending) {
            Ok(status) => status,
            Err(e) => {
                warn!(
                    "Refusing to pair round {} of tournament {}: {}",
                    round, tournament_id, e
                );
                self.metrics_collector
                    .record_pairing_rejected(rejection_reason(&e));
                return Err(e);
            }
        };

        let mut players = self.store.players(tournament_id).await?;

        let timer = self.metrics_collector.start_timer();
        let round_pairings = {
            let mut rng = self.rng.lock().map_err(|_| TournamentError::InternalError {
                message: "Failed to acquire pairing rng lock".to_string(),
            })?;
            pair_round(round, &players, &prior_pairings, &mut *rng)
        };
        let duration = timer.stop();

        let pairings: Vec<Pairing> = round_pairings
            .into_iter()
            .map(|p| Pairing::from_round_pairing(tournament_id, round, p))
            .collect();

        let mut updated_players = Vec::new();
        for bye in pairings.iter().filter(|p| p.is_bye) {
            if let Some(player) = players.iter_mut().find(|p| p.id == bye.white) {
                player.score += GameOutcome::Bye.white_points();
                updated_players.push(player.clone());
            }
        }

        let byes = updated_players.len();
        let games = pairings.len() - byes;
        let open_games = pairings.iter().filter(|p| !p.is_complete()).count();
        let status = next_status.after_result(tournament.total_rounds, open_games);

        self.store
            .commit_round(RoundCommit {
                tournament_id,
                expected_round: tournament.current_round,
                round,
                status,
                pairings: pairings.clone(),
                updated_players,
            })
            .await?;
        if status == TournamentStatus::Completed {
            self.release_round_lock(tournament_id)?;
        }

        self.metrics_collector
            .record_round_paired(games, byes, duration);

        info!(
            "Paired round {} of tournament {} - {} games, {} byes, status: {}",
            round, tournament_id, games, byes, status
        );
        for pairing in &pairings {
            debug!(
                "Round {} board: {} vs {}",
                round,
                pairing.white,
                pairing.black.as_deref().unwrap_or("(bye)")
            );
        }

        Ok(pairings)
    }

    /// Record the result of a game and update both players.
    ///
    /// Returns the completed pairing with its rating change.
    pub async fn record_result(
        &self,
        pairing_id: PairingId,
        outcome: GameOutcome,
    ) -> Result<Pairing> {
        if outcome == GameOutcome::Bye {
            return Err(TournamentError::InvalidResult {
                reason: "byes are assigned by the pairing engine, not reported".to_string(),
            }
            .into());
        }

        let tournament_id = self.pairing(pairing_id).await?.tournament_id;
        let lock = self.round_lock(tournament_id).await?;
        let _guard = lock.lock().await;

        // Re-read under the lock so a concurrent report is seen
        let mut pairing = self.pairing(pairing_id).await?;
        if pairing.is_complete() && !pairing.is_bye {
            return Err(TournamentError::ResultAlreadyRecorded { pairing_id }.into());
        }
        let black_id = match (&pairing.black, pairing.is_bye) {
            (Some(black), false) => black.clone(),
            _ => {
                return Err(TournamentError::InvalidResult {
                    reason: format!("pairing {} is a bye", pairing_id),
                }
                .into())
            }
        };

        let tournament = self.tournament(tournament_id).await?;
        let players = self.store.players(tournament_id).await?;
        let mut white = find_player(&players, &pairing.white)?;
        let mut black = find_player(&players, &black_id)?;

        let change =
            self.rating_calculator
                .rate_game(white.current_rating, black.current_rating, outcome)?;

        white.current_rating = change.white_after;
        white.score += outcome.white_points();
        black.current_rating = change.black_after;
        black.score += outcome.black_points();

        pairing.outcome = Some(outcome);
        pairing.rating_change = Some(change.clone());

        let pending = self
            .store
            .pairings(tournament_id)
            .await?
            .iter()
            .filter(|p| p.round == pairing.round && p.id != pairing_id && !p.is_complete())
            .count();
        let status = tournament
            .status
            .after_result(tournament.total_rounds, pending);

        self.store
            .commit_result(ResultCommit {
                tournament_id,
                pairing: pairing.clone(),
                updated_players: vec![white, black],
                status,
            })
            .await?;
        if status == TournamentStatus::Completed {
            self.release_round_lock(tournament_id)?;
        }

        self.metrics_collector.record_result(outcome, change.delta);

        info!(
            "Recorded {} for round {} of tournament {}: {} {}→{}, {} {}→{}",
            outcome,
            pairing.round,
            tournament_id,
            pairing.white,
            change.white_before,
            change.white_after,
            black_id,
            change.black_before,
            change.black_after
        );
        if status != tournament.status {
            info!("Tournament {} is now {}", tournament_id, status);
        }

        Ok(pairing)
    }

    async fn pairing(&self, pairing_id: PairingId) -> Result<Pairing> {
        self.store
            .get_pairing(pairing_id)
            .await?
            .ok_or_else(|| TournamentError::PairingNotFound { pairing_id }.into())
    }

    /// Lock serializing round-advancing work for an existing tournament.
    ///
    /// Unknown tournaments fail before an entry is created. `Completed` is
    /// terminal, so a finished tournament gets an unshared lock instead of a
    /// table entry.
    async fn round_lock(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let tournament = self.tournament(tournament_id).await?;
        if tournament.status == TournamentStatus::Completed {
            return Ok(Arc::default());
        }

        let mut locks = self.lock_table()?;
        Ok(locks.entry(tournament_id).or_default().clone())
    }

    /// Drop the lock entry of a tournament that can no longer advance
    fn release_round_lock(&self, tournament_id: TournamentId) -> Result<()> {
        if self.lock_table()?.remove(&tournament_id).is_some() {
            debug!("Released round lock for finished tournament {}", tournament_id);
        }
        Ok(())
    }

    fn lock_table(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<TournamentId, Arc<tokio::sync::Mutex<()>>>>> {
        self.round_locks.lock().map_err(|_| {
            TournamentError::InternalError {
                message: "Failed to acquire round lock table".to_string(),
            }
            .into()
        })
    }
}

fn find_player(players: &[Player], player_id: &str) -> Result<Player> {
    players
        .iter()
        .find(|p| p.id == player_id)
        .cloned()
        .ok_or_else(|| {
            TournamentError::PlayerNotFound {
                player_id: player_id.to_string(),
            }
            .into()
        })
}

/// Metric label for a refused pairing request
fn rejection_reason(error: &anyhow::Error) -> &'static str {
    match error.downcast_ref::<TournamentError>() {
        Some(TournamentError::RoundAlreadyPaired { .. }) => "round_already_paired",
        Some(TournamentError::RoundOutOfSequence { .. }) => "round_out_of_sequence",
        Some(TournamentError::RoundNotComplete { .. }) => "round_not_complete",
        Some(TournamentError::TournamentFinished { .. }) => "tournament_finished",
        _ => "other",
    }
}
