//! Tournament storage interface and in-memory implementation
//!
//! The real backing store lives outside this crate. Writes that advance a
//! tournament are conditional: a round commit only lands if the stored round
//! still matches the round the caller paired from, and a result commit only
//! lands if the pairing has no outcome yet.

use crate::error::{Result, TournamentError};
use crate::tournament::state::TournamentStatus;
use crate::types::{Pairing, PairingId, Player, Tournament, TournamentId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Everything written when a round is paired
#[derive(Debug, Clone, PartialEq)]
pub struct RoundCommit {
    pub tournament_id: TournamentId,
    /// `current_round` the pairings were computed from
    pub expected_round: u32,
    pub round: u32,
    pub status: TournamentStatus,
    pub pairings: Vec<Pairing>,
    /// Players whose score changed (bye credits)
    pub updated_players: Vec<Player>,
}

/// Everything written when a game result is reported
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCommit {
    pub tournament_id: TournamentId,
    pub pairing: Pairing,
    pub updated_players: Vec<Player>,
    pub status: TournamentStatus,
}

/// Trait for tournament storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Store a newly created tournament
    async fn insert_tournament(&self, tournament: Tournament) -> Result<()>;

    /// Get a tournament by id
    async fn get_tournament(&self, tournament_id: TournamentId) -> Result<Option<Tournament>>;

    /// All tournaments run by a club
    async fn tournaments_for_club(&self, club_id: &str) -> Result<Vec<Tournament>>;

    /// Add a registered player to a tournament
    async fn insert_player(&self, tournament_id: TournamentId, player: Player) -> Result<()>;

    /// Players in registration order
    async fn players(&self, tournament_id: TournamentId) -> Result<Vec<Player>>;

    /// Every pairing of every round, in creation order
    async fn pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>>;

    /// Look up a single pairing
    async fn get_pairing(&self, pairing_id: PairingId) -> Result<Option<Pairing>>;

    /// Persist a paired round if the tournament is still at `expected_round`
    async fn commit_round(&self, commit: RoundCommit) -> Result<()>;

    /// Persist a reported result if the pairing is still open
    async fn commit_result(&self, commit: ResultCommit) -> Result<()>;
}

#[derive(Debug, Default)]
struct StoreState {
    tournaments: HashMap<TournamentId, Tournament>,
    players: HashMap<TournamentId, Vec<Player>>,
    pairings: HashMap<TournamentId, Vec<Pairing>>,
    pairing_index: HashMap<PairingId, TournamentId>,
}

impl StoreState {
    fn tournament_mut(&mut self, tournament_id: TournamentId) -> Result<&mut Tournament> {
        self.tournaments
            .get_mut(&tournament_id)
            .ok_or_else(|| TournamentError::TournamentNotFound { tournament_id }.into())
    }

    fn replace_players(&mut self, tournament_id: TournamentId, updated: Vec<Player>) -> Result<()> {
        let players = self.players.entry(tournament_id).or_default();
        if let Some(missing) = updated
            .iter()
            .find(|u| !players.iter().any(|p| p.id == u.id))
        {
            return Err(TournamentError::PlayerNotFound {
                player_id: missing.id.clone(),
            }
            .into());
        }

        for player in updated {
            if let Some(slot) = players.iter_mut().find(|p| p.id == player.id) {
                *slot = player;
            }
        }
        Ok(())
    }
}

/// In-memory tournament storage implementation
#[derive(Debug, Default)]
pub struct InMemoryTournamentStore {
    state: RwLock<StoreState>,
}

impl InMemoryTournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| {
            TournamentError::StorageError {
                message: "Failed to acquire store read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| {
            TournamentError::StorageError {
                message: "Failed to acquire store write lock".to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl TournamentStore for InMemoryTournamentStore {
    async fn insert_tournament(&self, tournament: Tournament) -> Result<()> {
        let mut state = self.write()?;
        state.players.entry(tournament.id).or_default();
        state.pairings.entry(tournament.id).or_default();
        state.tournaments.insert(tournament.id, tournament);
        Ok(())
    }

    async fn get_tournament(&self, tournament_id: TournamentId) -> Result<Option<Tournament>> {
        Ok(self.read()?.tournaments.get(&tournament_id).cloned())
    }

    async fn tournaments_for_club(&self, club_id: &str) -> Result<Vec<Tournament>> {
        let state = self.read()?;
        let mut tournaments: Vec<Tournament> = state
            .tournaments
            .values()
            .filter(|t| t.club_id == club_id)
            .cloned()
            .collect();
        tournaments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tournaments)
    }

    async fn insert_player(&self, tournament_id: TournamentId, player: Player) -> Result<()> {
        let mut state = self.write()?;
        if !state.tournaments.contains_key(&tournament_id) {
            return Err(TournamentError::TournamentNotFound { tournament_id }.into());
        }
        state.players.entry(tournament_id).or_default().push(player);
        Ok(())
    }

    async fn players(&self, tournament_id: TournamentId) -> Result<Vec<Player>> {
        Ok(self
            .read()?
            .players
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>> {
        Ok(self
            .read()?
            .pairings
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_pairing(&self, pairing_id: PairingId) -> Result<Option<Pairing>> {
        let state = self.read()?;
        let pairing = state
            .pairing_index
            .get(&pairing_id)
            .and_then(|tournament_id| state.pairings.get(tournament_id))
            .and_then(|pairings| pairings.iter().find(|p| p.id == pairing_id))
            .cloned();
        Ok(pairing)
    }

    async fn commit_round(&self, commit: RoundCommit) -> Result<()> {
        let mut state = self.write()?;

        if state.tournament_mut(commit.tournament_id)?.current_round != commit.expected_round {
            return Err(TournamentError::RoundAlreadyPaired {
                tournament_id: commit.tournament_id,
                round: commit.round,
            }
            .into());
        }

        state.replace_players(commit.tournament_id, commit.updated_players)?;
        let tournament = state.tournament_mut(commit.tournament_id)?;
        tournament.current_round = commit.round;
        tournament.status = commit.status;
        for pairing in &commit.pairings {
            state.pairing_index.insert(pairing.id, commit.tournament_id);
        }
        state
            .pairings
            .entry(commit.tournament_id)
            .or_default()
            .extend(commit.pairings);

        Ok(())
    }

    async fn commit_result(&self, commit: ResultCommit) -> Result<()> {
        let mut state = self.write()?;

        let pairing_id = commit.pairing.id;
        let already_recorded = state
            .pairings
            .get(&commit.tournament_id)
            .and_then(|pairings| pairings.iter().find(|p| p.id == pairing_id))
            .map(Pairing::is_complete)
            .ok_or(TournamentError::PairingNotFound { pairing_id })?;
        if already_recorded {
            return Err(TournamentError::ResultAlreadyRecorded { pairing_id }.into());
        }

        state.replace_players(commit.tournament_id, commit.updated_players)?;
        state.tournament_mut(commit.tournament_id)?.status = commit.status;
        if let Some(stored) = state
            .pairings
            .get_mut(&commit.tournament_id)
            .and_then(|pairings| pairings.iter_mut().find(|p| p.id == pairing_id))
        {
            *stored = commit.pairing;
        }

        Ok(())
    }
}
