//! Common types used throughout the tournament service

use crate::tournament::state::TournamentStatus;
use crate::utils::{current_timestamp, generate_pairing_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered tournament player
pub type PlayerId = String;

/// Unique identifier for tournaments
pub type TournamentId = Uuid;

/// Unique identifier for stored pairings
pub type PairingId = Uuid;

/// Identifier of the club that owns a tournament
pub type ClubId = String;

/// A player entered in a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Club member this entry belongs to
    pub member_id: String,
    pub initial_rating: i32,
    pub current_rating: i32,
    /// Tournament points: win = 1, draw = 0.5, loss = 0, bye = 1
    pub score: f64,
    pub registered_at: DateTime<Utc>,
}

impl Player {
    /// Create an unscored player whose member id equals the player id
    pub fn new(id: impl Into<PlayerId>, rating: i32) -> Self {
        let id = id.into();
        Self {
            member_id: id.clone(),
            id,
            initial_rating: rating,
            current_rating: rating,
            score: 0.0,
            registered_at: current_timestamp(),
        }
    }

    /// Builder-style score override, mostly for standings snapshots
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

/// Outcome of a single pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
    /// No opponent this round; the white player is credited a win
    Bye,
}

impl GameOutcome {
    /// Points credited to the white player
    pub fn white_points(self) -> f64 {
        match self {
            GameOutcome::WhiteWins | GameOutcome::Bye => 1.0,
            GameOutcome::Draw => 0.5,
            GameOutcome::BlackWins => 0.0,
        }
    }

    /// Points credited to the black player
    pub fn black_points(self) -> f64 {
        match self {
            GameOutcome::BlackWins => 1.0,
            GameOutcome::Draw => 0.5,
            GameOutcome::WhiteWins | GameOutcome::Bye => 0.0,
        }
    }

    /// Label used for metrics and logs
    pub fn as_str(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "white_wins",
            GameOutcome::BlackWins => "black_wins",
            GameOutcome::Draw => "draw",
            GameOutcome::Bye => "bye",
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::WhiteWins => write!(f, "1-0"),
            GameOutcome::BlackWins => write!(f, "0-1"),
            GameOutcome::Draw => write!(f, "½-½"),
            GameOutcome::Bye => write!(f, "bye"),
        }
    }
}

/// One board produced by the pairing engine for a round.
///
/// `black` is `None` when the white player receives a bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPairing {
    pub white: PlayerId,
    pub black: Option<PlayerId>,
}

impl RoundPairing {
    pub fn game(white: impl Into<PlayerId>, black: impl Into<PlayerId>) -> Self {
        Self {
            white: white.into(),
            black: Some(black.into()),
        }
    }

    pub fn bye(player: impl Into<PlayerId>) -> Self {
        Self {
            white: player.into(),
            black: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.black.is_none()
    }
}

/// Rating movement recorded against a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub white_before: i32,
    pub white_after: i32,
    pub black_before: i32,
    pub black_after: i32,
    /// Points gained by the winner, or by white on a draw (may be negative)
    pub delta: i32,
}

/// A pairing as stored in a tournament's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id: PairingId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub white: PlayerId,
    pub black: Option<PlayerId>,
    pub is_bye: bool,
    pub outcome: Option<GameOutcome>,
    pub rating_change: Option<RatingChange>,
    pub created_at: DateTime<Utc>,
}

impl Pairing {
    /// Stamp an engine pairing into a history record for the given round
    pub fn from_round_pairing(
        tournament_id: TournamentId,
        round: u32,
        pairing: RoundPairing,
    ) -> Self {
        let is_bye = pairing.is_bye();
        Self {
            id: generate_pairing_id(),
            tournament_id,
            round,
            white: pairing.white,
            black: pairing.black,
            is_bye,
            outcome: is_bye.then_some(GameOutcome::Bye),
            rating_change: None,
            created_at: current_timestamp(),
        }
    }

    /// Whether an outcome has been recorded
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}

/// A club tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub club_id: ClubId,
    pub name: String,
    pub status: TournamentStatus,
    /// Last round that has been paired; 0 before the first round
    pub current_round: u32,
    pub total_rounds: u32,
    pub created_at: DateTime<Utc>,
}
