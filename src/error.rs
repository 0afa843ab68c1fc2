//! Error types for the tournament service
//!
//! The pairing and rating engine itself never fails; these errors are raised
//! by the orchestration layer when a request violates tournament rules.

use crate::types::{PairingId, PlayerId, TournamentId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific tournament scenarios
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("Tournament not found: {tournament_id}")]
    TournamentNotFound { tournament_id: TournamentId },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Pairing not found: {pairing_id}")]
    PairingNotFound { pairing_id: PairingId },

    #[error("Member {member_id} is already registered in tournament {tournament_id}")]
    DuplicatePlayer {
        tournament_id: TournamentId,
        member_id: String,
    },

    #[error("Round {round} of tournament {tournament_id} has already been paired")]
    RoundAlreadyPaired {
        tournament_id: TournamentId,
        round: u32,
    },

    #[error("Round {requested} requested but the next round is {expected}")]
    RoundOutOfSequence { expected: u32, requested: u32 },

    #[error("Round {round} still has {pending} unreported results")]
    RoundNotComplete { round: u32, pending: usize },

    #[error("Tournament {tournament_id} has finished")]
    TournamentFinished { tournament_id: TournamentId },

    #[error("Registration is closed for tournament {tournament_id}")]
    RegistrationClosed { tournament_id: TournamentId },

    #[error("Result already recorded for pairing {pairing_id}")]
    ResultAlreadyRecorded { pairing_id: PairingId },

    #[error("Invalid result: {reason}")]
    InvalidResult { reason: String },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Invalid tournament: {reason}")]
    InvalidTournament { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
