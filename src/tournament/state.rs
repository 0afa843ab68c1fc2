//! Tournament round progression
//!
//! `Pending -> RoundInProgress(1) -> RoundComplete(1) -> RoundInProgress(2) -> ...`
//! ending in `Completed` once the final round's results are in. Pairings are
//! generated exactly once, on the transition into `RoundInProgress(k)`.

use crate::error::{Result, TournamentError};
use crate::types::Tournament;
use serde::{Deserialize, Serialize};

/// Possible states of a tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "round")]
pub enum TournamentStatus {
    /// Accepting registrations, nothing paired yet
    Pending,
    /// Round has been paired and results are outstanding
    RoundInProgress(u32),
    /// Every result of the round is in
    RoundComplete(u32),
    /// Final round complete (terminal state)
    Completed,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Pending => write!(f, "pending"),
            TournamentStatus::RoundInProgress(round) => write!(f, "round {round} in progress"),
            TournamentStatus::RoundComplete(round) => write!(f, "round {round} complete"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl TournamentStatus {
    pub fn accepts_registrations(&self) -> bool {
        matches!(self, TournamentStatus::Pending)
    }

    /// Check that `round` may be paired now and return the resulting status.
    ///
    /// `pending_results` is the number of unreported games in the current round.
    pub fn begin_round(
        &self,
        tournament: &Tournament,
        round: u32,
        pending_results: usize,
    ) -> Result<TournamentStatus> {
        if *self == TournamentStatus::Completed || round > tournament.total_rounds {
            return Err(TournamentError::TournamentFinished {
                tournament_id: tournament.id,
            }
            .into());
        }

        let expected = tournament.current_round + 1;
        if round < expected {
            return Err(TournamentError::RoundAlreadyPaired {
                tournament_id: tournament.id,
                round,
            }
            .into());
        }
        if round > expected {
            return Err(TournamentError::RoundOutOfSequence {
                expected,
                requested: round,
            }
            .into());
        }

        match self {
            TournamentStatus::Pending | TournamentStatus::RoundComplete(_) => {
                Ok(TournamentStatus::RoundInProgress(round))
            }
            TournamentStatus::RoundInProgress(current) => Err(TournamentError::RoundNotComplete {
                round: *current,
                pending: pending_results,
            }
            .into()),
            TournamentStatus::Completed => Err(TournamentError::TournamentFinished {
                tournament_id: tournament.id,
            }
            .into()),
        }
    }

    /// Status after a result is recorded, given how many games remain open
    pub fn after_result(&self, total_rounds: u32, pending_results: usize) -> TournamentStatus {
        match self {
            TournamentStatus::RoundInProgress(round) if pending_results == 0 => {
                if *round >= total_rounds {
                    TournamentStatus::Completed
                } else {
                    TournamentStatus::RoundComplete(*round)
                }
            }
            other => *other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{current_timestamp, generate_tournament_id};

    fn tournament(status: TournamentStatus, current_round: u32, total_rounds: u32) -> Tournament {
        Tournament {
            id: generate_tournament_id(),
            club_id: "club".to_string(),
            name: "Autumn Swiss".to_string(),
            status,
            current_round,
            total_rounds,
            created_at: current_timestamp(),
        }
    }

    #[test]
    fn test_pending_starts_round_one() {
        let t = tournament(TournamentStatus::Pending, 0, 5);
        let next = t.status.begin_round(&t, 1, 0).unwrap();
        assert_eq!(next, TournamentStatus::RoundInProgress(1));
    }

    #[test]
    fn test_repairing_a_round_is_rejected() {
        let t = tournament(TournamentStatus::RoundComplete(2), 2, 5);
        let err = t.status.begin_round(&t, 2, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TournamentError>(),
            Some(TournamentError::RoundAlreadyPaired { round: 2, .. })
        ));
    }

    #[test]
    fn test_skipping_a_round_is_rejected() {
        let t = tournament(TournamentStatus::RoundComplete(1), 1, 5);
        let err = t.status.begin_round(&t, 3, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TournamentError>(),
            Some(TournamentError::RoundOutOfSequence {
                expected: 2,
                requested: 3
            })
        ));
    }

    #[test]
    fn test_open_results_block_next_round() {
        let t = tournament(TournamentStatus::RoundInProgress(1), 1, 5);
        let err = t.status.begin_round(&t, 2, 3).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TournamentError>(),
            Some(TournamentError::RoundNotComplete {
                round: 1,
                pending: 3
            })
        ));
    }

    #[test]
    fn test_past_final_round_is_finished() {
        let t = tournament(TournamentStatus::RoundComplete(3), 3, 3);
        let err = t.status.begin_round(&t, 4, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TournamentError>(),
            Some(TournamentError::TournamentFinished { .. })
        ));
    }

    #[test]
    fn test_after_result_transitions() {
        let in_progress = TournamentStatus::RoundInProgress(2);
        assert_eq!(in_progress.after_result(5, 1), in_progress);
        assert_eq!(
            in_progress.after_result(5, 0),
            TournamentStatus::RoundComplete(2)
        );
        assert_eq!(in_progress.after_result(2, 0), TournamentStatus::Completed);
        assert_eq!(
            TournamentStatus::Pending.after_result(5, 0),
            TournamentStatus::Pending
        );
    }

    #[test]
    fn test_only_pending_accepts_registrations() {
        assert!(TournamentStatus::Pending.accepts_registrations());
        assert!(!TournamentStatus::RoundInProgress(1).accepts_registrations());
        assert!(!TournamentStatus::Completed.accepts_registrations());
    }
}
