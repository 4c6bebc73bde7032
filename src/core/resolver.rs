//! Match resolution
//!
//! This module provides the `Resolver`, which owns the per-match state machine:
//!
//! ```text
//! AwaitingMoves ──move──> OneMoveSubmitted ──move──> Resolved (both Idle)
//! ```
//!
//! The second move settles the match immediately. Settlement computes the
//! transfer before touching any seat, so a failed settlement leaves both
//! players exactly as they were.

use crate::core::ledger::Ledger;
use crate::types::{
    AccountId, Amount, Enrollment, GameError, MatchPhase, MatchResult, Move, Outcome, Submission,
    Timestamp,
};

/// Result of a successful move submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Recorded; the opponent has not moved yet
    Pending,
    /// The opponent had already moved and the match is settled
    Resolved(MatchResult),
}

/// Applies moves and settles matches for a fixed stake
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    stake: Amount,
}

impl Resolver {
    pub fn new(stake: Amount) -> Self {
        Resolver { stake }
    }

    pub fn stake(&self) -> Amount {
        self.stake
    }

    /// Submit a move for a matched account
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `InsufficientBalance` if the balance is below the stake
    /// - `NotEnrolled` if the account is idle
    /// - `NoOpponent` if the account is still waiting
    /// - `InvalidMove` if `raw` is not exactly ROCK, PAPER or SCISSORS
    pub fn submit_move(
        &self,
        ledger: &mut Ledger,
        id: AccountId,
        raw: &str,
        now: Timestamp,
    ) -> Result<MoveOutcome, GameError> {
        let account = ledger.account(id);
        if account.balance < self.stake {
            return Err(GameError::insufficient_balance(
                id,
                account.balance,
                self.stake,
            ));
        }

        let seat = match account.enrollment {
            Enrollment::Idle => return Err(GameError::not_enrolled(id)),
            Enrollment::Waiting => return Err(GameError::no_opponent(id)),
            Enrollment::Matched(seat) => seat,
        };

        let mv: Move = raw
            .parse()
            .map_err(|_| GameError::invalid_move(id, raw))?;

        let opponent = seat.opponent;
        match ledger.account(opponent).pending_move() {
            Some(opponent_move) => {
                let result = MatchResult {
                    player_a: opponent,
                    player_b: id,
                    outcome: Outcome::decide(opponent, opponent_move, id, mv),
                };
                self.settle(ledger, &result)?;
                Ok(MoveOutcome::Resolved(result))
            }
            None => {
                if let Some(seat) = ledger.get_mut(id).and_then(|a| a.seat_mut()) {
                    seat.submission = Some(Submission { mv, at: now });
                }
                log::debug!("Account {} submitted a move at {}", id, now);
                Ok(MoveOutcome::Pending)
            }
        }
    }

    /// Pay out a finished match and return both players to `Idle`
    pub fn settle(&self, ledger: &mut Ledger, result: &MatchResult) -> Result<(), GameError> {
        if let Some((winner, loser)) = result.outcome.transfer() {
            ledger.transfer(loser, winner, self.stake)?;
        }

        for id in [result.player_a, result.player_b] {
            if let Some(account) = ledger.get_mut(id) {
                account.reset();
            }
        }

        log::debug!(
            "Match between {} and {} settled: {}",
            result.player_a,
            result.player_b,
            result.outcome
        );
        Ok(())
    }

    /// Phase of the match an account is seated in, if any
    pub fn phase(ledger: &Ledger, id: AccountId) -> Option<MatchPhase> {
        let account = ledger.get(id)?;
        let seat = account.seat()?;
        let moved = account.pending_move().is_some()
            || ledger
                .get(seat.opponent)
                .and_then(|opponent| opponent.pending_move())
                .is_some();

        Some(if moved {
            MatchPhase::OneMoveSubmitted
        } else {
            MatchPhase::AwaitingMoves
        })
    }
}
