//! Matchmaking for two-player matches
//!
//! This module provides the `Matchmaker`, a single-capacity waiting slot. An
//! enrolling account either takes the empty slot or is paired with the account
//! already holding it.
//!
//! # Pairing Invariant
//!
//! An account is `Matched` if and only if its seat names an opponent whose own
//! seat names it back. Both seats are written in the same call, under the same
//! exclusive borrow of the ledger, so no caller can observe a half-formed pair.

use crate::core::ledger::Ledger;
use crate::types::{AccountId, Amount, Enrollment, EnrollmentState, GameError, Seat};

/// Result of a successful enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// No one was waiting; the account now holds the waiting slot
    Waiting,
    /// Paired with the account that held the waiting slot
    Matched { opponent: AccountId },
}

/// Single-slot matchmaking queue
#[derive(Debug, Default)]
pub struct Matchmaker {
    /// The account currently waiting for an opponent, if any
    waiting: Option<AccountId>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Matchmaker { waiting: None }
    }

    pub fn waiting(&self) -> Option<AccountId> {
        self.waiting
    }

    /// Enroll an idle account holding at least the stake
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The balance is below the stake (`InsufficientBalance`)
    /// - The account is already waiting or matched (`AlreadyEnrolled`)
    pub fn enroll(
        &mut self,
        ledger: &mut Ledger,
        id: AccountId,
        stake: Amount,
    ) -> Result<EnrollOutcome, GameError> {
        let balance = ledger.balance_of(id);
        if balance < stake {
            return Err(GameError::insufficient_balance(id, balance, stake));
        }

        let state = ledger.state_of(id);
        if state != EnrollmentState::Idle {
            return Err(GameError::already_enrolled(id, state));
        }

        match self.waiting.take() {
            Some(opponent) => {
                debug_assert_eq!(ledger.state_of(opponent), EnrollmentState::Waiting);
                ledger.get_or_create_account(opponent).enrollment =
                    Enrollment::Matched(Seat::facing(id));
                ledger.get_or_create_account(id).enrollment =
                    Enrollment::Matched(Seat::facing(opponent));
                log::debug!("Paired account {} with waiting account {}", id, opponent);
                Ok(EnrollOutcome::Matched { opponent })
            }
            None => {
                ledger.get_or_create_account(id).enrollment = Enrollment::Waiting;
                self.waiting = Some(id);
                log::debug!("Account {} is waiting for an opponent", id);
                Ok(EnrollOutcome::Waiting)
            }
        }
    }

    /// Withdraw a waiting account from the slot
    ///
    /// Once paired, only resolution or punishment ends the match.
    pub fn cancel(&mut self, ledger: &mut Ledger, id: AccountId) -> Result<(), GameError> {
        let state = ledger.state_of(id);
        if state != EnrollmentState::Waiting {
            return Err(GameError::not_cancellable(id, state));
        }

        if let Some(account) = ledger.get_mut(id) {
            account.reset();
        }
        if self.waiting == Some(id) {
            self.waiting = None;
        }

        log::debug!("Account {} left the waiting slot", id);
        Ok(())
    }
}
