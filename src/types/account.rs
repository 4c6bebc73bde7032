//! Account-related types for the escrow engine
//!
//! This module defines the Account structure together with its matchmaking
//! status. Enrollment data that only makes sense while matched (opponent,
//! pending move, move timestamp) lives inside the `Matched` variant, so an
//! `Idle` account can never carry a stale move.

use super::game::Move;
use super::operation::{AccountId, Amount, ArenaId, Timestamp};

/// Externally visible matchmaking status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrollmentState {
    Idle,
    Waiting,
    Matched,
}

impl EnrollmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentState::Idle => "idle",
            EnrollmentState::Waiting => "waiting",
            EnrollmentState::Matched => "matched",
        }
    }
}

impl std::fmt::Display for EnrollmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A move recorded for the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub mv: Move,
    /// Clock reading when the move was recorded
    pub at: Timestamp,
}

/// Per-player match context
///
/// The opponent is stored as an identifier rather than a reference; the
/// symmetric back-reference lives in the opponent's own seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub opponent: AccountId,
    pub submission: Option<Submission>,
}

impl Seat {
    pub fn facing(opponent: AccountId) -> Self {
        Seat {
            opponent,
            submission: None,
        }
    }
}

/// Matchmaking lifecycle of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enrollment {
    #[default]
    Idle,
    Waiting,
    Matched(Seat),
}

/// Player account state
///
/// Represents one player's escrowed funds and matchmaking status.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account identifier
    pub id: AccountId,

    /// Funds available for withdrawal or wagering
    ///
    /// The stake is never carved out of this balance while playing; it is
    /// only a participation threshold until the match settles.
    pub balance: Amount,

    /// Current matchmaking status
    pub enrollment: Enrollment,
}

impl Account {
    /// Create a new idle account with a zero balance
    pub fn new(id: AccountId) -> Self {
        Account {
            id,
            balance: 0,
            enrollment: Enrollment::Idle,
        }
    }

    pub fn state(&self) -> EnrollmentState {
        match self.enrollment {
            Enrollment::Idle => EnrollmentState::Idle,
            Enrollment::Waiting => EnrollmentState::Waiting,
            Enrollment::Matched(_) => EnrollmentState::Matched,
        }
    }

    pub fn seat(&self) -> Option<&Seat> {
        match &self.enrollment {
            Enrollment::Matched(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn seat_mut(&mut self) -> Option<&mut Seat> {
        match &mut self.enrollment {
            Enrollment::Matched(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Option<AccountId> {
        self.seat().map(|seat| seat.opponent)
    }

    pub fn pending_move(&self) -> Option<Move> {
        self.seat()
            .and_then(|seat| seat.submission)
            .map(|submission| submission.mv)
    }

    pub fn last_move_at(&self) -> Option<Timestamp> {
        self.seat()
            .and_then(|seat| seat.submission)
            .map(|submission| submission.at)
    }

    /// Drop any match context and return to `Idle`
    pub fn reset(&mut self) {
        self.enrollment = Enrollment::Idle;
    }
}

/// An account together with the arena holding it, for output
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaAccount {
    pub arena: ArenaId,
    pub account: Account,
}
