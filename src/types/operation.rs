//! Operation-related types for the escrow engine
//!
//! This module defines identifiers, amounts and the operation records fed to
//! the engine by the batch replay pipeline.

/// Account identifier
///
/// Opaque address-like key, unique within an arena
pub type AccountId = u32;

/// Arena identifier
///
/// Each arena is an independent game instance with its own ledger
pub type ArenaId = u16;

/// Balance and stake amounts, in indivisible units
pub type Amount = u64;

/// Clock reading in seconds
pub type Timestamp = u64;

/// Operations exposed by the engine's public surface
///
/// Moves are carried as raw text so that unrecognized values are rejected by
/// the engine itself, after its balance and enrollment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Credit funds arriving from the value transport
    Deposit(Amount),

    /// Debit funds leaving through the value transport
    ///
    /// Requires an idle account with sufficient balance.
    Withdraw(Amount),

    /// Join the waiting slot or pair with whoever holds it
    Enroll,

    /// Leave the waiting slot before a match forms
    Cancel,

    /// Submit a move in the current match
    SubmitMove(String),

    /// Force resolution against a silent opponent after the grace period
    Punish,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Deposit(_) => "deposit",
            Operation::Withdraw(_) => "withdraw",
            Operation::Enroll => "enroll",
            Operation::Cancel => "cancel",
            Operation::SubmitMove(_) => "move",
            Operation::Punish => "punish",
        }
    }
}

/// Input operation record from a scenario file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// The game instance this operation targets
    pub arena: ArenaId,

    /// The acting account
    pub account: AccountId,

    pub operation: Operation,

    /// Clock reading to advance the arena clock to before applying
    pub time: Option<Timestamp>,
}
