//! Rock-Paper-Scissors Escrow Engine Library
//! # Overview
//!
//! This library holds player funds in escrow, pairs players into matches,
//! resolves matches by the Rock-Paper-Scissors move table, and moves a fixed
//! stake from loser to winner. A player whose opponent goes silent can force a
//! win once a grace period has passed.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Move, Outcome, GameError, etc.)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Balances, deposits, withdrawals and stake transfers
//!   - [`core::matchmaker`] - Single waiting slot, enrollment and cancellation
//!   - [`core::resolver`] - Move submission and settlement
//!   - [`core::punishment`] - Forced resolution against silent opponents
//!   - [`core::engine`] - The operation surface of one game instance
//!   - [`core::arena`] / [`core::registry`] - Independent game instances for replay
//! - [`io`] - Scenario CSV reading and account CSV output
//! - [`strategy`] - Sync and async replay pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Operations
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an idle account
//! - **Enroll**: Take the waiting slot, or pair with whoever holds it
//! - **Cancel**: Leave the waiting slot
//! - **Move**: Submit ROCK, PAPER or SCISSORS; the second move settles the match
//! - **Punish**: Claim the stake from an opponent silent past the grace period
//!
//! # Account States
//!
//! - `idle`: Free to deposit, withdraw or enroll
//! - `waiting`: Holding the waiting slot
//! - `matched`: Paired with an opponent until the match settles

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{GameEngine, GameEvent, ManualClock, SystemClock};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, Amount, EnrollmentState, GameConfig, GameError, MatchResult, Move,
    Operation, OperationRecord, Outcome,
};
