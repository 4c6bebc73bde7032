//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account and enrollment types
//! - `game`: Moves, outcomes and match phases
//! - `operation`: Identifiers, amounts and operation records
//! - `config`: Game rules configuration
//! - `error`: Error types for the escrow engine

pub mod account;
pub mod config;
pub mod error;
pub mod game;
pub mod operation;

pub use account::{Account, ArenaAccount, Enrollment, EnrollmentState, Seat, Submission};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{MatchPhase, MatchResult, Move, Outcome, UnknownMove};
pub use operation::{AccountId, Amount, ArenaId, Operation, OperationRecord, Timestamp};
