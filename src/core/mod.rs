//! Core business logic module
//!
//! This module contains the game instance components:
//! - `ledger` - Per-account balances with checked arithmetic
//! - `matchmaker` - Single waiting slot and enrollment lifecycle
//! - `resolver` - Move submission and match settlement
//! - `punishment` - Forced resolution against silent opponents
//! - `clock` - Injectable time sources
//! - `events` - Notifications emitted after successful operations
//! - `engine` - Operation surface of one game instance
//! - `arena` - An engine driven by recorded scenario time
//! - `registry` - Arena map for sequential replay
//! - `async` - Concurrent arena map and batch processor

pub mod arena;
pub mod r#async;
pub mod clock;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod matchmaker;
pub mod punishment;
pub mod registry;
pub mod resolver;

pub use arena::Arena;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::GameEngine;
pub use events::{EventSink, GameEvent, LogSink, RecordingSink};
pub use ledger::Ledger;
pub use matchmaker::{EnrollOutcome, Matchmaker};
pub use punishment::PunishmentClock;
pub use r#async::{AsyncArenaRegistry, BatchProcessor};
pub use registry::ArenaRegistry;
pub use resolver::{MoveOutcome, Resolver};
