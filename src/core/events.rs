//! Notifications for external observers
//!
//! The engine reports what happened through an injected `EventSink` once an
//! operation has fully succeeded. Delivery and formatting belong to the sink.

use crate::types::{AccountId, Amount, ArenaId, Outcome};
use std::sync::{Arc, Mutex};

/// Observable game events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    FundsDeposited {
        account: AccountId,
        amount: Amount,
    },
    /// Signals the value transport to pay `amount` out to `account`
    FundsWithdrawn {
        account: AccountId,
        amount: Amount,
    },
    PlayerEnrolled {
        account: AccountId,
    },
    EnrollmentCancelled {
        account: AccountId,
    },
    PlayerMatched {
        player_a: AccountId,
        player_b: AccountId,
    },
    /// A move was recorded; the move itself is not disclosed
    MoveSubmitted {
        account: AccountId,
    },
    MatchResolved {
        player_a: AccountId,
        player_b: AccountId,
        outcome: Outcome,
    },
}

/// Receiver of game events
pub trait EventSink: Send + Sync + std::fmt::Debug {
    fn emit(&self, event: GameEvent);
}

/// Writes every event to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink {
    arena: ArenaId,
}

impl LogSink {
    pub fn new(arena: ArenaId) -> Self {
        LogSink { arena }
    }
}

impl EventSink for LogSink {
    fn emit(&self, event: GameEvent) {
        match event {
            GameEvent::FundsDeposited { account, amount } => {
                log::info!("[arena {}] account {} deposited {}", self.arena, account, amount)
            }
            GameEvent::FundsWithdrawn { account, amount } => {
                log::info!("[arena {}] account {} withdrew {}", self.arena, account, amount)
            }
            GameEvent::PlayerEnrolled { account } => {
                log::info!("[arena {}] account {} enrolled", self.arena, account)
            }
            GameEvent::EnrollmentCancelled { account } => {
                log::info!("[arena {}] account {} cancelled", self.arena, account)
            }
            GameEvent::PlayerMatched { player_a, player_b } => {
                log::info!("[arena {}] matched {} with {}", self.arena, player_a, player_b)
            }
            GameEvent::MoveSubmitted { account } => {
                log::info!("[arena {}] account {} moved", self.arena, account)
            }
            GameEvent::MatchResolved {
                player_a,
                player_b,
                outcome,
            } => log::info!(
                "[arena {}] match {} vs {} resolved: {}",
                self.arena,
                player_a,
                player_b,
                outcome
            ),
        }
    }
}

/// Keeps events in memory; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event received so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
