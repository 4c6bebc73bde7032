//! Arena: one game instance driven by recorded time
//!
//! An arena bundles a `GameEngine` with the `ManualClock` it reads, so a
//! scenario can replay operations at the instants they were recorded.

use crate::core::clock::{Clock, ManualClock};
use crate::core::engine::GameEngine;
use crate::core::events::{EventSink, LogSink};
use crate::types::{ArenaAccount, ArenaId, GameConfig, GameError, OperationRecord, Timestamp};
use std::sync::Arc;

#[derive(Debug)]
pub struct Arena {
    id: ArenaId,
    engine: GameEngine,
    clock: Arc<ManualClock>,
}

impl Arena {
    /// Create an arena whose clock starts at zero and whose events are logged
    pub fn new(id: ArenaId, config: GameConfig) -> Self {
        Self::with_sink(id, config, Box::new(LogSink::new(id)))
    }

    pub fn with_sink(id: ArenaId, config: GameConfig, sink: Box<dyn EventSink>) -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let engine = GameEngine::with_parts(config, clock.clone(), sink);
        Arena { id, engine, clock }
    }

    pub fn id(&self) -> ArenaId {
        self.id
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Apply a recorded operation
    ///
    /// The clock is advanced to the record's time first, if it carries one.
    /// Times earlier than the clock are ignored.
    pub fn apply(&mut self, record: &OperationRecord) -> Result<(), GameError> {
        if let Some(time) = record.time {
            if !self.clock.advance_to(time) {
                log::warn!(
                    "[arena {}] ignoring time {} earlier than clock {}",
                    self.id,
                    time,
                    self.now()
                );
            }
        }

        self.engine.apply(record.account, &record.operation)
    }

    /// Snapshot of every account in this arena, sorted by account ID
    pub fn accounts(&self) -> Vec<ArenaAccount> {
        self.engine
            .accounts()
            .into_iter()
            .map(|account| ArenaAccount {
                arena: self.id,
                account: account.clone(),
            })
            .collect()
    }
}
