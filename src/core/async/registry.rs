//! Thread-safe arena registry for async batch processing
//!
//! This module provides the `AsyncArenaRegistry`, which stores arenas in a
//! `DashMap` so different arenas can be driven from different threads at once.
//!
//! # Thread Safety
//!
//! Each operation holds the arena's map entry for its whole duration. That
//! entry guard is the arena's critical section: the ledger, the waiting slot
//! and both seats of every match in the arena are only touched while it is
//! held, so concurrent callers can never pair two accounts with the same
//! waiting player or both pass a balance check that only one can satisfy.

use crate::core::arena::Arena;
use crate::types::{ArenaAccount, ArenaId, GameConfig, GameError, OperationRecord};
use dashmap::DashMap;

/// Thread-safe map of arenas
///
/// Operations on different arenas proceed in parallel; operations on the same
/// arena are serialized.
#[derive(Debug)]
pub struct AsyncArenaRegistry {
    config: GameConfig,

    /// Concurrent map of arena IDs to arenas
    ///
    /// DashMap shards its locks, so unrelated arenas rarely contend.
    arenas: DashMap<ArenaId, Arena>,
}

impl AsyncArenaRegistry {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            arenas: DashMap::new(),
        }
    }

    /// Run a closure with exclusive access to an arena, creating it if needed
    ///
    /// The arena stays locked until the closure returns.
    pub fn with_arena<F, T>(&self, id: ArenaId, f: F) -> T
    where
        F: FnOnce(&mut Arena) -> T,
    {
        let config = self.config;
        let mut entry = self
            .arenas
            .entry(id)
            .or_insert_with(|| Arena::new(id, config));
        f(entry.value_mut())
    }

    /// Route a record to its arena
    pub fn process(&self, record: &OperationRecord) -> Result<(), GameError> {
        self.with_arena(record.arena, |arena| arena.apply(record))
    }

    pub fn arena_count(&self) -> usize {
        self.arenas.len()
    }

    /// Every account of every arena, sorted by arena then account
    ///
    /// A snapshot: arenas may change as soon as this returns.
    pub fn all_accounts(&self) -> Vec<ArenaAccount> {
        let mut accounts: Vec<ArenaAccount> = self
            .arenas
            .iter()
            .flat_map(|entry| entry.value().accounts())
            .collect();
        accounts.sort_by_key(|entry| (entry.arena, entry.account.id));
        accounts
    }
}

impl Default for AsyncArenaRegistry {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
