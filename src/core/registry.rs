//! Arena registry for single-threaded replay
//!
//! Maps arena IDs to arenas, creating each arena on its first operation.

use crate::core::arena::Arena;
use crate::types::{ArenaAccount, ArenaId, GameConfig, GameError, OperationRecord};
use std::collections::HashMap;

/// Owns every arena of a replay
#[derive(Debug)]
pub struct ArenaRegistry {
    config: GameConfig,
    arenas: HashMap<ArenaId, Arena>,
}

impl ArenaRegistry {
    /// Create an empty registry; every arena uses `config`
    pub fn new(config: GameConfig) -> Self {
        ArenaRegistry {
            config,
            arenas: HashMap::new(),
        }
    }

    pub fn get_or_create_arena(&mut self, id: ArenaId) -> &mut Arena {
        let config = self.config;
        self.arenas
            .entry(id)
            .or_insert_with(|| Arena::new(id, config))
    }

    pub fn arena(&self, id: ArenaId) -> Option<&Arena> {
        self.arenas.get(&id)
    }

    /// Route a record to its arena
    pub fn process(&mut self, record: &OperationRecord) -> Result<(), GameError> {
        self.get_or_create_arena(record.arena).apply(record)
    }

    /// Every account of every arena, sorted by arena then account
    pub fn all_accounts(&self) -> Vec<ArenaAccount> {
        let mut accounts: Vec<ArenaAccount> =
            self.arenas.values().flat_map(Arena::accounts).collect();
        accounts.sort_by_key(|entry| (entry.arena, entry.account.id));
        accounts
    }
}

impl Default for ArenaRegistry {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
