//! Batch processing with arena-based partitioning for async replay
//!
//! This module provides the `BatchProcessor` struct, which manages concurrent batch
//! processing with arena-based partitioning to enable parallel processing while
//! maintaining per-arena operation ordering.
//!
//! # Design
//!
//! Matchmaking couples accounts inside an arena: an enroll pairs with whoever
//! holds the waiting slot, and a move settles against the opponent's seat. The
//! unit of independence is therefore the arena, not the account. The
//! `BatchProcessor` partitions batches by arena ID, so arenas run concurrently
//! while each arena sees its operations in input order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncArenaRegistry>  (shared arena map)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncArenaRegistry;
use crate::types::{ArenaId, GameError, OperationRecord};

/// Result of processing a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation record that was processed
    pub record: OperationRecord,

    /// The result of processing (success or rejection)
    pub result: Result<(), GameError>,
}

/// Batch processor with arena-based partitioning
///
/// Cloning is cheap; every clone drives the same registry.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    registry: Arc<AsyncArenaRegistry>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `registry` - Arc-wrapped AsyncArenaRegistry that owns the arenas
    pub fn new(registry: Arc<AsyncArenaRegistry>) -> Self {
        Self { registry }
    }

    /// Partition a batch of operations by arena ID
    ///
    /// # Returns
    ///
    /// A HashMap from arena ID to that arena's operations, in original order.
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one sub-batch
    /// - Operations for each arena maintain their original order
    pub fn partition_by_arena(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<ArenaId, Vec<OperationRecord>> {
        let mut arena_batches: HashMap<ArenaId, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            arena_batches.entry(record.arena).or_default().push(record);
        }

        arena_batches
    }

    /// Process all operations for a single arena sequentially
    ///
    /// Rejections are captured in the results and do not stop processing.
    /// Results are in the same order as the input operations.
    pub async fn process_arena_operations(
        &self,
        operations: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for record in operations {
            let result = self.registry.process(&record);
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch of operations with arena-based partitioning
    ///
    /// This method processes a batch by:
    /// 1. Partitioning the batch by arena ID
    /// 2. Spawning one tokio task per arena
    /// 3. Waiting for all tasks and collecting their results
    ///
    /// Results are grouped by arena, so their overall order may differ from
    /// the input.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let arena_batches = self.partition_by_arena(batch);

        let mut tasks = Vec::with_capacity(arena_batches.len());
        for (_arena_id, operations) in arena_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_arena_operations(operations).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(arena_results) => results.extend(arena_results),
                Err(e) => {
                    log::error!("Arena task panicked: {:?}", e);
                }
            }
        }

        results
    }
}
