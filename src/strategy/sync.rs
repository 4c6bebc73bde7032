//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates replay by coordinating between the
//! SyncReader (for CSV input) and the ArenaRegistry (for game logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Game rules to `ArenaRegistry` and the engines it owns
//! - CSV output to `csv_format::write_accounts_csv` (format handling)
//!
//! Records are streamed one at a time; memory grows with the number of
//! accounts, not with the length of the scenario.

use crate::core::ArenaRegistry;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::GameConfig;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rps_escrow_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use rps_escrow_engine::types::GameConfig;
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(GameConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("scenario.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    config: GameConfig,
}

impl SyncProcessingStrategy {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Replay the scenario in input order
    ///
    /// 1. Streams operation records from the CSV file with a SyncReader
    /// 2. Routes each record to its arena, creating arenas on first use
    /// 3. Writes every arena's accounts using csv_format::write_accounts_csv
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Malformed rows and rejected operations are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut registry = ArenaRegistry::new(self.config);

        let reader = SyncReader::new(input_path).map_err(|e| e.to_string())?;

        for result in reader {
            match result {
                Ok(record) => {
                    if let Err(e) = registry.process(&record) {
                        log::warn!(
                            "[arena {}] {} rejected: {}",
                            record.arena,
                            record.operation.name(),
                            e
                        );
                    }
                }
                Err(e) => log::warn!("Skipping malformed record: {}", e),
            }
        }

        write_accounts_csv(&registry.all_accounts(), output)?;

        Ok(())
    }
}
