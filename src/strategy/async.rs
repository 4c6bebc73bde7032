//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It replays operations in batches, partitioned by
//! arena so independent games run in parallel.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── GameConfig (stake, grace_period)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (arena partitioning + tokio tasks)
//!     └── AsyncArenaRegistry (DashMap of arenas, one lock per arena)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so an arena whose operations
//!   span several batches still sees them in file order
//! - Within a batch, each arena's operations run in order on one task
//! - Different arenas run concurrently on the multi-threaded runtime

use crate::core::r#async::{AsyncArenaRegistry, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::{GameConfig, GameError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            log::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            log::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    game: GameConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    /// * `game` - Stake and grace period applied in every arena
    pub fn new(config: BatchConfig, game: GameConfig) -> Self {
        Self { config, game }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay the scenario in batches on a tokio multi-threaded runtime
    ///
    /// 1. Creates the shared AsyncArenaRegistry and a BatchProcessor over it
    /// 2. Reads operations in batches from CSV using AsyncReader
    /// 3. Processes each batch to completion before reading the next
    /// 4. Writes every arena's accounts using csv_format::write_accounts_csv
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned immediately.
    /// Rejected operations are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let registry = Arc::new(AsyncArenaRegistry::new(self.game));
            let processor = BatchProcessor::new(Arc::clone(&registry));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| GameError::from_open_error(input_path, e).to_string())?;

            // csv-async reads through the futures AsyncRead traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;

                if batch.is_empty() {
                    break;
                }

                for processed in processor.process_batch(batch).await {
                    if let Err(e) = processed.result {
                        log::warn!(
                            "[arena {}] {} rejected: {}",
                            processed.record.arena,
                            processed.record.operation.name(),
                            e
                        );
                    }
                }
            }

            write_accounts_csv(&registry.all_accounts(), output)?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_batch_config_rejects_zero_values() {
        let config = BatchConfig::new(0, 0);
        let default = BatchConfig::default();

        assert_eq!(config.batch_size, default.batch_size);
        assert_eq!(config.max_concurrent_batches, default.max_concurrent_batches);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), GameConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert_eq!(result.unwrap_err(), "File not found: nonexistent.csv");
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // A match spanning several batches must see enroll before move
        let csv_content = "type,arena,account,amount,move,time\n\
                          deposit,0,1,102,,\n\
                          deposit,1,5,40,,\n\
                          deposit,0,2,103,,\n\
                          enroll,0,1,,,\n\
                          withdraw,1,5,15,,\n\
                          enroll,0,2,,,\n\
                          move,0,2,,PAPER,\n\
                          move,0,1,,ROCK,\n";
        let file = create_temp_csv(csv_content);

        // Small batches force the match across four batches
        let strategy =
            AsyncProcessingStrategy::new(BatchConfig::new(2, num_cpus::get()), GameConfig::default());
        let mut output = Vec::new();

        strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "arena,account,balance,state,opponent\n\
             0,1,2,idle,\n\
             0,2,203,idle,\n\
             1,5,25,idle,\n"
        );
    }
}
