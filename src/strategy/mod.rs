//! Processing strategy module for scenario replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing both CSV parsing and arena processing. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::types::GameConfig;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
///
/// Each strategy reads operation records from a scenario file, applies them
/// to their arenas, and writes the final account states to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the scenario at `input_path` and write account states to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Malformed rows and rejected operations are logged at warn level and
    /// do not cause this method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `batch_config` - Optional configuration for async batch processing (ignored for sync)
/// * `game_config` - Stake and grace period applied in every arena
pub fn create_strategy(
    strategy_type: StrategyType,
    batch_config: Option<BatchConfig>,
    game_config: GameConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(game_config)),
        StrategyType::Async => {
            let batch_config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(batch_config, game_config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_strategies_produce_same_output(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"type,arena,account,amount,move,time\n\
              deposit,0,1,102,,\n\
              deposit,0,2,103,,\n\
              enroll,0,1,,,\n\
              enroll,0,2,,,\n",
        )
        .unwrap();

        let strategy = create_strategy(strategy_type, None, GameConfig::default());
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "arena,account,balance,state,opponent\n0,1,102,matched,2\n0,2,103,matched,1\n"
        );
    }
}
