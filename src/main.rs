//! Rock-Paper-Scissors Escrow Engine CLI
//!
//! Replays a scenario of escrow and game operations from a CSV file and
//! prints the final account states.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- scenario.csv > accounts.csv
//! cargo run -- --strategy sync scenario.csv > accounts.csv
//! cargo run -- --stake 50 --grace-period 3600 scenario.csv > accounts.csv
//! RUST_LOG=info cargo run -- --strategy async --batch-size 2000 scenario.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use env_logger::Env;
use rps_escrow_engine::cli;
use rps_escrow_engine::strategy;
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();
    let game_config = args.to_game_config();

    let strategy = {
        let batch_config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, batch_config, game_config)
    };

    // Output goes to stdout; logs go to stderr
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        log::error!("{}", e);
        process::exit(1);
    }
}
