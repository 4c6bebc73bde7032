//! Error types for the escrow engine
//!
//! This module defines all error types that can occur while replaying game
//! operations. Every rejection leaves engine state untouched.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Game Rule Errors**: Insufficient funds, enrollment rules, invalid moves
//! - **Arithmetic Errors**: Balance overflow

use super::account::EnrollmentState;
use super::operation::{AccountId, Amount};
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Main error type for the escrow engine
///
/// Each variant includes the account and enough context to diagnose the
/// rejection from a log line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation type in a scenario record
    #[error("Invalid operation type '{op_type}'{}", account.map(|a| format!(" for account {}", a)).unwrap_or_default())]
    InvalidOperationType {
        /// The invalid operation type string
        op_type: String,
        /// Account ID (if available)
        account: Option<AccountId>,
    },

    /// Amount field is missing for an operation that requires it
    #[error("{op_type} for account {account} requires an amount")]
    MissingAmount {
        /// Operation type that requires an amount
        op_type: String,
        account: AccountId,
    },

    /// Move field is missing for a move submission
    #[error("move for account {account} requires a move value")]
    MissingMove { account: AccountId },

    /// Amount is not a non-negative integer
    #[error("Invalid amount '{amount}' for account {account}")]
    InvalidAmount { amount: String, account: AccountId },

    /// Withdrawal exceeds the balance
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Amount,
        requested: Amount,
    },

    /// Withdrawal attempted while the account is enrolled or matched
    #[error("Withdrawal blocked for account {account} while {state}")]
    WithdrawalBlocked {
        account: AccountId,
        state: EnrollmentState,
    },

    /// Balance is below the stake at enroll or move time
    #[error("Insufficient balance for account {account}: balance {balance}, stake {stake}")]
    InsufficientBalance {
        account: AccountId,
        balance: Amount,
        stake: Amount,
    },

    /// Enroll called while not idle
    #[error("Account {account} is already enrolled ({state})")]
    AlreadyEnrolled {
        account: AccountId,
        state: EnrollmentState,
    },

    /// Cancel called while not waiting
    #[error("Account {account} cannot cancel while {state}")]
    NotCancellable {
        account: AccountId,
        state: EnrollmentState,
    },

    /// Move submitted while idle
    #[error("Account {account} is not enrolled")]
    NotEnrolled { account: AccountId },

    /// Move submitted while waiting for an opponent
    #[error("Account {account} has no opponent yet")]
    NoOpponent { account: AccountId },

    /// Move value outside ROCK, PAPER, SCISSORS
    #[error("Invalid move '{value}' from account {account}")]
    InvalidMove { account: AccountId, value: String },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        account: AccountId,
    },
}

// Conversion from io::Error to GameError
impl From<std::io::Error> for GameError {
    fn from(error: std::io::Error) -> Self {
        GameError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to GameError
impl From<csv::Error> for GameError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        GameError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from csv_async::Error to GameError
impl From<csv_async::Error> for GameError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        GameError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl GameError {
    /// Classify a failure to open the scenario file at `path`
    pub fn from_open_error(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => GameError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => error.into(),
        }
    }

    pub fn insufficient_funds(account: AccountId, balance: Amount, requested: Amount) -> Self {
        GameError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    pub fn withdrawal_blocked(account: AccountId, state: EnrollmentState) -> Self {
        GameError::WithdrawalBlocked { account, state }
    }

    pub fn insufficient_balance(account: AccountId, balance: Amount, stake: Amount) -> Self {
        GameError::InsufficientBalance {
            account,
            balance,
            stake,
        }
    }

    pub fn already_enrolled(account: AccountId, state: EnrollmentState) -> Self {
        GameError::AlreadyEnrolled { account, state }
    }

    pub fn not_cancellable(account: AccountId, state: EnrollmentState) -> Self {
        GameError::NotCancellable { account, state }
    }

    pub fn not_enrolled(account: AccountId) -> Self {
        GameError::NotEnrolled { account }
    }

    pub fn no_opponent(account: AccountId) -> Self {
        GameError::NoOpponent { account }
    }

    pub fn invalid_move(account: AccountId, value: &str) -> Self {
        GameError::InvalidMove {
            account,
            value: value.to_string(),
        }
    }

    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        GameError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    pub fn missing_amount(op_type: &str, account: AccountId) -> Self {
        GameError::MissingAmount {
            op_type: op_type.to_string(),
            account,
        }
    }

    pub fn invalid_amount(amount: &str, account: AccountId) -> Self {
        GameError::InvalidAmount {
            amount: amount.to_string(),
            account,
        }
    }

    pub fn invalid_operation_type(op_type: &str, account: Option<AccountId>) -> Self {
        GameError::InvalidOperationType {
            op_type: op_type.to_string(),
            account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        GameError::FileNotFound { path: "scenario.csv".to_string() },
        "File not found: scenario.csv"
    )]
    #[case::parse_error_with_line(
        GameError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        GameError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_operation_type(
        GameError::InvalidOperationType { op_type: "bet".to_string(), account: Some(3) },
        "Invalid operation type 'bet' for account 3"
    )]
    #[case::insufficient_funds(
        GameError::InsufficientFunds { account: 1, balance: 1, requested: 2 },
        "Insufficient funds for account 1: balance 1, requested 2"
    )]
    #[case::withdrawal_blocked(
        GameError::WithdrawalBlocked { account: 1, state: EnrollmentState::Matched },
        "Withdrawal blocked for account 1 while matched"
    )]
    #[case::insufficient_balance(
        GameError::InsufficientBalance { account: 1, balance: 99, stake: 100 },
        "Insufficient balance for account 1: balance 99, stake 100"
    )]
    #[case::already_enrolled(
        GameError::AlreadyEnrolled { account: 2, state: EnrollmentState::Waiting },
        "Account 2 is already enrolled (waiting)"
    )]
    #[case::not_cancellable(
        GameError::NotCancellable { account: 2, state: EnrollmentState::Idle },
        "Account 2 cannot cancel while idle"
    )]
    #[case::invalid_move(
        GameError::InvalidMove { account: 4, value: "LIZARD".to_string() },
        "Invalid move 'LIZARD' from account 4"
    )]
    fn test_error_display(#[case] error: GameError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::insufficient_funds(
        GameError::insufficient_funds(1, 5, 10),
        GameError::InsufficientFunds { account: 1, balance: 5, requested: 10 }
    )]
    #[case::no_opponent(
        GameError::no_opponent(9),
        GameError::NoOpponent { account: 9 }
    )]
    #[case::arithmetic_overflow(
        GameError::arithmetic_overflow("deposit", 3),
        GameError::ArithmeticOverflow { operation: "deposit".to_string(), account: 3 }
    )]
    fn test_helper_functions(#[case] result: GameError, #[case] expected: GameError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_open_error_classification() {
        let path = Path::new("missing.csv");

        let missing = GameError::from_open_error(
            path,
            std::io::Error::new(ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(
            missing,
            GameError::FileNotFound {
                path: "missing.csv".to_string()
            }
        );

        let denied = GameError::from_open_error(
            path,
            std::io::Error::new(ErrorKind::PermissionDenied, "Permission denied"),
        );
        assert_eq!(denied.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: GameError = io_error.into();
        assert!(matches!(error, GameError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
