//! CSV format handling for scenario records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    AccountId, Amount, ArenaAccount, ArenaId, GameError, Operation, OperationRecord, Timestamp,
};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, arena, account, amount, move, time.
/// Only deposits and withdrawals carry an amount and only move submissions
/// carry a move, so those columns are optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub arena: ArenaId,
    pub account: AccountId,
    pub amount: Option<String>,
    #[serde(rename = "move")]
    pub mv: Option<String>,
    pub time: Option<String>,
}

/// Returns the trimmed field, or None when absent or blank
fn non_blank(field: Option<&String>) -> Option<&str> {
    field.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_amount(csv_record: &CsvRecord) -> Result<Amount, GameError> {
    let raw = non_blank(csv_record.amount.as_ref())
        .ok_or_else(|| GameError::missing_amount(&csv_record.op_type, csv_record.account))?;

    raw.parse::<Amount>()
        .map_err(|_| GameError::invalid_amount(raw, csv_record.account))
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation type (case-insensitive; `withdrawal` is accepted for `withdraw`)
/// - Parses and requires the amount for deposits and withdrawals
/// - Requires a move value for move submissions, passing it through unparsed
/// - Parses the optional time column
///
/// Amounts on other operation types are ignored.
///
/// # Errors
///
/// * `InvalidOperationType` - unknown `type` value
/// * `MissingAmount` / `InvalidAmount` - deposit or withdraw without a valid amount
/// * `MissingMove` - move submission without a move value
/// * `ParseError` - time that is not a non-negative integer
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, GameError> {
    let operation = match csv_record.op_type.trim().to_lowercase().as_str() {
        "deposit" => Operation::Deposit(parse_amount(&csv_record)?),
        "withdraw" | "withdrawal" => Operation::Withdraw(parse_amount(&csv_record)?),
        "enroll" => Operation::Enroll,
        "cancel" => Operation::Cancel,
        "move" => {
            let raw = non_blank(csv_record.mv.as_ref())
                .ok_or(GameError::MissingMove {
                    account: csv_record.account,
                })?;
            Operation::SubmitMove(raw.to_string())
        }
        "punish" => Operation::Punish,
        _ => {
            return Err(GameError::invalid_operation_type(
                &csv_record.op_type,
                Some(csv_record.account),
            ))
        }
    };

    let time = match non_blank(csv_record.time.as_ref()) {
        Some(raw) => Some(raw.parse::<Timestamp>().map_err(|_| GameError::ParseError {
            line: None,
            message: format!(
                "Invalid time '{}' for account {}",
                raw, csv_record.account
            ),
        })?),
        None => None,
    };

    Ok(OperationRecord {
        arena: csv_record.arena,
        account: csv_record.account,
        operation,
        time,
    })
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: arena, account, balance, state, opponent.
/// Accounts are sorted by arena then account ID for deterministic output.
/// The opponent column is empty unless the account is matched.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(
    accounts: &[ArenaAccount],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["arena", "account", "balance", "state", "opponent"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts: Vec<&ArenaAccount> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|entry| (entry.arena, entry.account.id));

    for entry in sorted_accounts {
        let account = &entry.account;
        writer
            .write_record(&[
                entry.arena.to_string(),
                account.id.to_string(),
                account.balance.to_string(),
                account.state().to_string(),
                account
                    .opponent()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
