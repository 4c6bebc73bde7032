//! Escrow ledger
//!
//! This module provides the `Ledger` struct which holds every account of one
//! arena and the balance primitives the rest of the engine builds on.
//!
//! The Ledger is responsible for:
//! - Creating accounts on first deposit
//! - Tracking withdrawable balances with checked arithmetic
//! - Blocking withdrawals while an account is enrolled or matched
//! - Moving stakes between accounts without changing the global sum

use crate::types::{Account, AccountId, Amount, EnrollmentState, GameError};
use std::collections::HashMap;

/// Manages all accounts of one arena and their balances
///
/// Accounts are only created by a successful deposit. Every other entry point
/// reads unknown accounts as zero-balance idle accounts without inserting them,
/// so a rejected operation never leaves a new account behind.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Map of account IDs to account states
    accounts: HashMap<AccountId, Account>,
}

impl Ledger {
    /// Create a new Ledger with no accounts
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
        }
    }

    /// Get or create the account for the specified ID
    pub fn get_or_create_account(&mut self, id: AccountId) -> &mut Account {
        self.accounts.entry(id).or_insert_with(|| Account::new(id))
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    /// Snapshot of an account
    ///
    /// Unknown accounts are reported as fresh idle accounts with a zero balance.
    pub fn account(&self, id: AccountId) -> Account {
        self.get(id).cloned().unwrap_or_else(|| Account::new(id))
    }

    pub fn balance_of(&self, id: AccountId) -> Amount {
        self.get(id).map_or(0, |account| account.balance)
    }

    pub fn state_of(&self, id: AccountId) -> EnrollmentState {
        self.get(id)
            .map_or(EnrollmentState::Idle, |account| account.state())
    }

    /// Get all accounts sorted by account ID
    pub fn all_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Sum of every balance held by the ledger
    ///
    /// Changes only through `deposit` and `withdraw`.
    pub fn total_balance(&self) -> u128 {
        self.accounts
            .values()
            .map(|account| u128::from(account.balance))
            .sum()
    }

    /// Credit funds to an account, creating it if needed
    ///
    /// A zero deposit leaves an unknown account uncreated.
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the balance would exceed `u64::MAX`.
    pub fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<Amount, GameError> {
        let new_balance = self
            .balance_of(id)
            .checked_add(amount)
            .ok_or_else(|| GameError::arithmetic_overflow("deposit", id))?;

        if amount == 0 && self.get(id).is_none() {
            return Ok(0);
        }

        let account = self.get_or_create_account(id);
        account.balance = new_balance;

        Ok(new_balance)
    }

    /// Debit funds from an idle account
    ///
    /// # Returns
    ///
    /// The new balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account is waiting or matched (checked first, regardless of amount)
    /// - The amount exceeds the balance
    pub fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<Amount, GameError> {
        let state = self.state_of(id);
        if state != EnrollmentState::Idle {
            return Err(GameError::withdrawal_blocked(id, state));
        }

        let balance = self.balance_of(id);
        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| GameError::insufficient_funds(id, balance, amount))?;

        if let Some(account) = self.get_mut(id) {
            account.balance = new_balance;
        }

        Ok(new_balance)
    }

    /// Move funds between two accounts
    ///
    /// Callers only transfer stakes whose sufficiency was checked at enroll and
    /// move time; the checks here keep the ledger consistent regardless. Both
    /// sides are validated before either balance changes.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), GameError> {
        if from == to {
            return Ok(());
        }

        let from_balance = self.balance_of(from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or_else(|| GameError::insufficient_funds(from, from_balance, amount))?;
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| GameError::arithmetic_overflow("transfer", to))?;

        self.get_or_create_account(from).balance = new_from;
        self.get_or_create_account(to).balance = new_to;

        Ok(())
    }
}
