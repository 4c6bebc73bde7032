//! Game engine
//!
//! This module provides the `GameEngine` that exposes the operation surface of
//! one game instance by coordinating the Ledger, Matchmaker, Resolver and
//! PunishmentClock components.
//!
//! The engine enforces:
//! - Serialized execution: every mutating operation takes `&mut self`, so the
//!   ledger, the waiting slot and both seats of a match are read and written
//!   under one exclusive borrow
//! - All-or-nothing failures: every check runs before the first write
//! - Event emission only after an operation has fully succeeded

use crate::core::clock::{Clock, SystemClock};
use crate::core::events::{EventSink, GameEvent, LogSink};
use crate::core::ledger::Ledger;
use crate::core::matchmaker::{EnrollOutcome, Matchmaker};
use crate::core::punishment::PunishmentClock;
use crate::core::resolver::{MoveOutcome, Resolver};
use crate::types::{
    Account, AccountId, Amount, EnrollmentState, GameConfig, GameError, MatchPhase, MatchResult,
    Operation,
};
use std::sync::Arc;

/// One game instance: escrow ledger plus match state machine
///
/// Clock and event sink are injected so time-gated rules can be driven
/// deterministically and events can be routed anywhere.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    ledger: Ledger,
    matchmaker: Matchmaker,
    resolver: Resolver,
    punishment: PunishmentClock,
    clock: Arc<dyn Clock>,
    sink: Box<dyn EventSink>,
}

impl GameEngine {
    /// Create an engine driven by the system clock that logs its events
    pub fn new(config: GameConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock::new()), Box::new(LogSink::default()))
    }

    /// Create an engine with an injected clock and event sink
    pub fn with_parts(config: GameConfig, clock: Arc<dyn Clock>, sink: Box<dyn EventSink>) -> Self {
        GameEngine {
            config,
            ledger: Ledger::new(),
            matchmaker: Matchmaker::new(),
            resolver: Resolver::new(config.stake),
            punishment: PunishmentClock::new(config.grace_period),
            clock,
            sink,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply a single operation, discarding its result value
    pub fn apply(&mut self, account: AccountId, operation: &Operation) -> Result<(), GameError> {
        match operation {
            Operation::Deposit(amount) => self.deposit(account, *amount).map(|_| ()),
            Operation::Withdraw(amount) => self.withdraw(account, *amount).map(|_| ()),
            Operation::Enroll => self.enroll(account).map(|_| ()),
            Operation::Cancel => self.cancel(account),
            Operation::SubmitMove(raw) => self.submit_move(account, raw).map(|_| ()),
            Operation::Punish => {
                self.punish(account);
                Ok(())
            }
        }
    }

    /// Credit incoming funds; returns the new balance
    pub fn deposit(&mut self, account: AccountId, amount: Amount) -> Result<Amount, GameError> {
        let balance = self.ledger.deposit(account, amount)?;
        self.sink.emit(GameEvent::FundsDeposited { account, amount });
        Ok(balance)
    }

    /// Pay out funds from an idle account; returns the new balance
    pub fn withdraw(&mut self, account: AccountId, amount: Amount) -> Result<Amount, GameError> {
        let balance = self.ledger.withdraw(account, amount)?;
        self.sink.emit(GameEvent::FundsWithdrawn { account, amount });
        Ok(balance)
    }

    /// Take the waiting slot or pair with whoever holds it
    pub fn enroll(&mut self, account: AccountId) -> Result<EnrollOutcome, GameError> {
        let outcome = self
            .matchmaker
            .enroll(&mut self.ledger, account, self.config.stake)?;

        match outcome {
            EnrollOutcome::Waiting => self.sink.emit(GameEvent::PlayerEnrolled { account }),
            EnrollOutcome::Matched { opponent } => self.sink.emit(GameEvent::PlayerMatched {
                player_a: opponent,
                player_b: account,
            }),
        }

        Ok(outcome)
    }

    /// Leave the waiting slot
    pub fn cancel(&mut self, account: AccountId) -> Result<(), GameError> {
        self.matchmaker.cancel(&mut self.ledger, account)?;
        self.sink.emit(GameEvent::EnrollmentCancelled { account });
        Ok(())
    }

    /// Submit a move; settles the match if the opponent already moved
    pub fn submit_move(&mut self, account: AccountId, raw: &str) -> Result<MoveOutcome, GameError> {
        let now = self.clock.now();
        let outcome = self
            .resolver
            .submit_move(&mut self.ledger, account, raw, now)?;

        self.sink.emit(GameEvent::MoveSubmitted { account });
        if let MoveOutcome::Resolved(result) = outcome {
            self.emit_resolved(&result);
        }

        Ok(outcome)
    }

    /// Force a win against a silent opponent once the grace period has passed
    ///
    /// Never fails; returns `None` when the preconditions are not met.
    pub fn punish(&mut self, account: AccountId) -> Option<MatchResult> {
        let now = self.clock.now();
        let result = self
            .punishment
            .punish(&mut self.ledger, &self.resolver, account, now)?;

        self.emit_resolved(&result);
        Some(result)
    }

    fn emit_resolved(&self, result: &MatchResult) {
        self.sink.emit(GameEvent::MatchResolved {
            player_a: result.player_a,
            player_b: result.player_b,
            outcome: result.outcome,
        });
    }

    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    pub fn state_of(&self, account: AccountId) -> EnrollmentState {
        self.ledger.state_of(account)
    }

    /// Snapshot of an account; unknown accounts read as empty and idle
    pub fn account(&self, account: AccountId) -> Account {
        self.ledger.account(account)
    }

    pub fn match_phase(&self, account: AccountId) -> Option<MatchPhase> {
        Resolver::phase(&self.ledger, account)
    }

    /// The account holding the waiting slot, if any
    pub fn waiting(&self) -> Option<AccountId> {
        self.matchmaker.waiting()
    }

    /// All accounts sorted by account ID
    pub fn accounts(&self) -> Vec<&Account> {
        self.ledger.all_accounts()
    }

    pub fn total_balance(&self) -> u128 {
        self.ledger.total_balance()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::events::RecordingSink;
    use crate::types::Outcome;

    const ALICE: AccountId = 1;
    const BOB: AccountId = 2;
    const CAROL: AccountId = 3;

    fn engine() -> (GameEngine, Arc<ManualClock>, RecordingSink) {
        let clock = Arc::new(ManualClock::new(0));
        let sink = RecordingSink::new();
        let engine = GameEngine::with_parts(
            GameConfig::default(),
            clock.clone(),
            Box::new(sink.clone()),
        );
        (engine, clock, sink)
    }

    /// Alice (102) and Bob (103) matched, Alice enrolled first
    fn matched() -> (GameEngine, Arc<ManualClock>, RecordingSink) {
        let (mut engine, clock, sink) = engine();
        engine.deposit(ALICE, 102).unwrap();
        engine.deposit(BOB, 103).unwrap();
        engine.enroll(ALICE).unwrap();
        engine.enroll(BOB).unwrap();
        (engine, clock, sink)
    }

    #[test]
    fn test_deposit_increments_balances() {
        let (mut engine, _, _) = engine();

        engine.deposit(ALICE, 100).unwrap();
        engine.deposit(BOB, 102).unwrap();

        assert_eq!(engine.balance_of(ALICE), 100);
        assert_eq!(engine.balance_of(BOB), 102);
    }

    #[test]
    fn test_withdraw_less_than_balance() {
        let (mut engine, _, sink) = engine();
        engine.deposit(ALICE, 100).unwrap();
        engine.deposit(BOB, 102).unwrap();

        assert_eq!(engine.withdraw(ALICE, 99), Ok(1));

        assert_eq!(engine.balance_of(ALICE), 1);
        assert_eq!(engine.balance_of(BOB), 102);
        assert!(sink.events().contains(&GameEvent::FundsWithdrawn {
            account: ALICE,
            amount: 99
        }));
    }

    #[test]
    fn test_withdraw_more_than_balance() {
        let (mut engine, _, _) = engine();
        engine.deposit(ALICE, 1).unwrap();

        assert!(matches!(
            engine.withdraw(ALICE, 2).unwrap_err(),
            GameError::InsufficientFunds { .. }
        ));
        assert_eq!(engine.balance_of(ALICE), 1);
    }

    #[test]
    fn test_withdraw_blocked_while_enrolled() {
        let (mut engine, _, _) = engine();
        engine.deposit(ALICE, 100).unwrap();
        engine.enroll(ALICE).unwrap();

        assert_eq!(
            engine.withdraw(ALICE, 2),
            Err(GameError::withdrawal_blocked(ALICE, EnrollmentState::Waiting))
        );
    }

    #[test]
    fn test_withdraw_blocked_after_submitting_move() {
        let (mut engine, _, _) = matched();
        engine.submit_move(ALICE, "ROCK").unwrap();

        assert_eq!(
            engine.withdraw(ALICE, 2),
            Err(GameError::withdrawal_blocked(ALICE, EnrollmentState::Matched))
        );
    }

    #[test]
    fn test_move_values_are_case_sensitive() {
        let (mut engine, _, sink) = matched();
        let before = sink.events().len();

        assert_eq!(
            engine.submit_move(ALICE, "rock"),
            Err(GameError::invalid_move(ALICE, "rock"))
        );
        assert_eq!(engine.account(ALICE).pending_move(), None);
        assert_eq!(engine.match_phase(ALICE), Some(MatchPhase::AwaitingMoves));
        assert_eq!(sink.events().len(), before);
    }

    #[test]
    fn test_enroll_emits_enrolled_then_matched() {
        let (_, _, sink) = matched();

        let events = sink.events();
        assert!(events.contains(&GameEvent::PlayerEnrolled { account: ALICE }));
        assert!(events.contains(&GameEvent::PlayerMatched {
            player_a: ALICE,
            player_b: BOB
        }));
    }

    #[test]
    fn test_failed_operations_emit_nothing_and_create_nothing() {
        let (mut engine, _, sink) = engine();

        assert!(engine.enroll(CAROL).is_err());
        assert!(engine.withdraw(CAROL, 1).is_err());
        assert!(engine.cancel(CAROL).is_err());
        assert!(engine.submit_move(CAROL, "ROCK").is_err());
        assert_eq!(engine.punish(CAROL), None);

        assert!(sink.events().is_empty());
        assert!(engine.accounts().is_empty());
    }

    #[test]
    fn test_tie_leaves_balances_unchanged() {
        let (mut engine, _, sink) = matched();

        engine.submit_move(ALICE, "ROCK").unwrap();
        let outcome = engine.submit_move(BOB, "ROCK").unwrap();

        assert!(matches!(
            outcome,
            MoveOutcome::Resolved(MatchResult {
                outcome: Outcome::Tie,
                ..
            })
        ));
        assert_eq!(engine.balance_of(ALICE), 102);
        assert_eq!(engine.balance_of(BOB), 103);
        assert!(sink.events().contains(&GameEvent::MatchResolved {
            player_a: ALICE,
            player_b: BOB,
            outcome: Outcome::Tie
        }));
    }

    #[test]
    fn test_winner_can_enroll_again_but_loser_cannot() {
        let (mut engine, _, _) = matched();

        engine.submit_move(ALICE, "ROCK").unwrap();
        engine.submit_move(BOB, "SCISSORS").unwrap();

        assert_eq!(engine.balance_of(ALICE), 202);
        assert_eq!(engine.balance_of(BOB), 3);
        assert!(engine.enroll(ALICE).is_ok());
        assert_eq!(
            engine.enroll(BOB),
            Err(GameError::insufficient_balance(BOB, 3, 100))
        );
    }

    #[test]
    fn test_punish_respects_one_day_delay() {
        let (mut engine, clock, _) = matched();
        engine.submit_move(ALICE, "ROCK").unwrap();

        assert_eq!(engine.punish(ALICE), None);
        clock.advance_by(86_399);
        assert_eq!(engine.punish(ALICE), None);
        assert_eq!(engine.balance_of(ALICE), 102);
        assert_eq!(engine.balance_of(BOB), 103);

        clock.advance_by(1);
        let result = engine.punish(ALICE).unwrap();

        assert_eq!(
            result.outcome,
            Outcome::Forfeit {
                winner: ALICE,
                loser: BOB
            }
        );
        assert_eq!(engine.balance_of(ALICE), 202);
        assert_eq!(engine.balance_of(BOB), 3);
        assert_eq!(engine.state_of(ALICE), EnrollmentState::Idle);
        assert_eq!(engine.state_of(BOB), EnrollmentState::Idle);
    }

    #[test]
    fn test_match_phase_follows_moves() {
        let (mut engine, _, _) = matched();

        assert_eq!(engine.match_phase(ALICE), Some(MatchPhase::AwaitingMoves));
        engine.submit_move(BOB, "PAPER").unwrap();
        assert_eq!(engine.match_phase(ALICE), Some(MatchPhase::OneMoveSubmitted));
        engine.submit_move(ALICE, "PAPER").unwrap();
        assert_eq!(engine.match_phase(ALICE), None);
    }

    #[test]
    fn test_apply_dispatches_operations() {
        let (mut engine, _, _) = engine();

        engine.apply(ALICE, &Operation::Deposit(150)).unwrap();
        engine.apply(BOB, &Operation::Deposit(150)).unwrap();
        engine.apply(ALICE, &Operation::Enroll).unwrap();
        engine.apply(BOB, &Operation::Enroll).unwrap();
        engine
            .apply(ALICE, &Operation::SubmitMove("SCISSORS".to_string()))
            .unwrap();
        engine.apply(ALICE, &Operation::Punish).unwrap();
        engine
            .apply(BOB, &Operation::SubmitMove("ROCK".to_string()))
            .unwrap();
        engine.apply(ALICE, &Operation::Withdraw(50)).unwrap();

        assert_eq!(engine.balance_of(ALICE), 0);
        assert_eq!(engine.balance_of(BOB), 250);
    }

    #[test]
    fn test_total_balance_only_changes_at_boundary() {
        let (mut engine, clock, _) = engine();
        engine.deposit(ALICE, 300).unwrap();
        engine.deposit(BOB, 300).unwrap();
        engine.deposit(CAROL, 300).unwrap();

        let script: [(AccountId, &str); 6] = [
            (ALICE, "ROCK"),
            (BOB, "PAPER"),
            (BOB, "SCISSORS"),
            (CAROL, "PAPER"),
            (ALICE, "ROCK"),
            (CAROL, "ROCK"),
        ];
        for pair in script.chunks(2) {
            let (first, first_move) = pair[0];
            let (second, second_move) = pair[1];
            engine.enroll(first).unwrap();
            engine.enroll(second).unwrap();
            engine.submit_move(first, first_move).unwrap();
            engine.submit_move(second, second_move).unwrap();
            assert_eq!(engine.total_balance(), 900);
        }

        engine.enroll(ALICE).unwrap();
        engine.enroll(BOB).unwrap();
        engine.submit_move(BOB, "ROCK").unwrap();
        clock.advance_by(86_400);
        engine.punish(BOB).unwrap();
        assert_eq!(engine.total_balance(), 900);

        engine.withdraw(CAROL, 100).unwrap();
        assert_eq!(engine.total_balance(), 800);
    }
}
