//! Forfeiture of silent opponents
//!
//! A matched player who has moved may force a win once the grace period has
//! elapsed since their move and the opponent still has not answered. Unmet
//! conditions are not errors: `punish` simply does nothing, so callers can
//! poll it freely.

use crate::core::ledger::Ledger;
use crate::core::resolver::Resolver;
use crate::types::{AccountId, MatchResult, Outcome, Timestamp};

/// Time-gated forced resolution
#[derive(Debug, Clone, Copy)]
pub struct PunishmentClock {
    /// Seconds that must elapse after the punisher's move
    grace_period: u64,
}

impl PunishmentClock {
    pub fn new(grace_period: u64) -> Self {
        PunishmentClock { grace_period }
    }

    pub fn grace_period(&self) -> u64 {
        self.grace_period
    }

    /// Resolve the match in favor of `id` if its opponent has been silent too long
    ///
    /// Returns the settled match, or `None` when any precondition is unmet.
    pub fn punish(
        &self,
        ledger: &mut Ledger,
        resolver: &Resolver,
        id: AccountId,
        now: Timestamp,
    ) -> Option<MatchResult> {
        let account = ledger.get(id)?;
        let seat = account.seat()?;
        let submission = seat.submission?;
        let opponent = seat.opponent;

        if ledger.account(opponent).pending_move().is_some() {
            return None;
        }
        if now.saturating_sub(submission.at) < self.grace_period {
            log::debug!(
                "Account {} cannot punish {} yet ({}s of {}s elapsed)",
                id,
                opponent,
                now.saturating_sub(submission.at),
                self.grace_period
            );
            return None;
        }

        let result = MatchResult {
            player_a: id,
            player_b: opponent,
            outcome: Outcome::Forfeit {
                winner: id,
                loser: opponent,
            },
        };

        match resolver.settle(ledger, &result) {
            Ok(()) => Some(result),
            Err(e) => {
                log::warn!("Punishment of account {} by {} failed: {}", opponent, id, e);
                None
            }
        }
    }
}
