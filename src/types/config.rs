//! Game rules configuration

use super::operation::Amount;

/// Default stake, in balance units
pub const DEFAULT_STAKE: Amount = 100;

/// Default punishment grace period: one day, in seconds
pub const DEFAULT_GRACE_PERIOD: u64 = 24 * 60 * 60;

/// Rules shared by every match in an arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Minimum balance to enroll or move, and the amount a loser pays the winner
    pub stake: Amount,

    /// Seconds a player must wait after moving before punishing a silent opponent
    pub grace_period: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stake: DEFAULT_STAKE,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

impl GameConfig {
    /// Create a new GameConfig with custom values
    ///
    /// A zero stake would let empty accounts play, so it falls back to the default.
    pub fn new(stake: Amount, grace_period: u64) -> Self {
        let stake = if stake == 0 {
            log::warn!(
                "Invalid stake ({}), using default ({})",
                stake,
                DEFAULT_STAKE
            );
            DEFAULT_STAKE
        } else {
            stake
        };

        Self {
            stake,
            grace_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.stake, 100);
        assert_eq!(config.grace_period, 86_400);
    }

    #[test]
    fn test_zero_stake_falls_back_to_default() {
        let config = GameConfig::new(0, 60);
        assert_eq!(config.stake, DEFAULT_STAKE);
        assert_eq!(config.grace_period, 60);
    }

    #[test]
    fn test_zero_grace_period_is_allowed() {
        let config = GameConfig::new(5, 0);
        assert_eq!(config.stake, 5);
        assert_eq!(config.grace_period, 0);
    }
}
