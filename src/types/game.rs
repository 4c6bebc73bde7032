//! Game-related types: moves, outcomes and match phases
//!
//! The beats-relation is cyclic and total: for any two distinct moves exactly
//! one beats the other, and equal moves always tie.

use super::operation::AccountId;
use std::fmt;
use std::str::FromStr;

/// A Rock-Paper-Scissors move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "ROCK",
            Move::Paper => "PAPER",
            Move::Scissors => "SCISSORS",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not exactly one of the three recognized moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMove(pub String);

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROCK" => Ok(Move::Rock),
            "PAPER" => Ok(Move::Paper),
            "SCISSORS" => Ok(Move::Scissors),
            _ => Err(UnknownMove(s.to_string())),
        }
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both players chose the same move; balances are unchanged
    Tie,
    /// Decided by the move table
    Win { winner: AccountId, loser: AccountId },
    /// Decided by punishing a silent opponent
    Forfeit { winner: AccountId, loser: AccountId },
}

impl Outcome {
    /// Decide a played match between `a` and `b`
    pub fn decide(a: AccountId, a_move: Move, b: AccountId, b_move: Move) -> Self {
        if a_move == b_move {
            Outcome::Tie
        } else if a_move.beats() == b_move {
            Outcome::Win {
                winner: a,
                loser: b,
            }
        } else {
            Outcome::Win {
                winner: b,
                loser: a,
            }
        }
    }

    /// Winner and loser, unless the match tied
    pub fn transfer(&self) -> Option<(AccountId, AccountId)> {
        match *self {
            Outcome::Tie => None,
            Outcome::Win { winner, loser } | Outcome::Forfeit { winner, loser } => {
                Some((winner, loser))
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Tie => write!(f, "tie"),
            Outcome::Win { winner, loser } => write!(f, "{} beat {}", winner, loser),
            Outcome::Forfeit { winner, loser } => {
                write!(f, "{} won by forfeit against {}", winner, loser)
            }
        }
    }
}

/// A settled match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub player_a: AccountId,
    pub player_b: AccountId,
    pub outcome: Outcome,
}

/// Phase of a live match, derived from both seats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingMoves,
    OneMoveSubmitted,
}
