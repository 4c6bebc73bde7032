//! Clock sources for time-gated rules
//!
//! The engine never reads the system time directly; it asks an injected
//! `Clock`. Both implementations are non-decreasing.

use crate::types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time, in seconds
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Wall clock in seconds since the Unix epoch
///
/// Readings are clamped to the highest value seen so far.
#[derive(Debug, Default)]
pub struct SystemClock {
    high_water: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let previous = self.high_water.fetch_max(wall, Ordering::SeqCst);
        previous.max(wall)
    }
}

/// Externally driven clock for replays and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        ManualClock {
            now: AtomicU64::new(start),
        }
    }

    /// Move the clock forward to `time`
    ///
    /// Returns false and leaves the clock untouched if `time` is in the past.
    pub fn advance_to(&self, time: Timestamp) -> bool {
        self.now.fetch_max(time, Ordering::SeqCst) <= time
    }

    pub fn advance_by(&self, seconds: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(seconds))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
