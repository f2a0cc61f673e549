//! Time source for deadline checks.

use core::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the current time in seconds.
///
/// The router compares [`Clock::now`] against each request's deadline and
/// fails with [`AmmError::Expired`](crate::error::AmmError::Expired) when
/// `now > deadline`.
pub trait Clock {
    /// Current time in seconds since the UNIX epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // A clock before the epoch reads as zero, which never expires a
        // deadline.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// A settable clock for tests and simulations.
///
/// # Examples
///
/// ```
/// use tenk_amm::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// clock.advance(5);
/// assert_eq!(clock.now(), 105);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Starts at `now`.
    #[must_use]
    pub const fn new(now: u64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Jumps to `now`.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Moves forward by `seconds`, saturating.
    pub fn advance(&self, seconds: u64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}
