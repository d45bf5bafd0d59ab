//! Injectable source of the current time.
//!
//! Liveness checks and expiry purges both compare against "now". Reading it
//! through [`Clock`] keeps the shortening service and the reaper
//! deterministic under test.

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use std::sync::Mutex;

/// Provides the current local wall time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to.
///
/// Used by tests to step across expiry boundaries without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Starts at the current system time truncated to whole seconds.
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now().trunc_subsecs(0))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
