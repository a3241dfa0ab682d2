//! Time source for "now"-relative settings.
//!
//! The engine never reads the system clock directly, so hosts and tests can
//! pin the current time.

use chrono::{Local, Timelike};

use super::time::TimeValue;

/// Provides the current wall-clock time of day
pub trait Clock {
    fn now(&self) -> TimeValue;
}

/// Local time of the machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeValue {
        let now = Local::now();
        TimeValue::new(
            i64::from(now.hour()),
            i64::from(now.minute()),
            i64::from(now.second()),
        )
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub TimeValue);

impl FixedClock {
    pub const fn at(hour: i64, minute: i64, second: i64) -> Self {
        Self(TimeValue::new(hour, minute, second))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> TimeValue {
        self.0.wrap_day()
    }
}
