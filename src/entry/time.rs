//! Time model: the `{hour, minute, second}` value, quantization and bounds.
//!
//! A `TimeValue` is interpreted in one of two modes:
//! - wall-clock: a point in a single abstract day, `[00:00:00, 23:59:59]`
//! - duration: an elapsed offset with an unbounded (possibly negative) hour

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Hour, minute and second of a time-of-day or a duration.
///
/// Field order gives the derived `Ord` its lexicographic meaning, which is
/// what duration-mode clamping compares with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeValue {
    pub hour: i64,
    #[serde(default)]
    pub minute: i64,
    #[serde(default)]
    pub second: i64,
}

impl TimeValue {
    pub const fn new(hour: i64, minute: i64, second: i64) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub const fn midnight() -> Self {
        Self::new(0, 0, 0)
    }

    /// Last instant of the day
    pub const fn end_of_day() -> Self {
        Self::new(23, 59, 59)
    }

    /// Build from a field slice, missing trailing fields default to 0
    pub fn from_fields(fields: &[i64]) -> Self {
        let get = |i: usize| fields.get(i).copied().unwrap_or(0);
        Self::new(get(0), get(1), get(2))
    }

    pub const fn to_array(self) -> [i64; 3] {
        [self.hour, self.minute, self.second]
    }

    pub const fn from_array(fields: [i64; 3]) -> Self {
        Self::new(fields[0], fields[1], fields[2])
    }

    /// Seconds since midnight (or since zero for durations), saturating
    pub fn total_seconds(self) -> i64 {
        self.hour
            .saturating_mul(SECONDS_PER_HOUR)
            .saturating_add(self.minute.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(self.second)
    }

    /// Time of day for a second count, wrapping around midnight in both directions
    pub fn from_seconds_of_day(seconds: i64) -> Self {
        let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
        Self::new(
            seconds / SECONDS_PER_HOUR,
            (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds % SECONDS_PER_MINUTE,
        )
    }

    /// Resolve overflowing fields as a same-day clock reading (wraps past midnight)
    pub fn wrap_day(self) -> Self {
        Self::from_seconds_of_day(self.total_seconds())
    }

    /// Carry/borrow seconds into minutes and minutes into an unbounded hour
    pub fn carry(self) -> Self {
        let second = self.second.rem_euclid(SECONDS_PER_MINUTE);
        let minute = self.minute.saturating_add(self.second.div_euclid(SECONDS_PER_MINUTE));
        let hour = self.hour.saturating_add(minute.div_euclid(60));
        Self::new(hour, minute.rem_euclid(60), second)
    }

    /// Offset in milliseconds as reported by `getOffset`
    pub fn offset_millis(self) -> i64 {
        self.total_seconds().saturating_mul(1_000)
    }

    /// Meridiem of a wall-clock value
    pub const fn is_pm(self) -> bool {
        self.hour >= 12
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Parses `H:MM` or `H:MM:SS` (hour may be signed)
impl FromStr for TimeValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(format!("expected HH:MM[:SS], got '{}'", s));
        }
        let mut fields = [0i64; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| format!("invalid time field '{}' in '{}'", part, s))?;
        }
        Ok(Self::from_array(fields))
    }
}

/// Interpretation of a `TimeValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    WallClock,
    /// `unlimitedHours`: the hour is an elapsed count
    Duration,
}

impl TimeMode {
    pub const fn from_unlimited_hours(unlimited: bool) -> Self {
        if unlimited {
            TimeMode::Duration
        } else {
            TimeMode::WallClock
        }
    }
}

/// Per-field quantization steps (hour, minute, second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepConfig {
    steps: [i64; 3],
}

impl Default for StepConfig {
    fn default() -> Self {
        Self { steps: [1, 1, 1] }
    }
}

impl StepConfig {
    pub const fn new(hour: i64, minute: i64, second: i64) -> Self {
        Self {
            steps: [hour, minute, second],
        }
    }

    /// Step for a field index; anything below 1 counts as 1
    pub fn get(&self, field: usize) -> i64 {
        self.steps.get(field).copied().unwrap_or(1).max(1)
    }

    pub fn hour(&self) -> i64 {
        self.get(0)
    }

    pub fn minute(&self) -> i64 {
        self.get(1)
    }

    pub fn second(&self) -> i64 {
        self.get(2)
    }
}

/// Round half up to the nearest multiple of `step` (step > 0)
fn round_to_step(value: i64, step: i64) -> i64 {
    value
        .saturating_mul(2)
        .saturating_add(step)
        .div_euclid(step.saturating_mul(2))
        .saturating_mul(step)
}

/// Round the first field with a step above 1 and zero every field after it.
///
/// Fields before the rounded one are untouched, so only one field in the
/// chain is ever rounded.
pub fn quantize(value: TimeValue, steps: &StepConfig) -> TimeValue {
    let mut fields = value.to_array();
    let mut reset = false;
    for (i, field) in fields.iter_mut().enumerate() {
        let step = steps.get(i);
        if reset {
            *field = 0;
        } else if step > 1 {
            *field = round_to_step(*field, step);
            reset = true;
        }
    }
    TimeValue::from_array(fields)
}

/// Resolve out-of-range fields for the given mode
pub fn normalize(value: TimeValue, mode: TimeMode) -> TimeValue {
    match mode {
        TimeMode::WallClock => value.wrap_day(),
        TimeMode::Duration => value.carry(),
    }
}

/// What to do when the lower bound lies after the upper bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundInversion {
    /// The permitted region is the complement of `(max, min)`; values inside
    /// the gap snap to whichever bound is nearer
    #[default]
    SnapToNearest,
    /// Inverted bounds are not enforced at all
    Ignore,
}

/// Resolved lower/upper limits for a single comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<TimeValue>,
    pub max: Option<TimeValue>,
}

impl Bounds {
    pub const fn new(min: Option<TimeValue>, max: Option<TimeValue>) -> Self {
        Self { min, max }
    }

    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Both bounds present and min after max (as same-day instants)
    pub fn is_inverted(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min.total_seconds() > max.total_seconds(),
            _ => false,
        }
    }
}

/// Clamp a wall-clock value, comparing as same-day instants
pub fn clamp_wall_clock(value: TimeValue, bounds: &Bounds, inversion: BoundInversion) -> TimeValue {
    let t = value.total_seconds();
    if bounds.is_inverted() {
        let (Some(min), Some(max)) = (bounds.min, bounds.max) else {
            return value;
        };
        if inversion == BoundInversion::Ignore {
            return value;
        }
        let (lo, hi) = (min.total_seconds(), max.total_seconds());
        if t < lo && t > hi {
            return if (t - lo).abs() < (t - hi).abs() {
                min
            } else {
                max
            };
        }
        return value;
    }

    match (bounds.min, bounds.max) {
        (Some(min), _) if t < min.total_seconds() => min,
        (_, Some(max)) if t > max.total_seconds() => max,
        _ => value,
    }
}

/// Clamp a duration lexicographically, lower bound first, then upper bound
pub fn clamp_duration(value: TimeValue, min: TimeValue, max: Option<TimeValue>) -> TimeValue {
    let value = value.max(min);
    match max {
        Some(max) if value > max => max,
        _ => value,
    }
}
