//! Relative time settings.
//!
//! A setting resolves to a time of day. Supported forms:
//! - explicit time: `TimeValue`
//! - seconds from now: `+300`, `-2`
//! - expression: `"+1h +30m"`, `"-4H"`, `"12:34:56PM"`, `"!+3h"`
//! - field triple: `[9]`, `[9, 30]`, `[9, 30, 15]`
//!
//! Malformed expressions never fail, they fall back to the current time.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::EntryOptions;

use super::clock::Clock;
use super::format::parse_time_text;
use super::time::{TimeValue, SECONDS_PER_DAY};

/// A time given absolutely or relative to now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSetting", into = "RawSetting")]
pub enum TimeSetting {
    /// An exact time
    ExplicitTime(TimeValue),
    /// Current time plus N seconds
    SecondsOffset(i64),
    /// Free-form text: an explicit time or offset tokens
    Expression(String),
    /// Direct fields; in duration mode the hour is not wrapped
    DurationTriple(TimeValue),
}

impl TimeSetting {
    pub fn triple(hour: i64, minute: i64, second: i64) -> Self {
        TimeSetting::DurationTriple(TimeValue::new(hour, minute, second))
    }

    pub fn expression(text: impl Into<String>) -> Self {
        TimeSetting::Expression(text.into())
    }

    /// Empty text means "no value"
    pub fn is_blank(&self) -> bool {
        matches!(self, TimeSetting::Expression(text) if text.is_empty())
    }
}

impl From<TimeValue> for TimeSetting {
    fn from(value: TimeValue) -> Self {
        TimeSetting::ExplicitTime(value)
    }
}

impl From<i64> for TimeSetting {
    fn from(seconds: i64) -> Self {
        TimeSetting::SecondsOffset(seconds)
    }
}

impl From<&str> for TimeSetting {
    fn from(text: &str) -> Self {
        TimeSetting::Expression(text.to_string())
    }
}

impl From<[i64; 3]> for TimeSetting {
    fn from(fields: [i64; 3]) -> Self {
        TimeSetting::DurationTriple(TimeValue::from_array(fields))
    }
}

/// Wire shape of a setting in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Number(i64),
    Text(String),
    Fields(Vec<i64>),
    Time(TimeValue),
}

impl From<RawSetting> for TimeSetting {
    fn from(raw: RawSetting) -> Self {
        match raw {
            RawSetting::Number(seconds) => TimeSetting::SecondsOffset(seconds),
            RawSetting::Text(text) => TimeSetting::Expression(text),
            RawSetting::Fields(fields) => TimeSetting::DurationTriple(TimeValue::from_fields(&fields)),
            RawSetting::Time(value) => TimeSetting::ExplicitTime(value),
        }
    }
}

impl From<TimeSetting> for RawSetting {
    fn from(setting: TimeSetting) -> Self {
        match setting {
            TimeSetting::SecondsOffset(seconds) => RawSetting::Number(seconds),
            TimeSetting::Expression(text) => RawSetting::Text(text),
            TimeSetting::DurationTriple(value) => RawSetting::Fields(value.to_array().to_vec()),
            TimeSetting::ExplicitTime(value) => RawSetting::Time(value),
        }
    }
}

/// Offset token: signed integer with an optional unit (seconds by default)
static OFFSET_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-]?[0-9]+)\s*([sSmMhH])?").expect("offset token pattern is valid")
});

/// Resolves settings against the current options and clock
pub struct Resolver<'a> {
    options: &'a EntryOptions,
    clock: &'a dyn Clock,
}

impl<'a> Resolver<'a> {
    pub fn new(options: &'a EntryOptions, clock: &'a dyn Clock) -> Self {
        Self { options, clock }
    }

    /// Time of day for a setting, or `None` when there is no setting
    pub fn resolve(&self, setting: Option<&TimeSetting>) -> Option<TimeValue> {
        let value = match setting? {
            TimeSetting::ExplicitTime(value) | TimeSetting::DurationTriple(value) => {
                value.wrap_day()
            }
            TimeSetting::SecondsOffset(seconds) => TimeValue::from_seconds_of_day(
                self.clock.now().total_seconds().saturating_add(*seconds),
            ),
            TimeSetting::Expression(text) => self.resolve_expression(text),
        };
        Some(value)
    }

    /// Evaluate free-form text.
    ///
    /// Text that reads as a displayed time is taken as-is; otherwise every
    /// offset token is added to the current time, left to right. A leading
    /// `!` pins results that leave the day to its first or last instant.
    pub fn resolve_expression(&self, text: &str) -> TimeValue {
        let base = match parse_time_text(text, self.options) {
            Some(explicit) => explicit,
            None => self.apply_offsets(self.clock.now(), text),
        };

        let total = base.total_seconds();
        if text.starts_with('!') {
            match total.div_euclid(SECONDS_PER_DAY) {
                day if day > 0 => return TimeValue::end_of_day(),
                day if day < 0 => return TimeValue::midnight(),
                _ => {}
            }
        }
        TimeValue::from_seconds_of_day(total)
    }

    fn apply_offsets(&self, now: TimeValue, text: &str) -> TimeValue {
        let mut value = now;
        for caps in OFFSET_TOKEN.captures_iter(text) {
            let Some(amount) = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok()) else {
                tracing::debug!("Skipping out-of-range offset token in {:?}", text);
                continue;
            };
            match caps.get(2).map(|m| m.as_str()) {
                Some("h" | "H") => value.hour = value.hour.saturating_add(amount),
                Some("m" | "M") => value.minute = value.minute.saturating_add(amount),
                _ => value.second = value.second.saturating_add(amount),
            }
        }
        value
    }
}
