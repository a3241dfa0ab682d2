//! Rendering a `TimeValue` as display text and reading it back.
//!
//! Display text is `HH<sep>MM[<sep>SS][<ampmPrefix><AM|PM>]`. An empty
//! separator switches extraction to fixed two-character slices.

use crate::config::EntryOptions;

use super::time::{quantize, TimeValue};

/// Values below 10 get one leading zero
pub fn pad2(value: i64) -> String {
    if (0..10).contains(&value) {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}

/// Display hour for the configured mode
fn display_hour(hour: i64, options: &EntryOptions) -> String {
    if options.unlimited_hours {
        hour.to_string()
    } else if options.show_24_hours {
        pad2(hour)
    } else {
        pad2((hour + 11).rem_euclid(12) + 1)
    }
}

/// Render a time as the control's text
pub fn format_time(value: TimeValue, options: &EntryOptions) -> String {
    let mut text = display_hour(value.hour, options);
    text.push_str(&options.separator);
    text.push_str(&pad2(value.minute));
    if options.show_seconds {
        text.push_str(&options.separator);
        text.push_str(&pad2(value.second));
    }
    if !options.uses_24_hour_display() {
        text.push_str(&options.ampm_prefix);
        text.push_str(&options.ampm_names[usize::from(value.is_pm())]);
    }
    text
}

/// Leading integer of a string: optional whitespace, optional sign, digits.
/// Anything after the digits is ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|v| sign * v)
}

/// Split display text into its numeric parts
fn split_fields(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        if text.is_empty() {
            return Vec::new();
        }
        // Fixed two-character slices; short text yields empty trailing parts
        let chars: Vec<char> = text.chars().collect();
        let slice = |from: usize| -> String { chars.iter().skip(from).take(2).collect() };
        vec![slice(0), slice(2), slice(4)]
    } else {
        text.split(separator).map(str::to_string).collect()
    }
}

/// Read a time from display text, or `None` if it has no hour/minute pair.
///
/// Unparseable numbers read as 0; seconds are ignored unless shown. The
/// result is quantized to the configured steps.
pub fn parse_time_text(text: &str, options: &EntryOptions) -> Option<TimeValue> {
    let parts = split_fields(text, &options.separator);
    if parts.len() < 2 {
        return None;
    }

    let twelve_hour = !options.uses_24_hour_display();
    let is_am = twelve_hour && text.contains(options.ampm_names[0].as_str());
    let is_pm = twelve_hour && text.contains(options.ampm_names[1].as_str());

    let mut hour = parse_leading_int(&parts[0]).unwrap_or(0);
    if (is_am || is_pm) && hour == 12 {
        hour = 0;
    }
    if is_pm {
        hour += 12;
    }
    let minute = parse_leading_int(&parts[1]).unwrap_or(0);
    let second = match parts.get(2) {
        Some(part) if options.show_seconds => parse_leading_int(part).unwrap_or(0),
        _ => 0,
    };

    Some(quantize(
        TimeValue::new(hour, minute, second),
        &options.time_steps,
    ))
}
