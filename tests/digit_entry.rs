//! Digit entry tests - combining digits, 12/24-hour rules, duration hours

mod common;

use common::{focused, focused_with_text, options_24h, press, selected, type_str};
use time_entry::config::EntryOptions;
use time_entry::entry::{EntryMsg, Outcome, StepConfig, TimeSetting, TimeValue};

// ========================================================================
// 24-hour clock
// ========================================================================

#[test]
fn test_two_digits_combine_into_hour() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "1");
    assert_eq!(input.as_str(), "01:00");
    type_str(&mut entry, &mut input, "1");
    assert_eq!(input.as_str(), "11:00");
    assert_eq!(selected(&input), "11");
}

#[test]
fn test_out_of_range_pair_keeps_last_digit() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "25");
    assert_eq!(input.as_str(), "05:00");
}

#[test]
fn test_third_digit_starts_a_new_pair() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "12");
    assert_eq!(input.as_str(), "12:00");
    type_str(&mut entry, &mut input, "3");
    assert_eq!(input.as_str(), "03:00");
    // "31" is out of range, so 1 alone
    type_str(&mut entry, &mut input, "1");
    assert_eq!(input.as_str(), "01:00");
}

#[test]
fn test_minute_digits() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "08:00");
    press(&mut entry, &mut input, "right");
    type_str(&mut entry, &mut input, "47");
    assert_eq!(input.as_str(), "08:47");
    type_str(&mut entry, &mut input, "9");
    // "79" is out of range, so 9 alone
    assert_eq!(input.as_str(), "08:09");
}

#[test]
fn test_backspace_clears_pending_digit_only() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "1");
    assert_eq!(press(&mut entry, &mut input, "backspace"), Outcome::Handled);
    assert_eq!(input.as_str(), "01:00");
    type_str(&mut entry, &mut input, "2");
    assert_eq!(input.as_str(), "02:00");
}

#[test]
fn test_field_change_clears_pending_digit() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "08:00");
    press(&mut entry, &mut input, "left");
    type_str(&mut entry, &mut input, "1");
    press(&mut entry, &mut input, "right");
    press(&mut entry, &mut input, "left");
    type_str(&mut entry, &mut input, "2");
    assert_eq!(input.as_str(), "02:00");
}

#[test]
fn test_every_digit_notifies_change() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "14");
    assert_eq!(input.change_count, 2);
}

// ========================================================================
// 12-hour clock
// ========================================================================

#[test]
fn test_twelve_typed_in_the_morning_is_midnight() {
    let (mut entry, mut input) = focused(EntryOptions {
        default_time: Some(TimeSetting::triple(9, 0, 0)),
        ..EntryOptions::default()
    });
    assert_eq!(input.as_str(), "09:00AM");
    type_str(&mut entry, &mut input, "12");
    assert_eq!(input.as_str(), "12:00AM");
    assert_eq!(entry.get_time(&input), Some(TimeValue::new(0, 0, 0)));
}

#[test]
fn test_hour_digits_keep_afternoon() {
    let (mut entry, mut input) = focused_with_text(EntryOptions::default(), "03:15PM");
    press(&mut entry, &mut input, "home");
    type_str(&mut entry, &mut input, "7");
    assert_eq!(input.as_str(), "07:15PM");
    assert_eq!(entry.get_time(&input), Some(TimeValue::new(19, 15, 0)));
}

#[test]
fn test_zero_alone_keeps_hour() {
    let (mut entry, mut input) = focused_with_text(EntryOptions::default(), "05:00AM");
    press(&mut entry, &mut input, "home");
    type_str(&mut entry, &mut input, "0");
    assert_eq!(input.as_str(), "05:00AM");
}

#[test]
fn test_meridiem_letters_toggle() {
    let (mut entry, mut input) = focused_with_text(EntryOptions::default(), "10:30PM");
    press(&mut entry, &mut input, "home");

    assert_eq!(entry.update(&mut input, EntryMsg::Char('a')), Outcome::Handled);
    assert_eq!(input.as_str(), "10:30AM");
    assert_eq!(entry.focused_field(), 0);
    assert_eq!(selected(&input), "10");

    // Already AM: nothing to flip
    assert_eq!(entry.update(&mut input, EntryMsg::Char('A')), Outcome::Ignored);
    assert_eq!(entry.update(&mut input, EntryMsg::Char('P')), Outcome::Handled);
    assert_eq!(input.as_str(), "10:30PM");
}

#[test]
fn test_letters_ignored_on_24_hour_clock() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "10:30");
    assert_eq!(entry.update(&mut input, EntryMsg::Char('p')), Outcome::Ignored);
    assert_eq!(input.as_str(), "10:30");
}

// ========================================================================
// Separators and auto-advance
// ========================================================================

#[test]
fn test_separator_moves_to_next_field() {
    let (mut entry, mut input) = focused(options_24h());
    type_str(&mut entry, &mut input, "9:5");
    assert_eq!(input.as_str(), "09:05");
    assert_eq!(entry.focused_field(), 1);
}

#[test]
fn test_no_separator_entry_advances_after_two_digits() {
    let (mut entry, mut input) = focused(EntryOptions {
        no_separator_entry: true,
        ..options_24h()
    });
    type_str(&mut entry, &mut input, "1430");
    assert_eq!(input.as_str(), "14:30");
    assert_eq!(entry.focused_field(), 1);
}

#[test]
fn test_control_characters_pass_through() {
    let (mut entry, mut input) = focused(options_24h());
    assert_eq!(entry.update(&mut input, EntryMsg::Char('\r')), Outcome::PassThrough);
}

#[test]
fn test_shortcuts_pass_through() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "10:30");
    assert_eq!(press(&mut entry, &mut input, "ctrl+c"), Outcome::PassThrough);
    assert_eq!(press(&mut entry, &mut input, "cmd+v"), Outcome::PassThrough);
    assert_eq!(input.as_str(), "10:30");
}

// ========================================================================
// Steps
// ========================================================================

#[test]
fn test_typed_minutes_round_to_step() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            time_steps: StepConfig::new(1, 15, 1),
            ..options_24h()
        },
        "10:00",
    );
    press(&mut entry, &mut input, "right");
    type_str(&mut entry, &mut input, "7");
    assert_eq!(input.as_str(), "10:00");
    type_str(&mut entry, &mut input, "8");
    // "78" is out of range, 8 rounds up to 15
    assert_eq!(input.as_str(), "10:15");
}

#[test]
fn test_rounding_carries_into_hour() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            time_steps: StepConfig::new(1, 15, 1),
            ..options_24h()
        },
        "10:00",
    );
    press(&mut entry, &mut input, "right");
    type_str(&mut entry, &mut input, "53");
    assert_eq!(input.as_str(), "11:00");
}

// ========================================================================
// Duration mode
// ========================================================================

#[test]
fn test_duration_hours_accumulate_digits() {
    let (mut entry, mut input) = focused(EntryOptions {
        unlimited_hours: true,
        ..EntryOptions::default()
    });
    type_str(&mut entry, &mut input, "125");
    assert_eq!(input.as_str(), "125:00");
    assert_eq!(selected(&input), "125");
    assert_eq!(entry.get_time(&input), Some(TimeValue::new(125, 0, 0)));
}

#[test]
fn test_duration_minutes_stay_two_digit() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            unlimited_hours: true,
            ..EntryOptions::default()
        },
        "30:00",
    );
    press(&mut entry, &mut input, "right");
    type_str(&mut entry, &mut input, "45");
    assert_eq!(input.as_str(), "30:45");
    assert_eq!(selected(&input), "45");
}
