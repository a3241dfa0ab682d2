//! Field navigation tests - arrows, tab, home/end, clicks, wheel

mod common;

use common::{
    click, focused, focused_with_text, options_24h, press, selected, selection, type_str,
};
use time_entry::config::EntryOptions;
use time_entry::entry::{EntryMsg, FieldKind, Outcome, StepConfig, TimeSetting, TimeValue};

fn with_seconds() -> EntryOptions {
    EntryOptions {
        show_seconds: true,
        ..EntryOptions::default()
    }
}

// ========================================================================
// Field selection
// ========================================================================

#[test]
fn test_focus_locates_field_from_caret() {
    let (entry, input) = focused_with_text(with_seconds(), "10:30:15PM");
    assert_eq!(entry.focused_field(), 3);
    assert_eq!(entry.focused_kind(), Some(FieldKind::Meridiem));
    assert_eq!(selection(&input), 8..10);
    assert_eq!(selected(&input), "PM");
}

#[test]
fn test_left_and_right_walk_fields() {
    let (mut entry, mut input) = focused_with_text(with_seconds(), "10:30:15PM");

    press(&mut entry, &mut input, "left");
    assert_eq!(selected(&input), "15");
    press(&mut entry, &mut input, "left");
    assert_eq!(selected(&input), "30");
    press(&mut entry, &mut input, "left");
    assert_eq!(selected(&input), "10");

    // Stops at the first field
    press(&mut entry, &mut input, "left");
    assert_eq!(entry.focused_field(), 0);

    press(&mut entry, &mut input, "right");
    assert_eq!(selection(&input), 3..5);
}

#[test]
fn test_home_and_end() {
    let (mut entry, mut input) = focused_with_text(with_seconds(), "10:30:15PM");
    press(&mut entry, &mut input, "home");
    assert_eq!(selected(&input), "10");
    press(&mut entry, &mut input, "end");
    assert_eq!(selected(&input), "PM");
    assert_eq!(input.as_str(), "10:30:15PM");
}

#[test]
fn test_tab_moves_then_exits() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "10:30");
    press(&mut entry, &mut input, "home");

    assert_eq!(press(&mut entry, &mut input, "tab"), Outcome::Handled);
    assert_eq!(entry.focused_field(), 1);
    assert_eq!(press(&mut entry, &mut input, "tab"), Outcome::Exit);

    assert_eq!(press(&mut entry, &mut input, "shift+tab"), Outcome::Handled);
    assert_eq!(entry.focused_field(), 0);
    assert_eq!(press(&mut entry, &mut input, "shift+tab"), Outcome::Exit);
}

#[test]
fn test_tab_to_exit_always_leaves() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            tab_to_exit: true,
            ..options_24h()
        },
        "10:30",
    );
    press(&mut entry, &mut input, "home");
    assert_eq!(press(&mut entry, &mut input, "tab"), Outcome::Exit);
    assert_eq!(entry.focused_field(), 0);
}

#[test]
fn test_tab_on_empty_control_exits() {
    let (mut entry, mut input) = focused(options_24h());
    assert_eq!(press(&mut entry, &mut input, "tab"), Outcome::Exit);
}

#[test]
fn test_enter_and_escape_pass_through() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "10:30");
    assert_eq!(press(&mut entry, &mut input, "enter"), Outcome::PassThrough);
    assert_eq!(press(&mut entry, &mut input, "escape"), Outcome::PassThrough);
}

// ========================================================================
// Clicks
// ========================================================================

#[test]
fn test_focusing_click_keeps_initial_field() {
    let options = EntryOptions {
        initial_field: Some(1),
        ..options_24h()
    };
    let (mut entry, mut input) = common::bind_with_text(options, "10:30");
    entry.update(&mut input, EntryMsg::Focus);
    click(&mut entry, &mut input, 0);
    entry.run_deferred(&mut input);
    assert_eq!(entry.focused_field(), 1);
    assert_eq!(selected(&input), "30");

    click(&mut entry, &mut input, 1);
    assert_eq!(entry.focused_field(), 0);
    assert_eq!(selected(&input), "10");
}

#[test]
fn test_click_on_separator_selects_field_before() {
    let (mut entry, mut input) = focused_with_text(with_seconds(), "10:30:15PM");
    // The first click after focus is taken as the one that delivered it
    click(&mut entry, &mut input, 0);
    assert_eq!(entry.focused_field(), 3);

    click(&mut entry, &mut input, 5);
    assert_eq!(entry.focused_field(), 1);
    click(&mut entry, &mut input, 7);
    assert_eq!(entry.focused_field(), 2);
    click(&mut entry, &mut input, 9);
    assert_eq!(entry.focused_field(), 3);
}

// ========================================================================
// Stepping
// ========================================================================

#[test]
fn test_arrows_step_focused_field() {
    let (mut entry, mut input) = focused_with_text(with_seconds(), "10:30:15PM");
    press(&mut entry, &mut input, "home");
    press(&mut entry, &mut input, "down");
    assert_eq!(input.as_str(), "09:30:15PM");
    press(&mut entry, &mut input, "right");
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "09:31:15PM");
    assert_eq!(selected(&input), "31");
}

#[test]
fn test_step_on_meridiem_flips_half_day() {
    let (mut entry, mut input) = focused_with_text(EntryOptions::default(), "10:30AM");
    assert_eq!(selected(&input), "AM");
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "10:30PM");
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "10:30AM");
}

#[test]
fn test_stepping_wraps_around_the_day() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "23:59");
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "00:00");
    press(&mut entry, &mut input, "down");
    assert_eq!(input.as_str(), "23:59");
}

#[test]
fn test_steps_apply_to_arrows() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            time_steps: StepConfig::new(1, 15, 1),
            ..options_24h()
        },
        "10:45",
    );
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "11:00");
}

#[test]
fn test_duration_minutes_carry_into_hours() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            unlimited_hours: true,
            ..EntryOptions::default()
        },
        "99:59",
    );
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "100:00");
    assert_eq!(selection(&input), 4..6);
}

#[test]
fn test_wheel_steps_by_sign() {
    let (mut entry, mut input) = focused_with_text(options_24h(), "10:30");
    press(&mut entry, &mut input, "home");
    entry.update(&mut input, EntryMsg::Wheel { delta: 120.0 });
    assert_eq!(input.as_str(), "11:30");
    entry.update(&mut input, EntryMsg::Wheel { delta: -3.5 });
    entry.update(&mut input, EntryMsg::Wheel { delta: -0.5 });
    assert_eq!(input.as_str(), "09:30");
}

#[test]
fn test_wheel_on_empty_control_seeds_default_first() {
    let (mut entry, mut input) = common::bind_with_text(
        EntryOptions {
            default_time: Some(TimeSetting::triple(9, 0, 0)),
            ..EntryOptions::default()
        },
        "",
    );
    entry.set_time(&mut input, None);
    assert_eq!(input.as_str(), "");

    assert_eq!(entry.update(&mut input, EntryMsg::Wheel { delta: 1.0 }), Outcome::Handled);
    assert_eq!(input.as_str(), "10:00AM");
    assert!(input.focused);
    entry.run_deferred(&mut input);
    assert_eq!(selected(&input), "10");
}

#[test]
fn test_wheel_disabled_by_option() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            use_mouse_wheel: false,
            ..options_24h()
        },
        "10:30",
    );
    assert_eq!(
        entry.update(&mut input, EntryMsg::Wheel { delta: 1.0 }),
        Outcome::PassThrough
    );
    assert_eq!(input.as_str(), "10:30");
}

#[test]
fn test_arrows_on_empty_control_render_without_stepping() {
    let (mut entry, mut input) = focused(options_24h());
    press(&mut entry, &mut input, "up");
    assert_eq!(input.as_str(), "10:00");
}

#[test]
fn test_stepping_a_maximal_duration_hour_saturates() {
    let (mut entry, mut input) = focused(EntryOptions {
        unlimited_hours: true,
        ..EntryOptions::default()
    });
    type_str(&mut entry, &mut input, "9223372036854775807");
    assert_eq!(input.as_str(), "9223372036854775807:00");

    press(&mut entry, &mut input, "up");
    entry.update(&mut input, EntryMsg::Wheel { delta: 1.0 });
    assert_eq!(input.as_str(), "9223372036854775807:00");
    assert_eq!(entry.get_time(&input), Some(TimeValue::new(i64::MAX, 0, 0)));
}

#[test]
fn test_duration_digits_restart_when_too_long() {
    let (mut entry, mut input) = focused(EntryOptions {
        unlimited_hours: true,
        ..EntryOptions::default()
    });
    type_str(&mut entry, &mut input, "9223372036854775807");
    type_str(&mut entry, &mut input, "4");
    assert_eq!(input.as_str(), "4:00");
    type_str(&mut entry, &mut input, "2");
    assert_eq!(input.as_str(), "42:00");
}

#[test]
fn test_huge_steps_do_not_overflow() {
    let (mut entry, mut input) = focused_with_text(
        EntryOptions {
            time_steps: StepConfig::new(i64::MAX, i64::MAX, 1),
            ..options_24h()
        },
        "10:30",
    );
    press(&mut entry, &mut input, "home");
    entry.update(&mut input, EntryMsg::Wheel { delta: 1.0 });
    entry.update(&mut input, EntryMsg::Wheel { delta: -1.0 });
    press(&mut entry, &mut input, "right");
    press(&mut entry, &mut input, "up");
    press(&mut entry, &mut input, "down");
    assert!(entry.get_time(&input).is_some());
}
