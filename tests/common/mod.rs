//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use time_entry::config::EntryOptions;
use time_entry::entry::{Control, EntryMsg, FixedClock, Outcome, TextInput, TimeEntry};
use time_entry::keys::parse_key_string;

/// Clock pinned to 10:00:00
pub const TEN_AM: FixedClock = FixedClock::at(10, 0, 0);

/// Default options with the 24-hour clock
pub fn options_24h() -> EntryOptions {
    EntryOptions {
        show_24_hours: true,
        ..EntryOptions::default()
    }
}

/// Bind an engine to an input holding `text`, caret at the end
pub fn bind_with_text(options: EntryOptions, text: &str) -> (TimeEntry, TextInput) {
    let mut input = TextInput::from_text(text);
    let entry = TimeEntry::bind_with_clock(&mut input, options, TEN_AM);
    (entry, input)
}

/// Bind to an empty input, focus it and flush the deferred tasks
pub fn focused(options: EntryOptions) -> (TimeEntry, TextInput) {
    focused_with_text(options, "")
}

/// Bind to an input holding `text`, focus it and flush the deferred tasks
pub fn focused_with_text(options: EntryOptions, text: &str) -> (TimeEntry, TextInput) {
    let (mut entry, mut input) = bind_with_text(options, text);
    focus(&mut entry, &mut input);
    (entry, input)
}

pub fn focus(entry: &mut TimeEntry, input: &mut TextInput) {
    entry.update(input, EntryMsg::Focus);
    entry.run_deferred(input);
}

/// Type each character as a key-press
pub fn type_str(entry: &mut TimeEntry, input: &mut TextInput, text: &str) {
    for c in text.chars() {
        entry.update(input, EntryMsg::Char(c));
    }
}

/// Send a key-down given in binding notation, e.g. `shift+tab`
pub fn press(entry: &mut TimeEntry, input: &mut TextInput, key: &str) -> Outcome {
    let stroke = parse_key_string(key).unwrap();
    entry.update(input, EntryMsg::Key(stroke))
}

/// Click at a caret offset
pub fn click(entry: &mut TimeEntry, input: &mut TextInput, caret: usize) -> Outcome {
    input.set_caret(caret);
    entry.update(input, EntryMsg::Click { caret })
}

/// Text of the selected field
pub fn selected(input: &TextInput) -> String {
    input.selected_text()
}

pub fn selection(input: &TextInput) -> std::ops::Range<usize> {
    input.selection()
}
