//! Spinner-style time entry for a single-line text input.
//!
//! The engine turns host events (keys, characters, clicks, wheel ticks,
//! focus changes, pastes) into edits of a time shown as hour, minute, optional
//! second and optional AM/PM sub-fields.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TimeValue`]: Hour/minute/second triple, the model of every transition
//! - [`TimeSetting`] / [`Resolver`]: Times given as values, offsets or expressions
//! - [`FieldLayout`]: Which sub-fields exist for the current options
//! - [`format_time`] / [`parse_time_text`]: Text rendering and extraction
//! - [`Control`]: What the engine needs from the host's text input
//! - [`EntryMsg`] / [`Outcome`]: Normalized input events and their results
//! - [`DeferredQueue`]: Work the host runs one event loop turn later
//! - [`TimeEntry`]: The state machine tying the above together
//!
//! Every accepted transition runs the same pipeline: quantize to the time
//! steps, normalize for the mode, clamp to the bounds, pass through the
//! `beforeSetTime` hook, then render and select the focused field.
//!
//! # Example
//!
//! ```ignore
//! use time_entry::config::EntryOptions;
//! use time_entry::entry::{EntryMsg, FixedClock, TextInput, TimeEntry};
//!
//! let mut input = TextInput::new();
//! let options = EntryOptions { show_24_hours: true, ..EntryOptions::default() };
//! let mut entry = TimeEntry::bind_with_clock(&mut input, options, FixedClock::at(10, 0, 0));
//!
//! entry.update(&mut input, EntryMsg::Focus);
//! entry.run_deferred(&mut input);
//! entry.update(&mut input, EntryMsg::Char('1'));
//! entry.update(&mut input, EntryMsg::Char('4'));
//!
//! assert_eq!(input.as_str(), "14:00");
//! ```

mod clock;
mod control;
mod deferred;
mod expr;
mod format;
mod layout;
mod messages;
mod selection;
mod state;
mod time;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
pub use control::{Control, TextInput};
pub use deferred::{DeferredQueue, DeferredTask};
pub use expr::{Resolver, TimeSetting};
pub use format::{format_time, pad2, parse_time_text};
pub use layout::{FieldKind, FieldLayout, FieldSpec};
pub use messages::{EntryMsg, Outcome};
pub use selection::{locate, range_for};
pub use state::{EditorState, TimeEntry};
pub use time::{
    clamp_duration, clamp_wall_clock, normalize, quantize, BoundInversion, Bounds, StepConfig,
    TimeMode, TimeValue, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
