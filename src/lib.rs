//! Time Entry - spinner-style time input engine
//!
//! This crate provides the keystroke state machine behind a time entry
//! field: typed digits, field navigation, wheel and arrow stepping, bounds
//! and relative time expressions, independent of any UI toolkit.

pub mod cli;
pub mod config;
pub mod entry;
pub mod keys;
pub mod locale;
pub mod tracing;

// Re-export commonly used types
pub use config::{EntryOptions, OptionsPatch};
pub use entry::{Control, EntryMsg, Outcome, TextInput, TimeEntry, TimeSetting, TimeValue};
pub use keys::{KeyCode, Keystroke, Modifiers};
pub use locale::Locale;
