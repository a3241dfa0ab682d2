//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! field navigation, digit entry, and deferred task issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=time_entry::entry=trace` - engine state diffs per event
//! - `RUST_LOG=time_entry::config=debug` - module-level filtering
//!
//! # Log Files
//!
//! When a log directory is given, logs are also written to
//! `<dir>/time-entry.log` with daily rotation at debug level.

use std::ops::Range;
use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::entry::{Control, TimeEntry, TimeValue};

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `<log_dir>/time-entry.log` with daily rotation.
pub fn init(log_dir: Option<PathBuf>) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match log_dir.map(|dir| std::fs::create_dir_all(&dir).map(|_| dir)) {
        Some(Ok(logs_dir)) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "time-entry.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Some(Err(e)) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of engine and control state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    pub field: usize,
    pub pending: String,
    pub tracking: bool,
    pub value: TimeValue,
    pub text: String,
    pub selection: Range<usize>,
}

impl EntrySnapshot {
    pub fn capture<C: Control>(entry: &TimeEntry, control: &C) -> Self {
        let state = entry.state();
        Self {
            field: state.field,
            pending: state.pending.clone(),
            tracking: state.tracking,
            value: state.value,
            text: control.text().to_string(),
            selection: control.selection(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &EntrySnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.text != other.text {
            changes.push(format!("text: {:?} → {:?}", self.text, other.text));
        }
        if self.value != other.value {
            changes.push(format!("value: {} → {}", self.value, other.value));
        }
        if self.field != other.field {
            changes.push(format!("field: {} → {}", self.field, other.field));
        }
        if self.pending != other.pending {
            changes.push(format!("pending: {:?} → {:?}", self.pending, other.pending));
        }
        if self.selection != other.selection {
            changes.push(format!("selection: {:?} → {:?}", self.selection, other.selection));
        }
        if self.tracking != other.tracking {
            let status = if other.tracking { "tracking" } else { "released" };
            changes.push(format!("focus {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str, field: usize) -> EntrySnapshot {
        EntrySnapshot {
            field,
            pending: String::new(),
            tracking: true,
            value: TimeValue::new(10, 0, 0),
            text: text.to_string(),
            selection: 0..2,
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        assert_eq!(snapshot("10:00", 0).diff(&snapshot("10:00", 0)), None);
    }

    #[test]
    fn test_diff_lists_changes() {
        let before = snapshot("10:00", 0);
        let mut after = snapshot("10:00", 1);
        after.selection = 3..5;
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("field: 0 → 1"));
        assert!(diff.contains("selection: 0..2 → 3..5"));
        assert!(!diff.contains("text"));
    }
}
