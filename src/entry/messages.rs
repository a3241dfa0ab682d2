//! Input events for the time entry engine and their outcomes.

use crate::keys::{KeyCode, Keystroke};

/// Normalized event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryMsg {
    /// The control gained keyboard focus
    Focus,
    /// The control lost keyboard focus
    Blur,
    /// Mouse click; `caret` is the resulting caret offset
    Click { caret: usize },
    /// Key-down of a navigation or editing key
    Key(Keystroke),
    /// A typed character (key-press)
    Char(char),
    /// One wheel tick; only the sign of `delta` matters, positive steps up
    Wheel { delta: f64 },
    /// Text was pasted; parsed once it has landed in the control
    Paste,
}

impl EntryMsg {
    /// Key-down without modifiers
    pub fn key(code: KeyCode) -> Self {
        EntryMsg::Key(Keystroke::key(code))
    }
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Consumed; suppress the host's default action
    Handled,
    /// Consumed without any transition; suppress the default action
    Ignored,
    /// Not consumed; let the host's default action run
    PassThrough,
    /// Move focus out of the control
    Exit,
}

impl Outcome {
    /// Whether the host should cancel its default handling
    pub fn prevents_default(self) -> bool {
        matches!(self, Outcome::Handled | Outcome::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevents_default() {
        assert!(Outcome::Handled.prevents_default());
        assert!(Outcome::Ignored.prevents_default());
        assert!(!Outcome::PassThrough.prevents_default());
        assert!(!Outcome::Exit.prevents_default());
    }
}
