//! Capabilities the engine needs from the host's text input.

use std::ops::Range;

/// A single-line text input owned by the host UI.
///
/// Offsets and ranges are in characters.
pub trait Control {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    /// Current selection; a collapsed range is the caret
    fn selection(&self) -> Range<usize>;

    fn set_selection(&mut self, range: Range<usize>);

    fn is_disabled(&self) -> bool {
        false
    }

    fn is_hidden(&self) -> bool {
        false
    }

    /// Move keyboard focus to the control
    fn focus(&mut self) {}

    /// Deliver the host's "value changed" notification
    fn notify_changed(&mut self) {}

    /// Caret offset (start of the selection)
    fn caret(&self) -> usize {
        self.selection().start
    }
}

/// In-memory control for tests and scripted sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    selection: Range<usize>,
    pub disabled: bool,
    pub hidden: bool,
    pub focused: bool,
    /// Number of change notifications delivered
    pub change_count: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let len = text.chars().count();
        Self {
            text: text.to_string(),
            selection: len..len,
            ..Self::default()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Selected text (empty when collapsed)
    pub fn selected_text(&self) -> String {
        self.text
            .chars()
            .skip(self.selection.start)
            .take(self.selection.end.saturating_sub(self.selection.start))
            .collect()
    }

    /// Place the caret, as a mouse click would
    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.len_chars());
        self.selection = offset..offset;
    }

    /// Replace the whole value, as a paste into a fully selected input would
    pub fn paste(&mut self, text: &str) {
        self.text = text.to_string();
        let len = self.len_chars();
        self.selection = len..len;
    }
}

impl Control for TextInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let len = self.len_chars();
        self.selection = self.selection.start.min(len)..self.selection.end.min(len);
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        self.selection = start..range.end.clamp(start, len);
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn notify_changed(&mut self) {
        self.change_count += 1;
    }
}
