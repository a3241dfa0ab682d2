//! Mapping between caret offsets and sub-fields.
//!
//! Offsets are character indices into the control's text. The hour width is
//! taken from the text itself, since duration hours can be longer than two
//! digits.

use std::ops::Range;

use super::layout::FieldLayout;

/// Width of the hour as currently displayed
fn hour_width(text: &str, separator: &str) -> usize {
    if separator.is_empty() {
        return 2;
    }
    match text.find(separator) {
        Some(byte_idx) => text[..byte_idx].chars().count(),
        None => 2,
    }
}

fn field_width(layout: &FieldLayout, text: &str, separator: &str, index: usize) -> usize {
    match index {
        0 => hour_width(text, separator),
        _ => layout.get(index).map(|f| f.width).unwrap_or(0),
    }
}

/// Separator characters following a field
fn trailing_separator(layout: &FieldLayout, index: usize) -> usize {
    if index < layout.last_numeric_index() {
        layout.separator_len()
    } else {
        0
    }
}

/// Character range covered by a field
pub fn range_for(layout: &FieldLayout, text: &str, separator: &str, field: usize) -> Range<usize> {
    let field = layout.clamp_index(field);
    let start: usize = (0..field)
        .map(|i| field_width(layout, text, separator, i) + trailing_separator(layout, i))
        .sum();
    start..start + field_width(layout, text, separator, field)
}

/// Field containing a caret offset; a caret on a separator belongs to the
/// field before it
pub fn locate(layout: &FieldLayout, text: &str, separator: &str, caret: usize) -> usize {
    let mut end = 0;
    for spec in layout.fields() {
        end += field_width(layout, text, separator, spec.index) + trailing_separator(layout, spec.index);
        if caret < end {
            return spec.index;
        }
    }
    layout.last_index()
}
