//! Sub-field layout derived from configuration.

use crate::config::EntryOptions;

/// Kind of an editable sub-field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Hour,
    Minute,
    Second,
    Meridiem,
}

impl FieldKind {
    /// Whether the field renders as a number
    pub fn is_numeric(self) -> bool {
        !matches!(self, FieldKind::Meridiem)
    }
}

/// One sub-field of the displayed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub index: usize,
    pub kind: FieldKind,
    /// Nominal width in characters
    pub width: usize,
}

/// Ordered sub-fields: hour, minute, optional second, optional meridiem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    fields: Vec<FieldSpec>,
    separator_len: usize,
}

impl FieldLayout {
    pub fn from_options(options: &EntryOptions) -> Self {
        let mut kinds = vec![FieldKind::Hour, FieldKind::Minute];
        if options.show_seconds {
            kinds.push(FieldKind::Second);
        }
        if !options.uses_24_hour_display() {
            kinds.push(FieldKind::Meridiem);
        }

        let meridiem_width =
            options.ampm_prefix.chars().count() + options.ampm_names[0].chars().count();
        let fields = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| FieldSpec {
                index,
                kind,
                width: if kind.is_numeric() { 2 } else { meridiem_width },
            })
            .collect();

        Self {
            fields,
            separator_len: options.separator.chars().count(),
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn separator_len(&self) -> usize {
        self.separator_len
    }

    pub fn get(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub fn kind_at(&self, index: usize) -> Option<FieldKind> {
        self.get(index).map(|f| f.kind)
    }

    pub fn last_index(&self) -> usize {
        self.fields.len().saturating_sub(1)
    }

    /// Index of the last numeric field (no separator follows it)
    pub fn last_numeric_index(&self) -> usize {
        self.fields
            .iter()
            .rev()
            .find(|f| f.kind.is_numeric())
            .map(|f| f.index)
            .unwrap_or(0)
    }

    pub fn index_of(&self, kind: FieldKind) -> Option<usize> {
        self.fields.iter().find(|f| f.kind == kind).map(|f| f.index)
    }

    pub fn second_index(&self) -> Option<usize> {
        self.index_of(FieldKind::Second)
    }

    pub fn meridiem_index(&self) -> Option<usize> {
        self.index_of(FieldKind::Meridiem)
    }

    /// Clamp a requested field index into range
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }
}
