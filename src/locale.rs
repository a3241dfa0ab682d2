//! Regional presets for the display of times.
//!
//! A preset is a plain value; pick one with [`Locale::preset`] and merge it
//! into the options with [`Locale::into_patch`].

use crate::config::OptionsPatch;

/// Regional display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub code: &'static str,
    pub separator: String,
    pub ampm_prefix: String,
    pub ampm_names: [String; 2],
    pub show_24_hours: bool,
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl Locale {
    /// 12-hour clock with `AM`/`PM`
    pub fn english() -> Self {
        Self {
            code: "en",
            separator: ":".to_string(),
            ampm_prefix: String::new(),
            ampm_names: ["AM".to_string(), "PM".to_string()],
            show_24_hours: false,
        }
    }

    /// 24-hour clock
    pub fn german() -> Self {
        Self {
            code: "de",
            show_24_hours: true,
            ..Self::english()
        }
    }

    /// Look up a preset by language code (`en`, `de`, `de-AT`, ...)
    pub fn preset(code: &str) -> Option<Self> {
        let language = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "" | "en" => Some(Self::english()),
            "de" => Some(Self::german()),
            _ => {
                tracing::warn!("No locale preset for {:?}", code);
                None
            }
        }
    }

    pub fn into_patch(self) -> OptionsPatch {
        OptionsPatch {
            separator: Some(self.separator),
            ampm_prefix: Some(self.ampm_prefix),
            ampm_names: Some(self.ampm_names),
            show_24_hours: Some(self.show_24_hours),
            ..OptionsPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntryOptions;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Locale::preset("de"), Some(Locale::german()));
        assert_eq!(Locale::preset("de-AT"), Some(Locale::german()));
        assert_eq!(Locale::preset("EN_us"), Some(Locale::english()));
        assert_eq!(Locale::preset("xx"), None);
    }

    #[test]
    fn test_german_patch_switches_to_24_hours() {
        let options = EntryOptions::default().merged(Locale::german().into_patch());
        assert!(options.show_24_hours);
        assert_eq!(options.separator, ":");
    }

    #[test]
    fn test_patch_keeps_unrelated_options() {
        let options = EntryOptions {
            show_seconds: true,
            ..EntryOptions::default()
        }
        .merged(Locale::english().into_patch());
        assert!(options.show_seconds);
        assert!(!options.show_24_hours);
    }
}
