//! Time entry configuration
//!
//! Options can be built in code or loaded from YAML using the option names of
//! the original widget (`showSeconds`, `timeSteps`, `ampmNames`, ...).

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::entry::{BoundInversion, StepConfig, TimeMode, TimeSetting, TimeValue};

/// Arguments handed to the `beforeSetTime` hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTimeRequest {
    /// Value currently shown in the control, if any
    pub previous: Option<TimeValue>,
    /// Quantized and clamped value about to be committed
    pub candidate: TimeValue,
    pub min: Option<TimeValue>,
    pub max: Option<TimeValue>,
}

/// Hook that may adjust a candidate time before it is committed
#[derive(Clone)]
pub struct BeforeSetTime(Rc<dyn Fn(&SetTimeRequest) -> TimeValue>);

impl BeforeSetTime {
    pub fn new(f: impl Fn(&SetTimeRequest) -> TimeValue + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, request: &SetTimeRequest) -> TimeValue {
        (self.0)(request)
    }
}

impl fmt::Debug for BeforeSetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeSetTime(..)")
    }
}

/// Hook returning option overrides, applied each time the control gains focus
#[derive(Clone)]
pub struct BeforeShow(Rc<dyn Fn() -> OptionsPatch>);

impl BeforeShow {
    pub fn new(f: impl Fn() -> OptionsPatch + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) -> OptionsPatch {
        (self.0)()
    }
}

impl fmt::Debug for BeforeShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeShow(..)")
    }
}

/// Complete configuration of one time entry engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryOptions {
    /// Text the host displays after the control
    pub append_text: String,
    pub show_seconds: bool,
    /// Duration mode: the hour is unbounded
    pub unlimited_hours: bool,
    pub time_steps: StepConfig,
    /// Field focused on entry; `None` locates it from the caret
    pub initial_field: Option<usize>,
    /// Advance to the next field after two digits
    pub no_separator_entry: bool,
    /// Tab always leaves the control instead of moving between fields
    pub tab_to_exit: bool,
    pub use_mouse_wheel: bool,
    pub default_time: Option<TimeSetting>,
    pub min_time: Option<TimeSetting>,
    pub max_time: Option<TimeSetting>,
    #[serde(skip)]
    pub before_show: Option<BeforeShow>,
    #[serde(skip)]
    pub before_set_time: Option<BeforeSetTime>,
    pub show_24_hours: bool,
    pub separator: String,
    pub ampm_prefix: String,
    pub ampm_names: [String; 2],
    /// Policy for `minTime` after `maxTime`
    pub bound_inversion: BoundInversion,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            append_text: String::new(),
            show_seconds: false,
            unlimited_hours: false,
            time_steps: StepConfig::default(),
            initial_field: None,
            no_separator_entry: false,
            tab_to_exit: false,
            use_mouse_wheel: true,
            default_time: None,
            min_time: None,
            max_time: None,
            before_show: None,
            before_set_time: None,
            show_24_hours: false,
            separator: ":".to_string(),
            ampm_prefix: String::new(),
            ampm_names: ["AM".to_string(), "PM".to_string()],
            bound_inversion: BoundInversion::default(),
        }
    }
}

impl EntryOptions {
    /// 24-hour display is forced on in duration mode
    pub fn uses_24_hour_display(&self) -> bool {
        self.show_24_hours || self.unlimited_hours
    }

    pub fn mode(&self) -> TimeMode {
        TimeMode::from_unlimited_hours(self.unlimited_hours)
    }

    /// Shallow-merge a patch into these options
    pub fn apply(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            append_text,
            show_seconds,
            unlimited_hours,
            time_steps,
            initial_field,
            no_separator_entry,
            tab_to_exit,
            use_mouse_wheel,
            default_time,
            min_time,
            max_time,
            before_show,
            before_set_time,
            show_24_hours,
            separator,
            ampm_prefix,
            ampm_names,
            bound_inversion,
        } = patch;

        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut self.append_text, append_text);
        set(&mut self.show_seconds, show_seconds);
        set(&mut self.unlimited_hours, unlimited_hours);
        set(&mut self.time_steps, time_steps);
        set(&mut self.initial_field, initial_field);
        set(&mut self.no_separator_entry, no_separator_entry);
        set(&mut self.tab_to_exit, tab_to_exit);
        set(&mut self.use_mouse_wheel, use_mouse_wheel);
        set(&mut self.default_time, default_time);
        set(&mut self.min_time, min_time);
        set(&mut self.max_time, max_time);
        set(&mut self.before_show, before_show);
        set(&mut self.before_set_time, before_set_time);
        set(&mut self.show_24_hours, show_24_hours);
        set(&mut self.separator, separator);
        set(&mut self.ampm_prefix, ampm_prefix);
        set(&mut self.ampm_names, ampm_names);
        set(&mut self.bound_inversion, bound_inversion);
    }

    /// Builder form of [`EntryOptions::apply`]
    pub fn merged(mut self, patch: OptionsPatch) -> Self {
        self.apply(patch);
        self
    }

    /// Parse options from YAML; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load options from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let options = Self::from_yaml(&content)?;
        tracing::info!("Loaded time entry options from {}", path.display());
        Ok(options)
    }
}

/// Partial options for `setOptions` and the `beforeShow` hook.
///
/// Nullable settings are double options: `Some(None)` clears the setting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    pub append_text: Option<String>,
    pub show_seconds: Option<bool>,
    pub unlimited_hours: Option<bool>,
    pub time_steps: Option<StepConfig>,
    #[serde(deserialize_with = "double_option")]
    pub initial_field: Option<Option<usize>>,
    pub no_separator_entry: Option<bool>,
    pub tab_to_exit: Option<bool>,
    pub use_mouse_wheel: Option<bool>,
    #[serde(deserialize_with = "double_option")]
    pub default_time: Option<Option<TimeSetting>>,
    #[serde(deserialize_with = "double_option")]
    pub min_time: Option<Option<TimeSetting>>,
    #[serde(deserialize_with = "double_option")]
    pub max_time: Option<Option<TimeSetting>>,
    #[serde(skip)]
    pub before_show: Option<Option<BeforeShow>>,
    #[serde(skip)]
    pub before_set_time: Option<Option<BeforeSetTime>>,
    pub show_24_hours: Option<bool>,
    pub separator: Option<String>,
    pub ampm_prefix: Option<String>,
    pub ampm_names: Option<[String; 2]>,
    pub bound_inversion: Option<BoundInversion>,
}

/// Distinguishes an explicit `null` (clear) from an absent key (keep)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl OptionsPatch {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Errors that can occur when loading options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
