//! TimeEntry - the keystroke state machine bound to one control.

use std::cell::OnceCell;
use std::fmt;

use crate::config::{EntryOptions, OptionsPatch, SetTimeRequest};
use crate::keys::{KeyCode, Keystroke};
use crate::tracing::EntrySnapshot;

use super::clock::{Clock, SystemClock};
use super::control::Control;
use super::deferred::{DeferredQueue, DeferredTask};
use super::expr::{Resolver, TimeSetting};
use super::format::{format_time, parse_time_text};
use super::layout::{FieldKind, FieldLayout};
use super::messages::{EntryMsg, Outcome};
use super::selection;
use super::time::{
    clamp_duration, clamp_wall_clock, normalize, quantize, Bounds, TimeMode, TimeValue,
};

/// Transient editing state, reset on blur and destroy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Index of the focused sub-field
    pub field: usize,
    /// Digits typed into the focused field so far
    pub pending: String,
    /// Set by focus, consumed by the click that delivered it
    pub focus_click: bool,
    /// The control is the one currently tracked as focused
    pub tracking: bool,
    /// Time shown in the control
    pub value: TimeValue,
}

/// Time entry engine for a single control.
///
/// Events go through [`TimeEntry::update`]; work the host must run one event
/// loop turn later goes through [`TimeEntry::run_deferred`].
pub struct TimeEntry {
    options: EntryOptions,
    state: EditorState,
    layout: OnceCell<FieldLayout>,
    clock: Box<dyn Clock>,
    deferred: DeferredQueue,
    bound: bool,
}

impl fmt::Debug for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeEntry")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("bound", &self.bound)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

impl TimeEntry {
    /// Bind an engine to a control using the system clock
    pub fn bind<C: Control>(control: &mut C, options: EntryOptions) -> Self {
        Self::bind_with_clock(control, options, SystemClock)
    }

    /// Bind an engine with an explicit time source.
    ///
    /// An empty control is filled with `defaultTime` right away when one is set.
    pub fn bind_with_clock<C: Control>(
        control: &mut C,
        options: EntryOptions,
        clock: impl Clock + 'static,
    ) -> Self {
        let mut entry = Self {
            options,
            state: EditorState::default(),
            layout: OnceCell::new(),
            clock: Box::new(clock),
            deferred: DeferredQueue::new(),
            bound: true,
        };
        if control.text().is_empty() && entry.options.default_time.is_some() {
            entry.commit(control, None);
        }
        entry
    }

    pub fn options(&self) -> &EntryOptions {
        &self.options
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn focused_field(&self) -> usize {
        self.state.field
    }

    /// Kind of the focused sub-field
    pub fn focused_kind(&self) -> Option<FieldKind> {
        let layout = self.layout();
        layout.kind_at(layout.clamp_index(self.state.field))
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Text the host shows next to the control
    pub fn append_text(&self) -> &str {
        &self.options.append_text
    }

    /// Sub-field layout, derived on first use after an options change
    pub fn layout(&self) -> &FieldLayout {
        self.layout
            .get_or_init(|| FieldLayout::from_options(&self.options))
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Merge partial options into the current configuration
    pub fn set_options(&mut self, patch: OptionsPatch) {
        if !self.bound {
            return;
        }
        self.apply_patch(patch);
    }

    /// Show a new time, or clear the control for `None` / empty text
    pub fn set_time<C: Control>(&mut self, control: &mut C, setting: Option<TimeSetting>) {
        if !self.bound {
            return;
        }
        match setting {
            Some(setting) if !setting.is_blank() => self.commit(control, Some(setting)),
            _ => self.set_value(control, ""),
        }
    }

    /// Time currently shown, or `None` if the text does not parse
    pub fn get_time<C: Control>(&self, control: &C) -> Option<TimeValue> {
        parse_time_text(control.text(), &self.options).map(|v| normalize(v, self.options.mode()))
    }

    /// Shown time as milliseconds since midnight (or zero), 0 if none
    pub fn get_offset<C: Control>(&self, control: &C) -> i64 {
        self.get_time(control).map_or(0, TimeValue::offset_millis)
    }

    /// Detach from the control and reset configuration to defaults
    pub fn destroy(&mut self) {
        self.bound = false;
        self.deferred.invalidate();
        self.options = EntryOptions::default();
        self.layout = OnceCell::new();
        self.state = EditorState::default();
        tracing::debug!("Time entry destroyed");
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Handle one input event
    pub fn update<C: Control>(&mut self, control: &mut C, msg: EntryMsg) -> Outcome {
        if !self.bound {
            return Outcome::PassThrough;
        }

        let before = tracing::enabled!(tracing::Level::TRACE)
            .then(|| EntrySnapshot::capture(self, &*control));

        let outcome = match msg {
            EntryMsg::Focus => self.on_focus(control),
            EntryMsg::Blur => self.on_blur(),
            EntryMsg::Click { caret } => self.on_click(control, caret),
            EntryMsg::Key(stroke) => self.on_key(control, stroke),
            EntryMsg::Char(c) => self.on_char(control, c),
            EntryMsg::Wheel { delta } => self.on_wheel(control, delta),
            EntryMsg::Paste => {
                self.deferred.schedule(DeferredTask::ParsePasted);
                Outcome::PassThrough
            }
        };

        if let Some(before) = before {
            let after = EntrySnapshot::capture(self, &*control);
            if let Some(diff) = before.diff(&after) {
                tracing::trace!("{:?} -> {:?}: {}", msg, outcome, diff);
            }
        }
        outcome
    }

    /// Run tasks deferred to this turn. Returns how many ran.
    pub fn run_deferred<C: Control>(&mut self, control: &mut C) -> usize {
        let tasks = self.deferred.take_due();
        if !self.bound {
            return 0;
        }
        for task in &tasks {
            match task {
                DeferredTask::LocateCaret => {
                    let caret = control.caret();
                    self.state.field = self.locate(control.text(), caret);
                    self.refresh_text(control);
                }
                DeferredTask::ShowField => self.show_field(control),
                DeferredTask::ParsePasted => self.parse_current(control),
            }
        }
        tasks.len()
    }

    fn on_focus<C: Control>(&mut self, control: &mut C) -> Outcome {
        if self.state.tracking || control.is_disabled() {
            self.state.focus_click = false;
            return Outcome::Ignored;
        }

        self.state.focus_click = true;
        self.state.tracking = true;
        if let Some(hook) = self.options.before_show.clone() {
            self.apply_patch(hook.call());
        }
        self.parse_current(control);
        // Some inputs reset the selection right after focus, so apply it later
        self.deferred.schedule(DeferredTask::ShowField);
        Outcome::Handled
    }

    fn on_blur(&mut self) -> Outcome {
        self.state.tracking = false;
        self.state.focus_click = false;
        self.state.pending.clear();
        Outcome::Handled
    }

    fn on_click<C: Control>(&mut self, control: &mut C, caret: usize) -> Outcome {
        let previous = self.state.field;
        if !self.state.focus_click {
            self.state.field = self.locate(control.text(), caret);
        }
        if previous != self.state.field {
            self.state.pending.clear();
        }
        self.show_field(control);
        self.state.focus_click = false;
        Outcome::Handled
    }

    fn on_key<C: Control>(&mut self, control: &mut C, stroke: Keystroke) -> Outcome {
        let mods = stroke.mods;
        match stroke.key {
            KeyCode::Char(c) if mods.is_command() => {
                tracing::debug!("Passing through shortcut {}", Keystroke::new(KeyCode::Char(c), mods));
                Outcome::PassThrough
            }
            KeyCode::Char(c) => self.on_char(control, c),
            KeyCode::Tab => {
                if self.options.tab_to_exit {
                    return Outcome::Exit;
                }
                let offset = if mods.shift() { -1 } else { 1 };
                if self.change_field(control, offset, true) {
                    Outcome::Exit
                } else {
                    Outcome::Handled
                }
            }
            KeyCode::End => {
                if mods.ctrl() {
                    self.set_value(control, "");
                } else {
                    self.state.field = self.layout().last_index();
                    self.adjust_field(control, 0);
                }
                Outcome::Handled
            }
            KeyCode::Home => {
                if mods.ctrl() {
                    self.commit(control, None);
                } else {
                    self.state.field = 0;
                    self.adjust_field(control, 0);
                }
                Outcome::Handled
            }
            KeyCode::Left => {
                self.change_field(control, -1, false);
                Outcome::Handled
            }
            KeyCode::Right => {
                self.change_field(control, 1, false);
                Outcome::Handled
            }
            KeyCode::Up => {
                self.adjust_field(control, 1);
                Outcome::Handled
            }
            KeyCode::Down => {
                self.adjust_field(control, -1);
                Outcome::Handled
            }
            KeyCode::Delete => {
                self.set_value(control, "");
                Outcome::Handled
            }
            KeyCode::Backspace => {
                self.state.pending.clear();
                Outcome::Handled
            }
            KeyCode::Enter | KeyCode::Escape => Outcome::PassThrough,
        }
    }

    fn on_char<C: Control>(&mut self, control: &mut C, c: char) -> Outcome {
        if c < ' ' {
            return Outcome::PassThrough;
        }

        if self.options.separator.chars().eq(std::iter::once(c)) {
            self.change_field(control, 1, false);
            Outcome::Handled
        } else if let Some(digit) = c.to_digit(10) {
            self.enter_digit(control, c, i64::from(digit));
            Outcome::Handled
        } else if !self.options.uses_24_hour_display() {
            self.toggle_meridiem(control, c)
        } else {
            Outcome::Ignored
        }
    }

    fn on_wheel<C: Control>(&mut self, control: &mut C, delta: f64) -> Outcome {
        if !self.options.use_mouse_wheel {
            return Outcome::PassThrough;
        }
        if control.is_disabled() {
            return Outcome::Ignored;
        }

        control.focus();
        self.on_focus(control);
        if control.text().is_empty() {
            self.parse_current(control);
            self.show_time(control);
        }

        let offset = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            0
        };
        self.adjust_field(control, offset);
        Outcome::Handled
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Combine the typed digit with the pending one for the focused field
    fn enter_digit<C: Control>(&mut self, control: &mut C, c: char, key: i64) {
        let kind = self.focused_kind();
        let mut digits = self.state.pending.clone();
        digits.push(c);
        let value = match digits.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                tracing::debug!("Typed digits {:?} overflow, restarting at {}", digits, c);
                digits = c.to_string();
                key
            }
        };
        let current = self.state.value;
        let options = &self.options;

        let hour = if kind != Some(FieldKind::Hour) {
            current.hour
        } else if options.unlimited_hours {
            value
        } else if options.show_24_hours {
            if value < 24 {
                value
            } else {
                key
            }
        } else {
            let hour12 = if (1..=12).contains(&value) {
                value
            } else if key > 0 {
                key
            } else {
                current.hour
            };
            hour12 % 12 + if current.is_pm() { 12 } else { 0 }
        };
        let minute_or_second = |own: bool, existing: i64| {
            if !own {
                existing
            } else if value < 60 {
                value
            } else {
                key
            }
        };
        let minute = minute_or_second(kind == Some(FieldKind::Minute), current.minute);
        let second = minute_or_second(kind == Some(FieldKind::Second), current.second);

        let fields = quantize(TimeValue::new(hour, minute, second), &options.time_steps);
        let setting = match options.mode() {
            TimeMode::Duration => TimeSetting::DurationTriple(fields),
            TimeMode::WallClock => TimeSetting::ExplicitTime(fields),
        };
        let keep_all_digits = options.unlimited_hours && kind == Some(FieldKind::Hour);
        let pair_complete = !self.state.pending.is_empty();
        let auto_advance = options.no_separator_entry && pair_complete;

        self.commit(control, Some(setting));
        if auto_advance {
            self.change_field(control, 1, false);
        } else if keep_all_digits {
            self.state.pending = digits;
        } else if pair_complete {
            self.state.pending.clear();
        } else {
            self.state.pending = c.to_string();
        }
    }

    /// Flip AM/PM when the typed letter names the other meridiem
    fn toggle_meridiem<C: Control>(&mut self, control: &mut C, c: char) -> Outcome {
        let Some(meridiem) = self.layout().meridiem_index() else {
            return Outcome::Ignored;
        };
        let typed: String = c.to_lowercase().collect();
        let initial = |name: &str| -> Option<String> {
            name.chars().next().map(|ch| ch.to_lowercase().collect())
        };
        let am = initial(self.options.ampm_names[0].as_str());
        let pm = initial(self.options.ampm_names[1].as_str());
        let is_pm = self.state.value.is_pm();

        let flip = (am.as_deref() == Some(typed.as_str()) && is_pm)
            || (pm.as_deref() == Some(typed.as_str()) && !is_pm);
        if !flip {
            return Outcome::Ignored;
        }

        let saved = self.state.field;
        self.state.field = meridiem;
        self.adjust_field(control, 1);
        self.state.field = saved;
        self.show_field(control);
        Outcome::Handled
    }

    /// Move the focused field by one. Returns true when focus should leave
    /// the control.
    fn change_field<C: Control>(&mut self, control: &mut C, offset: i32, allow_exit: bool) -> bool {
        let last = self.layout().last_index();
        self.state.field = self.state.field.min(last);
        let edge = if offset < 0 { 0 } else { last };
        let at_edge = control.text().is_empty() || self.state.field == edge;
        if !at_edge {
            self.state.field = if offset < 0 {
                self.state.field - 1
            } else {
                self.state.field + 1
            };
            tracing::debug!("Focused field {}", self.state.field);
        }
        self.show_field(control);
        self.state.pending.clear();
        at_edge && allow_exit
    }

    /// Step the focused field by `offset` steps (12 hours on the meridiem)
    fn adjust_field<C: Control>(&mut self, control: &mut C, offset: i64) {
        let offset = if control.text().is_empty() { 0 } else { offset };
        let kind = self.focused_kind();
        let steps = self.options.time_steps;
        let step_for = |target: FieldKind, step: i64| {
            if kind == Some(target) {
                offset.saturating_mul(step)
            } else {
                0
            }
        };

        let v = self.state.value;
        let adjusted = TimeValue::new(
            v.hour
                .saturating_add(step_for(FieldKind::Hour, steps.hour()))
                .saturating_add(step_for(FieldKind::Meridiem, 12)),
            v.minute.saturating_add(step_for(FieldKind::Minute, steps.minute())),
            v.second.saturating_add(step_for(FieldKind::Second, steps.second())),
        );
        let setting = match self.options.mode() {
            TimeMode::Duration => TimeSetting::DurationTriple(adjusted),
            TimeMode::WallClock => TimeSetting::ExplicitTime(adjusted),
        };
        self.commit(control, Some(setting));
    }

    // =========================================================================
    // Model pipeline
    // =========================================================================

    /// Quantize, normalize, clamp, run `beforeSetTime`, then render.
    /// `None` uses the default time (or now).
    fn commit<C: Control>(&mut self, control: &mut C, setting: Option<TimeSetting>) {
        let mode = self.options.mode();
        let resolver = Resolver::new(&self.options, self.clock.as_ref());
        let fields = match (mode, &setting) {
            (TimeMode::Duration, Some(TimeSetting::DurationTriple(raw))) => Some(*raw),
            _ => resolver.resolve(setting.as_ref()),
        };
        let fields = self.constrain(fields);

        let (value, bounds) = match mode {
            TimeMode::WallClock => {
                let bounds = Bounds::new(
                    resolver.resolve(self.options.min_time.as_ref()),
                    resolver.resolve(self.options.max_time.as_ref()),
                );
                let value = clamp_wall_clock(fields.wrap_day(), &bounds, self.options.bound_inversion);
                (value, bounds)
            }
            TimeMode::Duration => {
                // Only field triples bound a duration; the floor defaults to zero
                let min = match &self.options.min_time {
                    Some(TimeSetting::DurationTriple(min)) => min.carry(),
                    _ => TimeValue::midnight(),
                };
                let max = match &self.options.max_time {
                    Some(TimeSetting::DurationTriple(max)) => Some(max.carry()),
                    _ => None,
                };
                (clamp_duration(fields.carry(), min, max), Bounds::new(Some(min), max))
            }
        };

        let value = match &self.options.before_set_time {
            Some(hook) => {
                let request = SetTimeRequest {
                    previous: self.get_time(&*control),
                    candidate: value,
                    min: bounds.min,
                    max: bounds.max,
                };
                normalize(hook.call(&request), mode)
            }
            None => value,
        };

        self.state.value = value;
        self.show_time(control);
    }

    /// Apply time steps, filling in the default time (or now) when absent
    fn constrain(&self, fields: Option<TimeValue>) -> TimeValue {
        let fields = fields.unwrap_or_else(|| {
            Resolver::new(&self.options, self.clock.as_ref())
                .resolve(self.options.default_time.as_ref())
                .unwrap_or_else(|| self.clock.now())
        });
        quantize(fields, &self.options.time_steps)
    }

    /// Load the editing value from the control's text, or seed it from the
    /// default time when the text does not parse
    fn parse_current<C: Control>(&mut self, control: &mut C) {
        let mode = self.options.mode();
        self.state.value = match parse_time_text(control.text(), &self.options) {
            Some(value) => normalize(value, mode),
            None => {
                let seed = self.constrain(None);
                let second = if self.options.show_seconds { seed.second } else { 0 };
                TimeValue::new(seed.hour, seed.minute, second)
            }
        };
        self.layout = OnceCell::new();
        self.state.pending.clear();

        match self.options.initial_field {
            Some(field) => {
                self.state.field = self.layout().clamp_index(field);
                self.refresh_text(control);
            }
            None => self.deferred.schedule(DeferredTask::LocateCaret),
        }
    }

    /// Re-render a non-empty control from the editing value
    fn refresh_text<C: Control>(&mut self, control: &mut C) {
        if !control.text().is_empty() {
            self.show_time(control);
        }
    }

    fn show_time<C: Control>(&mut self, control: &mut C) {
        let text = format_time(self.state.value, &self.options);
        self.set_value(control, &text);
        self.show_field(control);
    }

    /// Select the focused field while the control is tracked as focused
    fn show_field<C: Control>(&self, control: &mut C) {
        if control.is_hidden() || !self.state.tracking {
            return;
        }
        let range = selection::range_for(
            self.layout(),
            control.text(),
            &self.options.separator,
            self.state.field,
        );
        control.set_selection(range);
        if !control.is_disabled() {
            control.focus();
        }
    }

    /// Write text and notify, only when it actually changes
    fn set_value<C: Control>(&self, control: &mut C, text: &str) {
        if control.text() != text {
            tracing::debug!("Time entry text {:?} -> {:?}", control.text(), text);
            control.set_text(text);
            control.notify_changed();
        }
    }

    fn locate(&self, text: &str, caret: usize) -> usize {
        selection::locate(self.layout(), text, &self.options.separator, caret)
    }

    fn apply_patch(&mut self, patch: OptionsPatch) {
        self.options.apply(patch);
        self.layout = OnceCell::new();
    }
}
