//! Command-line argument parsing for scripted time entry sessions
//!
//! Supports:
//! - Loading options from a YAML file and a locale preset
//! - Overriding individual options with flags
//! - Replaying a script of key, wheel, click and paste tokens
//! - Plain or JSON reports of the final control state

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::config::EntryOptions;
use crate::entry::{
    Control, EntryMsg, FixedClock, Outcome, StepConfig, TextInput, TimeEntry, TimeSetting,
    TimeValue,
};
use crate::keys::{parse_key_string, Keystroke};
use crate::locale::Locale;

/// Replay keystrokes against a time entry field
#[derive(Parser, Debug)]
#[command(name = "time-entry", version, about = "Replay keystrokes against a time entry field")]
pub struct CliArgs {
    /// Script tokens: `1`, `tab`, `shift+tab`, `ctrl+home`, `wheel+`,
    /// `wheel-`, `click:N`, `paste:TEXT`, `set:EXPR`, `focus`, `blur`
    #[arg(value_name = "TOKENS")]
    pub script: Vec<String>,

    /// YAML options file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Locale preset (`en`, `de`)
    #[arg(long, value_name = "CODE")]
    pub locale: Option<String>,

    /// Show the seconds field
    #[arg(long)]
    pub show_seconds: bool,

    /// Use the 24-hour clock
    #[arg(long = "24h")]
    pub show_24_hours: bool,

    /// Duration mode (unbounded hours)
    #[arg(long)]
    pub duration: bool,

    /// Step sizes as H,M,S
    #[arg(long, value_name = "H,M,S", value_parser = parse_steps)]
    pub steps: Option<StepConfig>,

    /// Default time (expression, offset or H,M,S)
    #[arg(long, value_name = "EXPR")]
    pub default_time: Option<String>,

    /// Earliest time (expression, offset or H,M,S)
    #[arg(long, value_name = "EXPR")]
    pub min: Option<String>,

    /// Latest time (expression, offset or H,M,S)
    #[arg(long, value_name = "EXPR")]
    pub max: Option<String>,

    /// Pin the clock to HH:MM[:SS] instead of local time
    #[arg(long, value_name = "HH:MM[:SS]")]
    pub now: Option<TimeValue>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write debug logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

fn parse_steps(s: &str) -> Result<StepConfig, String> {
    let fields = parse_triple(s).ok_or_else(|| format!("expected H,M,S but got {:?}", s))?;
    Ok(StepConfig::new(fields.hour, fields.minute, fields.second))
}

/// `H`, `H,M` or `H,M,S` as a field triple
fn parse_triple(s: &str) -> Option<TimeValue> {
    let fields = s
        .split(',')
        .map(|part| part.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    (1..=3)
        .contains(&fields.len())
        .then(|| TimeValue::from_fields(&fields))
}

/// Time setting from a command-line value
pub fn parse_setting(s: &str) -> TimeSetting {
    if s.contains(',') {
        if let Some(fields) = parse_triple(s) {
            return TimeSetting::DurationTriple(fields);
        }
    }
    TimeSetting::expression(s)
}

impl CliArgs {
    /// Build options: file first, then locale, then individual flags
    pub fn options(&self) -> Result<EntryOptions> {
        let mut options = match &self.config {
            Some(path) => EntryOptions::load(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => EntryOptions::default(),
        };

        if let Some(code) = &self.locale {
            let locale = Locale::preset(code)
                .with_context(|| format!("Unknown locale {:?}", code))?;
            options.apply(locale.into_patch());
        }

        options.show_seconds |= self.show_seconds;
        options.show_24_hours |= self.show_24_hours;
        options.unlimited_hours |= self.duration;
        if let Some(steps) = self.steps {
            options.time_steps = steps;
        }
        if let Some(text) = &self.default_time {
            options.default_time = Some(parse_setting(text));
        }
        if let Some(text) = &self.min {
            options.min_time = Some(parse_setting(text));
        }
        if let Some(text) = &self.max {
            options.max_time = Some(parse_setting(text));
        }
        Ok(options)
    }

    pub fn tokens(&self) -> Result<Vec<ScriptToken>> {
        self.script
            .iter()
            .map(|token| token.parse::<ScriptToken>())
            .collect()
    }
}

/// One step of a scripted session
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptToken {
    Focus,
    Blur,
    Char(char),
    Key(Keystroke),
    Wheel(f64),
    Click(usize),
    Paste(String),
    Set(String),
}

impl FromStr for ScriptToken {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(caret) = s.strip_prefix("click:") {
            let caret = caret
                .parse::<usize>()
                .with_context(|| format!("Invalid caret offset in {:?}", s))?;
            return Ok(ScriptToken::Click(caret));
        }
        if let Some(text) = s.strip_prefix("paste:") {
            return Ok(ScriptToken::Paste(text.to_string()));
        }
        if let Some(expr) = s.strip_prefix("set:") {
            return Ok(ScriptToken::Set(expr.to_string()));
        }

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(ScriptToken::Char(c));
        }

        match s {
            "focus" => Ok(ScriptToken::Focus),
            "blur" => Ok(ScriptToken::Blur),
            "wheel+" => Ok(ScriptToken::Wheel(1.0)),
            "wheel-" => Ok(ScriptToken::Wheel(-1.0)),
            _ => parse_key_string(s)
                .map(ScriptToken::Key)
                .with_context(|| format!("Invalid script token {:?}", s)),
        }
    }
}

/// Final state of a scripted session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub text: String,
    pub selection: [usize; 2],
    pub selected: String,
    pub field: usize,
    pub time: Option<TimeValue>,
    pub offset: i64,
    /// Tokens whose host default action was suppressed
    pub handled: usize,
    pub exited: bool,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "text:      {:?}", self.text)?;
        writeln!(
            f,
            "selection: {}..{} {:?}",
            self.selection[0], self.selection[1], self.selected
        )?;
        writeln!(f, "field:     {}", self.field)?;
        match self.time {
            Some(time) => writeln!(f, "time:      {}", time)?,
            None => writeln!(f, "time:      -")?,
        }
        writeln!(f, "offset:    {}ms", self.offset)?;
        write!(f, "handled:   {}", self.handled)?;
        if self.exited {
            write!(f, "\nexited")?;
        }
        Ok(())
    }
}

/// Run a script against an empty in-memory control.
///
/// The control is focused first and deferred tasks are flushed after every
/// token, as a host event loop would between events.
pub fn run_script(options: EntryOptions, now: Option<TimeValue>, tokens: &[ScriptToken]) -> Report {
    let mut input = TextInput::new();
    let mut entry = match now {
        Some(now) => TimeEntry::bind_with_clock(&mut input, options, FixedClock(now)),
        None => TimeEntry::bind(&mut input, options),
    };

    let mut exited = false;
    let mut handled = 0;
    entry.update(&mut input, EntryMsg::Focus);
    entry.run_deferred(&mut input);

    for token in tokens {
        let outcome = match token {
            ScriptToken::Focus => entry.update(&mut input, EntryMsg::Focus),
            ScriptToken::Blur => entry.update(&mut input, EntryMsg::Blur),
            ScriptToken::Char(c) => entry.update(&mut input, EntryMsg::Char(*c)),
            ScriptToken::Key(stroke) => entry.update(&mut input, EntryMsg::Key(*stroke)),
            ScriptToken::Wheel(delta) => entry.update(&mut input, EntryMsg::Wheel { delta: *delta }),
            ScriptToken::Click(caret) => {
                input.set_caret(*caret);
                entry.update(&mut input, EntryMsg::Click { caret: *caret })
            }
            ScriptToken::Paste(text) => {
                input.paste(text);
                entry.update(&mut input, EntryMsg::Paste)
            }
            ScriptToken::Set(expr) => {
                entry.set_time(&mut input, Some(parse_setting(expr)));
                Outcome::Handled
            }
        };
        if outcome.prevents_default() {
            handled += 1;
        }
        if outcome == Outcome::Exit {
            tracing::debug!("Script token {:?} left the control", token);
            exited = true;
            entry.update(&mut input, EntryMsg::Blur);
        }
        entry.run_deferred(&mut input);
    }

    let selection = input.selection();
    Report {
        text: input.as_str().to_string(),
        selection: [selection.start, selection.end],
        selected: input.selected_text(),
        field: entry.focused_field(),
        time: entry.get_time(&input),
        offset: entry.get_offset(&input),
        handled,
        exited,
    }
}
