//! Application configuration from CLI flags, environment, and a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use clui_core::constants::{DEFAULT_CONTAINER_WIDTH, DEFAULT_INPUT_POLL};
use clui_core::indicator::IndicatorOptions;
use clui_engine::Mode;
use serde::Deserialize;
use tracing::debug;

/// Where keystrokes come from in the key-echo demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// Terminal events decoded by crossterm.
    Crossterm,
    /// Raw stdin bytes decoded as xterm sequences.
    Raw,
}

/// Errors in the command line or the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Args(#[from] clap::Error),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// clui-demo: progress widgets and prompts in CLI or TUI mode.
#[derive(Parser, Debug, Clone)]
#[command(name = "clui-demo", version, about)]
pub struct AppConfig {
    /// Execution mode: auto, cli, or tui.
    #[arg(long, default_value = "auto", env = "CLUI_MODE")]
    pub mode: Mode,

    /// Number of counting tasks.
    #[arg(long, default_value_t = 2)]
    pub tasks: usize,

    /// Steps per counting task.
    #[arg(long, default_value_t = 20)]
    pub steps: u64,

    /// Pause between steps (e.g. "50ms").
    #[arg(long, default_value = "50ms", value_parser = parse_duration)]
    pub delay: Duration,

    /// Widget width in characters.
    #[arg(long, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: usize,

    /// TUI redraw interval.
    #[arg(long, default_value = "100ms", value_parser = parse_duration)]
    pub tick: Duration,

    /// Stop the run after this long (e.g. "5s", "1m").
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Add a task that reshapes its indicator while running.
    #[arg(long)]
    pub reshape: bool,

    /// Add a task that asks for the user's name.
    #[arg(long)]
    pub ask: bool,

    /// Echo keystrokes instead of running tasks.
    #[arg(long)]
    pub keys: bool,

    /// Key that ends the key-echo demo (e.g. "q", "Ctrl-d", "Esc").
    #[arg(long, default_value = "q")]
    pub stop_key: String,

    /// Keyboard decoding used by the key-echo demo.
    #[arg(long, value_enum, default_value = "crossterm")]
    pub input: InputKind,

    /// Window in which raw bytes are decoded together (e.g. "100us").
    #[arg(long, default_value = "100us", value_parser = parse_duration)]
    pub settle: Duration,

    /// Leave the TUI as soon as every task has finished.
    #[arg(long)]
    pub exit_on_finish: bool,

    /// Only report failures.
    #[arg(short, long)]
    pub quiet: bool,

    /// Announce each task.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// JSON file with default settings.
    #[arg(long, env = "CLUI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Indicator parts, from the config file.
    #[arg(skip)]
    pub indicator: IndicatorOptions,
}

/// Settings a config file may provide.
///
/// Every field is optional; the command line and environment win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<String>,
    pub tasks: Option<usize>,
    pub steps: Option<u64>,
    pub delay: Option<String>,
    pub width: Option<usize>,
    pub tick: Option<String>,
    pub timeout: Option<String>,
    pub reshape: Option<bool>,
    pub ask: Option<bool>,
    pub stop_key: Option<String>,
    pub settle: Option<String>,
    pub exit_on_finish: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub indicator: Option<IndicatorOptions>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AppConfig {
    /// Parse the process arguments, exiting on `--help` and `--version`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::args_os())
    }

    /// Parse `args` (program name first) and merge the config file.
    pub fn load_from<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = match Self::command().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(err) if !err.use_stderr() => err.exit(),
            Err(err) => return Err(err.into()),
        };
        let mut config = Self::from_arg_matches(&matches)?;
        if let Some(path) = config.config.clone() {
            let file = FileConfig::load(&path)?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(&file, &matches)?;
        }
        Ok(config)
    }

    /// Take values from `file` for every argument not given explicitly.
    pub fn merge(&mut self, file: &FileConfig, matches: &ArgMatches) -> Result<(), ConfigError> {
        let unset = |id: &str| {
            !matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };
        let duration = |field: &'static str, value: &str| {
            parse_duration(value).map_err(|message| ConfigError::Invalid { field, message })
        };

        if let (Some(mode), true) = (&file.mode, unset("mode")) {
            self.mode = mode.parse().map_err(|err: clui_core::UiError| ConfigError::Invalid {
                field: "mode",
                message: err.to_string(),
            })?;
        }
        if let (Some(v), true) = (file.tasks, unset("tasks")) {
            self.tasks = v;
        }
        if let (Some(v), true) = (file.steps, unset("steps")) {
            self.steps = v;
        }
        if let (Some(v), true) = (&file.delay, unset("delay")) {
            self.delay = duration("delay", v)?;
        }
        if let (Some(v), true) = (file.width, unset("width")) {
            self.width = v;
        }
        if let (Some(v), true) = (&file.tick, unset("tick")) {
            self.tick = duration("tick", v)?;
        }
        if let (Some(v), true) = (&file.timeout, unset("timeout")) {
            self.timeout = Some(duration("timeout", v)?);
        }
        if let (Some(v), true) = (&file.settle, unset("settle")) {
            self.settle = duration("settle", v)?;
        }
        if let (Some(v), true) = (&file.stop_key, unset("stop_key")) {
            self.stop_key.clone_from(v);
        }
        for (flag, value, id) in [
            (&mut self.reshape, file.reshape, "reshape"),
            (&mut self.ask, file.ask, "ask"),
            (&mut self.exit_on_finish, file.exit_on_finish, "exit_on_finish"),
            (&mut self.quiet, file.quiet, "quiet"),
            (&mut self.verbose, file.verbose, "verbose"),
        ] {
            if let (Some(v), true) = (value, unset(id)) {
                *flag = v;
            }
        }
        if let Some(indicator) = file.indicator {
            self.indicator = indicator;
        }
        Ok(())
    }

    /// How often the input listener polls.
    #[must_use]
    pub fn input_poll(&self) -> Duration {
        DEFAULT_INPUT_POLL
    }
}

/// Parse a duration like "100us", "20ms", "5s", "1m" or "1h".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let number = |digits: &str| {
        digits
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("invalid duration '{s}'"))
    };
    if let Some(us) = s.strip_suffix("us").or_else(|| s.strip_suffix("µs")) {
        Ok(Duration::from_micros(number(us)?))
    } else if let Some(ms) = s.strip_suffix("ms") {
        Ok(Duration::from_millis(number(ms)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        Ok(Duration::from_secs(number(secs)?))
    } else if let Some(mins) = s.strip_suffix('m') {
        scaled(number(mins)?, 60, s)
    } else if let Some(hours) = s.strip_suffix('h') {
        scaled(number(hours)?, 3600, s)
    } else {
        Ok(Duration::from_secs(number(s)?))
    }
}

fn scaled(count: u64, unit_secs: u64, s: &str) -> Result<Duration, String> {
    count
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{s}' is too large"))
}
