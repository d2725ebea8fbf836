//! Execution modes.

use std::fmt;
use std::str::FromStr;

use clui_core::error::UiError;

/// How the engine runs tasks and draws widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// TUI on an interactive terminal, CLI otherwise.
    #[default]
    Auto,
    /// Blocking: tasks run on the main thread and draw line by line.
    Cli,
    /// Threaded: tasks on a worker thread, input on a listener thread,
    /// full-screen rendering on the main thread.
    Tui,
}

impl Mode {
    /// Settle `Auto` given whether stdout is a terminal.
    #[must_use]
    pub fn resolve(self, stdout_is_terminal: bool) -> Self {
        match self {
            Self::Auto if stdout_is_terminal => Self::Tui,
            Self::Auto => Self::Cli,
            other => other,
        }
    }

    /// Whether tasks block the thread that renders.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::Tui)
    }
}

impl FromStr for Mode {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cli" => Ok(Self::Cli),
            "tui" => Ok(Self::Tui),
            _ => Err(UiError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Cli => "cli",
            Self::Tui => "tui",
        })
    }
}
