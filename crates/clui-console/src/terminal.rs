//! Raw terminal mode scoped to a guard.

use std::io;

use crossterm::terminal;
use tracing::warn;

/// Keeps the terminal in raw mode until dropped.
///
/// In raw mode every keystroke reaches the process unbuffered and
/// unechoed, and `\n` no longer returns the carriage: write `\r\n`.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(error = %err, "Failed to restore terminal mode");
        }
    }
}
