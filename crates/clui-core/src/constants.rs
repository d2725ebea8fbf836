//! Layout defaults, timing defaults, and exit codes.

use std::time::Duration;

/// Minimum width of a bar view: two borders plus three cells.
pub const MIN_BAR_WIDTH: usize = 5;

/// Default width of containers and progress indicators.
pub const DEFAULT_CONTAINER_WIDTH: usize = 80;

/// Width of the percent label of a progress indicator (`"100%"` plus padding).
pub const PERCENT_LABEL_WIDTH: usize = 5;

/// Default redraw tick of the TUI render loop.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Default poll timeout of the input listener.
pub const DEFAULT_INPUT_POLL: Duration = Duration::from_millis(50);

/// Window in which raw bytes are gathered into one keystroke burst.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_micros(100);

/// Maximum number of log lines kept by the TUI.
pub const MAX_LOG_LINES: usize = 500;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Execution timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Execution cancelled by the user (Ctrl+C or quit key).
    pub const ERROR_CANCELED: i32 = 130;
}
