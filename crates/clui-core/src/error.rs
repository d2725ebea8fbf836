//! Error type shared by every clui crate.

use crate::widget::WidgetId;

/// Errors raised by views, the widget store, and task execution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UiError {
    /// A width below the minimum the view can render in.
    #[error("width {width} is below the minimum of {min} characters")]
    WidthTooSmall { width: usize, min: usize },

    /// `set_width` called on a fixed-width view.
    #[error("view has a fixed width of {0} characters")]
    FixedWidth(usize),

    /// A bar value outside `[0.0, 1.0]`.
    #[error("ratio {0} is outside [0, 1]")]
    RatioOutOfRange(f64),

    /// A counter value above its range.
    #[error("value {value} is outside the range [0, {range}]")]
    CounterOutOfRange { value: u64, range: u64 },

    /// A counter range of zero.
    #[error("range must be greater than zero")]
    ZeroRange,

    /// A view does not fit in the free space of a container.
    #[error("cannot fit new widget - required {required}, available {available}")]
    DoesNotFit { required: usize, available: usize },

    /// Alignment string other than l, c, r.
    #[error("unknown alignment '{0}' (expected l, c or r)")]
    InvalidAlignment(String),

    /// Mode string other than auto, cli, tui.
    #[error("unknown mode '{0}' (expected auto, cli or tui)")]
    InvalidMode(String),

    /// Handle to a widget that is no longer in the store.
    #[error("widget {0} is not registered")]
    UnknownWidget(WidgetId),

    /// Execution was cancelled.
    #[error("cancelled")]
    Cancelled,

    /// Execution passed its deadline.
    #[error("timed out after {0}")]
    Timeout(String),

    /// The input stream closed while waiting for an answer.
    #[error("input closed")]
    InputClosed,

    /// A task failed.
    #[error("task failed: {0}")]
    Task(String),

    /// Terminal I/O failure.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
