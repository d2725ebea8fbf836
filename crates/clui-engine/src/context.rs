//! What a running task can reach: widgets, cancellation, input, console.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clui_console::{InputBuffer, InputEvent, Key};
use clui_core::constants::DEFAULT_CONTAINER_WIDTH;
use clui_core::error::UiError;
use clui_core::progress::{CancellationToken, TimeoutCancellationToken};
use clui_core::store::WidgetStore;

use crate::interfaces::{Console, NullConsole};

/// Granularity of cancellable sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Shared environment handed to every task of one run.
#[derive(Clone)]
pub struct ExecutionEnv {
    pub store: WidgetStore,
    pub cancel: TimeoutCancellationToken,
    pub console: Arc<dyn Console>,
    /// Keyboard input, when a listener is running.
    pub input: Option<InputBuffer<InputEvent>>,
    /// Width tasks should give their widgets.
    pub widget_width: usize,
}

impl ExecutionEnv {
    /// Environment without a user, deadline, or input.
    #[must_use]
    pub fn headless(store: WidgetStore) -> Self {
        Self {
            store,
            cancel: TimeoutCancellationToken::with_token(CancellationToken::new(), None),
            console: Arc::new(NullConsole),
            input: None,
            widget_width: DEFAULT_CONTAINER_WIDTH,
        }
    }
}

/// Per-task view of the [`ExecutionEnv`].
pub struct TaskContext {
    index: usize,
    env: ExecutionEnv,
}

impl TaskContext {
    #[must_use]
    pub fn new(index: usize, env: ExecutionEnv) -> Self {
        Self { index, env }
    }

    /// Position of the task in the run.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn store(&self) -> &WidgetStore {
        &self.env.store
    }

    #[must_use]
    pub fn widget_width(&self) -> usize {
        self.env.widget_width
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.env.cancel.is_cancelled()
    }

    /// Checkpoint: `Cancelled` or `Timeout` once the run should stop.
    pub fn check_cancelled(&self) -> Result<(), UiError> {
        self.env.cancel.check_cancelled()
    }

    /// Sleep for `duration`, waking early on cancellation.
    pub fn sleep(&self, duration: Duration) -> Result<(), UiError> {
        let deadline = Instant::now() + duration;
        loop {
            self.check_cancelled()?;
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            thread::sleep(left.min(SLEEP_SLICE));
        }
    }

    /// Show a message alongside the widgets.
    pub fn message(&self, text: &str) {
        self.env.console.message(text);
    }

    /// Ask the user a question.
    pub fn prompt(&self, question: &str) -> Result<String, UiError> {
        self.check_cancelled()?;
        self.env.console.prompt(question)
    }

    /// Next pending keystroke, without blocking.
    pub fn poll_input(&self) -> Option<Key> {
        let input = self.env.input.as_ref()?;
        while let Some(event) = input.get() {
            if let InputEvent::Key(key) = event {
                return Some(key);
            }
        }
        None
    }
}
