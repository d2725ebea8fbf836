//! TUI message types (Elm Messages).

use std::time::Duration;

use clui_console::InputEvent;
use clui_core::error::UiError;
use clui_core::widget::WidgetEvent;
use crossbeam_channel::Sender;

/// A question from a task, waiting for the user's answer.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub question: String,
    pub reply: Sender<Result<String, UiError>>,
}

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// A widget changed in the store.
    Widget(WidgetEvent),
    /// Keyboard or resize event from the listener thread.
    Input(InputEvent),
    TaskStarted { index: usize, name: String },
    TaskFinished {
        index: usize,
        name: String,
        duration: Duration,
        error: Option<String>,
    },
    Log(String),
    Prompt(PromptRequest),
    /// Every task has finished.
    Finished,
    /// Periodic redraw.
    Tick,
    Quit,
}

impl From<InputEvent> for TuiMessage {
    fn from(event: InputEvent) -> Self {
        Self::Input(event)
    }
}
