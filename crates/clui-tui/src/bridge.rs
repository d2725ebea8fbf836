//! Bridges from the task thread into the TUI message channel.

use std::time::Duration;

use clui_core::error::UiError;
use clui_core::observer::WidgetObserver;
use clui_core::progress::TimeoutCancellationToken;
use clui_core::widget::WidgetEvent;
use clui_engine::interfaces::{Console, ResultPresenter, TaskResult};
use crossbeam_channel::{RecvTimeoutError, Sender};
use tracing::debug;

use crate::messages::{PromptRequest, TuiMessage};

/// How often a waiting prompt checks for cancellation.
const PROMPT_POLL: Duration = Duration::from_millis(50);

/// Store observer that forwards widget events to the TUI.
pub struct TuiBridgeObserver {
    tx: Sender<TuiMessage>,
}

impl TuiBridgeObserver {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl WidgetObserver for TuiBridgeObserver {
    fn on_event(&self, event: &WidgetEvent) {
        let _ = self.tx.try_send(TuiMessage::Widget(event.clone()));
    }
}

/// TUI result presenter.
pub struct TuiResultPresenter {
    tx: Sender<TuiMessage>,
}

impl TuiResultPresenter {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl ResultPresenter for TuiResultPresenter {
    fn present_start(&self, index: usize, name: &str) {
        let _ = self.tx.try_send(TuiMessage::TaskStarted {
            index,
            name: name.to_string(),
        });
    }

    fn present_result(&self, result: &TaskResult) {
        let error = result.outcome.as_ref().err().map(ToString::to_string);
        let log = match &error {
            None => format!("{} finished in {:.3?}", result.name, result.duration),
            Some(err) => format!("[ERROR] {}: {err}", result.name),
        };
        let _ = self.tx.try_send(TuiMessage::TaskFinished {
            index: result.index,
            name: result.name.clone(),
            duration: result.duration,
            error,
        });
        let _ = self.tx.try_send(TuiMessage::Log(log));
    }

    fn present_summary(&self, results: &[TaskResult]) {
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        let _ = self.tx.try_send(TuiMessage::Log(format!(
            "{} tasks, {failed} failed",
            results.len()
        )));
        let _ = self.tx.try_send(TuiMessage::Finished);
    }
}

/// Console for tasks running behind the TUI.
///
/// Messages go to the log panel. A prompt is shown by the render loop and
/// the task waits for the answer, giving up when the run is cancelled.
pub struct TuiConsole {
    tx: Sender<TuiMessage>,
    cancel: TimeoutCancellationToken,
}

impl TuiConsole {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>, cancel: TimeoutCancellationToken) -> Self {
        Self { tx, cancel }
    }
}

impl Console for TuiConsole {
    fn message(&self, text: &str) {
        let _ = self.tx.try_send(TuiMessage::Log(text.to_string()));
    }

    fn prompt(&self, question: &str) -> Result<String, UiError> {
        let (reply, answers) = crossbeam_channel::bounded(1);
        let request = PromptRequest {
            question: question.to_string(),
            reply,
        };
        self.tx
            .send(TuiMessage::Prompt(request))
            .map_err(|_| UiError::InputClosed)?;
        loop {
            match answers.recv_timeout(PROMPT_POLL) {
                Ok(answer) => {
                    debug!(question, "Prompt answered");
                    return answer;
                }
                Err(RecvTimeoutError::Timeout) => self.cancel.check_cancelled()?,
                Err(RecvTimeoutError::Disconnected) => return Err(UiError::InputClosed),
            }
        }
    }
}
