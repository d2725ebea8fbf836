//! Engine interfaces: tasks and the surfaces each mode provides them.

use std::fmt;
use std::time::Duration;

use clui_core::error::UiError;

use crate::context::TaskContext;

/// A unit of work run by the engine.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    /// Run to completion, checking `ctx` for cancellation along the way.
    fn run(&self, ctx: &TaskContext) -> Result<(), UiError>;
}

/// Task built from a closure.
pub struct FnTask<F> {
    name: String,
    body: F,
}

impl<F> FnTask<F>
where
    F: Fn(&TaskContext) -> Result<(), UiError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

impl<F> Task for FnTask<F>
where
    F: Fn(&TaskContext) -> Result<(), UiError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &TaskContext) -> Result<(), UiError> {
        (self.body)(ctx)
    }
}

impl<F> fmt::Debug for FnTask<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTask").field("name", &self.name).finish()
    }
}

/// Result of a single task.
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Position in the task list.
    pub index: usize,
    pub name: String,
    pub outcome: Result<(), UiError>,
    pub duration: Duration,
}

impl TaskResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Reports task lifecycle to the user.
pub trait ResultPresenter: Send + Sync {
    fn present_start(&self, index: usize, name: &str);

    fn present_result(&self, result: &TaskResult);

    fn present_summary(&self, results: &[TaskResult]);
}

/// Text interaction available to running tasks.
pub trait Console: Send + Sync {
    /// Show a line of text without disturbing active widgets.
    fn message(&self, text: &str);

    /// Ask a question and block until the user answers.
    fn prompt(&self, question: &str) -> Result<String, UiError>;
}

/// Presenter that shows nothing.
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_start(&self, _index: usize, _name: &str) {}
    fn present_result(&self, _result: &TaskResult) {}
    fn present_summary(&self, _results: &[TaskResult]) {}
}

/// Console without a user: messages are dropped and prompts fail.
pub struct NullConsole;

impl Console for NullConsole {
    fn message(&self, _text: &str) {}

    fn prompt(&self, _question: &str) -> Result<String, UiError> {
        Err(UiError::InputClosed)
    }
}
