//! Sequential task execution and result analysis.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clui_core::error::UiError;
use tracing::{debug, info, warn};

use crate::context::{ExecutionEnv, TaskContext};
use crate::interfaces::{ResultPresenter, Task, TaskResult};

/// Run `tasks` one after another on the calling thread.
///
/// Once the run is cancelled or past its deadline the remaining tasks are
/// reported with that error and not started. A panicking task is reported
/// as failed and the run goes on.
pub fn execute_tasks(
    tasks: &[Arc<dyn Task>],
    env: &ExecutionEnv,
    presenter: &dyn ResultPresenter,
) -> Vec<TaskResult> {
    let mut results = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let name = task.name().to_string();
        if let Err(err) = env.cancel.check_cancelled() {
            debug!(task = %name, error = %err, "Skipping task");
            let result = TaskResult {
                index,
                name,
                outcome: Err(err),
                duration: Duration::ZERO,
            };
            presenter.present_result(&result);
            results.push(result);
            continue;
        }

        presenter.present_start(index, &name);
        let ctx = TaskContext::new(index, env.clone());
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.run(&ctx)))
            .unwrap_or_else(|payload| Err(UiError::Task(panic_message(&name, &*payload))));
        let duration = start.elapsed();

        match &outcome {
            Ok(()) => info!(task = %name, ?duration, "Task finished"),
            Err(err) => warn!(task = %name, error = %err, "Task failed"),
        }
        let result = TaskResult {
            index,
            name,
            outcome,
            duration,
        };
        presenter.present_result(&result);
        results.push(result);
    }
    presenter.present_summary(&results);
    results
}

fn panic_message(task: &str, payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("{task} panicked: {detail}")
}

/// `Ok` when every task succeeded, otherwise the most significant error.
///
/// Cancellation wins over timeouts, which win over other failures, so the
/// exit status reflects why the run stopped.
pub fn summarize_results(results: &[TaskResult]) -> Result<(), UiError> {
    let errors = || results.iter().filter_map(|r| r.outcome.as_ref().err());
    if let Some(err) = errors().find(|e| matches!(e, UiError::Cancelled)) {
        return Err(err.clone());
    }
    if let Some(err) = errors().find(|e| matches!(e, UiError::Timeout(_))) {
        return Err(err.clone());
    }
    match errors().next() {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}
