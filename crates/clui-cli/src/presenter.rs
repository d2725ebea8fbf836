//! CLI result presenter.

use std::io::Write;
use std::sync::Arc;

use clui_engine::interfaces::{ResultPresenter, TaskResult};
use tracing::warn;

use crate::output::{format_duration, format_summary_row};
use crate::renderer::LineRenderer;
use crate::ui;

/// Reports task outcomes between the widget lines.
pub struct CliResultPresenter<W: Write + Send> {
    renderer: Arc<LineRenderer<W>>,
    verbose: bool,
    quiet: bool,
}

impl<W: Write + Send> CliResultPresenter<W> {
    #[must_use]
    pub fn new(renderer: Arc<LineRenderer<W>>, verbose: bool, quiet: bool) -> Self {
        Self {
            renderer,
            verbose,
            quiet,
        }
    }

    fn print(&self, text: &str) {
        if let Err(err) = self.renderer.print_line(text) {
            warn!(error = %err, "Failed to print result");
        }
    }
}

impl<W: Write + Send> ResultPresenter for CliResultPresenter<W> {
    fn present_start(&self, index: usize, name: &str) {
        if self.verbose && !self.quiet {
            self.print(&ui::header(&format!("Task {}: {name}", index + 1)));
        }
    }

    fn present_result(&self, result: &TaskResult) {
        match &result.outcome {
            Ok(()) if self.quiet => {}
            Ok(()) => self.print(&ui::success(&format!(
                "{} ({})",
                result.name,
                format_duration(result.duration)
            ))),
            Err(err) => self.print(&ui::error(&format!("{}: {err}", result.name))),
        }
    }

    fn present_summary(&self, results: &[TaskResult]) {
        if self.quiet || results.len() < 2 {
            return;
        }
        self.print("");
        self.print("Summary:");
        self.print(&"-".repeat(60));
        for result in results {
            let status = if result.is_ok() { "OK" } else { "ERROR" };
            self.print(&format_summary_row(&result.name, result.duration, status));
        }
    }
}
