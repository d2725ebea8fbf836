//! Blocking console for CLI mode.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::sync::Arc;

use clui_core::error::UiError;
use clui_engine::interfaces::Console;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::renderer::LineRenderer;

/// Messages and questions interleaved with the widget lines.
///
/// Prompting blocks the calling task until a whole line is read.
pub struct CliConsole<W: Write + Send> {
    renderer: Arc<LineRenderer<W>>,
    input: Mutex<Box<dyn BufRead + Send>>,
    /// Whether the terminal echoes the answer, newline included.
    echoed: bool,
}

impl CliConsole<io::Stdout> {
    /// Console reading answers from stdin.
    #[must_use]
    pub fn stdin(renderer: Arc<LineRenderer<io::Stdout>>) -> Self {
        let echoed = io::stdin().is_terminal();
        Self::new(renderer, Box::new(BufReader::new(io::stdin())), echoed)
    }
}

impl<W: Write + Send> CliConsole<W> {
    #[must_use]
    pub fn new(renderer: Arc<LineRenderer<W>>, input: Box<dyn BufRead + Send>, echoed: bool) -> Self {
        Self {
            renderer,
            input: Mutex::new(input),
            echoed,
        }
    }
}

impl<W: Write + Send> Console for CliConsole<W> {
    fn message(&self, text: &str) {
        if let Err(err) = self.renderer.print_line(text) {
            warn!(error = %err, "Failed to print message");
        }
    }

    fn prompt(&self, question: &str) -> Result<String, UiError> {
        self.renderer.begin_prompt(question)?;
        let mut line = String::new();
        let read = self.input.lock().read_line(&mut line)?;
        self.renderer.end_prompt(self.echoed)?;
        if read == 0 {
            return Err(UiError::InputClosed);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        debug!(question, answer = %answer, "Prompt answered");
        Ok(answer)
    }
}
