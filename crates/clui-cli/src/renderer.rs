//! Line renderer: the CLI-mode render loop.
//!
//! Draws widgets synchronously on the thread that mutates them. The active
//! widget owns the current terminal line and is redrawn in place with a
//! carriage return; stopping it moves on to a fresh line.

use std::io::{self, Write};

use clui_core::observer::WidgetObserver;
use clui_core::widget::{EventKind, WidgetEvent, WidgetId};
use parking_lot::Mutex;
use tracing::{trace, warn};

struct LineState<W> {
    out: W,
    /// Widget drawn on the current line.
    owner: Option<WidgetId>,
    /// Characters on the current line.
    drawn: usize,
    /// Last line drawn for the owner.
    last_line: String,
}

impl<W: Write> LineState<W> {
    fn at_line_start(&self) -> bool {
        self.drawn == 0
    }

    fn end_line(&mut self) -> io::Result<()> {
        if !self.at_line_start() {
            self.out.write_all(b"\n")?;
        }
        self.drawn = 0;
        Ok(())
    }

    fn blank(&mut self) -> io::Result<()> {
        if self.drawn > 0 {
            write!(self.out, "\r{}\r", " ".repeat(self.drawn))?;
        }
        self.drawn = 0;
        Ok(())
    }

    fn draw(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.drawn = line.chars().count();
        self.last_line = line.to_string();
        Ok(())
    }

    fn take_line(&mut self, id: WidgetId, line: &str) -> io::Result<()> {
        self.end_line()?;
        self.owner = Some(id);
        self.draw(line)
    }

    fn apply(&mut self, event: &WidgetEvent) -> io::Result<()> {
        let id = event.id();
        let line = event.snapshot.line.as_str();
        let owned = self.owner == Some(id);
        match event.kind {
            EventKind::Started => self.take_line(id, line)?,
            EventKind::Changed if owned => {
                self.blank()?;
                self.draw(line)?;
            }
            EventKind::Changed => self.take_line(id, line)?,
            EventKind::Stopped if owned => {
                if line != self.last_line {
                    self.blank()?;
                    self.draw(line)?;
                }
                self.end_line()?;
                self.owner = None;
            }
            EventKind::Removed if owned => {
                self.blank()?;
                self.owner = None;
            }
            EventKind::Stopped | EventKind::Removed => {}
        }
        self.out.flush()
    }
}

/// Renders widget events as in-place terminal lines.
pub struct LineRenderer<W: Write + Send> {
    state: Mutex<LineState<W>>,
}

impl LineRenderer<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LineRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(LineState {
                out,
                owner: None,
                drawn: 0,
                last_line: String::new(),
            }),
        }
    }

    /// Print a full line above the active widget, then redraw the widget.
    pub fn print_line(&self, text: &str) -> io::Result<()> {
        let mut st = self.state.lock();
        if st.owner.is_some() {
            st.blank()?;
        } else {
            st.end_line()?;
        }
        writeln!(st.out, "{text}")?;
        if st.owner.is_some() {
            let line = std::mem::take(&mut st.last_line);
            st.draw(&line)?;
        }
        st.out.flush()
    }

    /// Leave the active widget's line as is and move to a fresh line.
    ///
    /// The widget is redrawn on a new line at its next change.
    pub fn suspend(&self) -> io::Result<()> {
        let mut st = self.state.lock();
        st.end_line()?;
        st.owner = None;
        st.out.flush()
    }

    /// Write a question on a fresh line, ready for the user's answer.
    ///
    /// The question holds the line until `end_prompt`; widget changes in
    /// between go to a new line.
    pub fn begin_prompt(&self, question: &str) -> io::Result<()> {
        let mut st = self.state.lock();
        st.end_line()?;
        st.owner = None;
        write!(st.out, "{question} ")?;
        st.drawn = question.chars().count() + 1;
        st.out.flush()
    }

    /// Close the prompt line once the answer is read. A terminal that
    /// `echoed` the answer has already moved to the next line.
    pub fn end_prompt(&self, echoed: bool) -> io::Result<()> {
        let mut st = self.state.lock();
        if echoed && st.owner.is_none() {
            st.drawn = 0;
        } else {
            st.end_line()?;
            st.owner = None;
        }
        st.out.flush()
    }

    /// Widget currently drawn on the active line.
    #[must_use]
    pub fn owner(&self) -> Option<WidgetId> {
        self.state.lock().owner
    }

    /// Finish the current line, if any.
    pub fn finish(&self) -> io::Result<()> {
        self.suspend()
    }
}

impl<W: Write + Send> WidgetObserver for LineRenderer<W> {
    fn on_event(&self, event: &WidgetEvent) {
        trace!(widget = %event.id(), kind = ?event.kind, "Render");
        if let Err(err) = self.state.lock().apply(event) {
            warn!(error = %err, "Failed to draw widget");
        }
    }
}
