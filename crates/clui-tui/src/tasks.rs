//! Task list panel.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Where a task is in its run.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    Running,
    Done(Duration),
    Failed(String),
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub name: String,
    pub status: TaskStatus,
}

impl TaskRow {
    fn describe(&self) -> (String, Color) {
        match &self.status {
            TaskStatus::Running => (format!("... {}", self.name), Color::Yellow),
            TaskStatus::Done(d) => (format!("ok  {} ({d:.2?})", self.name), Color::Green),
            TaskStatus::Failed(err) => (format!("err {}: {err}", self.name), Color::Red),
        }
    }
}

/// Render the task list.
pub fn render_tasks(frame: &mut Frame, area: Rect, rows: &[TaskRow]) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let (text, color) = row.describe();
            ListItem::new(Line::raw(text)).style(Style::default().fg(color))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Tasks "));
    frame.render_widget(list, area);
}
