//! TUI header panel.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Render the title line with run progress.
pub fn render_header(frame: &mut Frame, area: Rect, elapsed: Duration, done: usize, total: usize) {
    let text = vec![Line::from(vec![
        Span::styled("clui", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            " | mode: tui | elapsed: {:.1}s | tasks: {done}/{total}",
            elapsed.as_secs_f64()
        )),
    ])];
    let block = Block::default().borders(Borders::BOTTOM).title(" clui ");
    frame.render_widget(Paragraph::new(text).block(block), area);
}
