//! Scrollable log panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Scroll state for the log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogScrollState {
    /// First visible line.
    pub offset: usize,
    /// Follow new lines.
    pub auto_scroll: bool,
}

impl LogScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// A line was appended; `dropped` lines fell off the front.
    pub fn on_new_message(&mut self, total: usize, dropped: usize) {
        if self.auto_scroll {
            self.offset = last(total);
        } else {
            self.offset = self.offset.saturating_sub(dropped);
        }
    }

    pub fn scroll_up(&mut self) {
        self.page_up(1);
    }

    pub fn scroll_down(&mut self, total: usize) {
        self.page_down(1, total);
    }

    pub fn page_up(&mut self, page: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page);
    }

    /// Scrolling onto the last line resumes following.
    pub fn page_down(&mut self, page: usize, total: usize) {
        self.offset = (self.offset + page).min(last(total));
        if self.offset >= last(total) {
            self.auto_scroll = true;
        }
    }

    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    pub fn end(&mut self, total: usize) {
        self.auto_scroll = true;
        self.offset = last(total);
    }

    /// First line to draw so that the view fills `height` rows.
    #[must_use]
    pub fn first_visible(&self, total: usize, height: usize) -> usize {
        if self.auto_scroll {
            total.saturating_sub(height)
        } else {
            self.offset.min(total.saturating_sub(height))
        }
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

fn last(total: usize) -> usize {
    total.saturating_sub(1)
}

/// Render the log panel.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &[String], scroll: &LogScrollState) {
    let visible = usize::from(area.height.saturating_sub(2));
    let first = scroll.first_visible(logs.len(), visible);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(first)
        .take(visible)
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let title = if scroll.auto_scroll {
        " Logs ".to_string()
    } else {
        format!(" Logs ({}/{}) ", first + 1, logs.len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn follows_new_lines() {
        let mut state = LogScrollState::new();
        state.on_new_message(10, 0);
        assert_eq!(state.offset, 9);
        assert_eq!(state.first_visible(10, 4), 6);
    }

    #[test]
    fn scrolling_up_stops_following() {
        let mut state = LogScrollState::new();
        state.on_new_message(10, 0);
        state.scroll_up();
        assert!(!state.auto_scroll);
        assert_eq!(state.offset, 8);
        state.on_new_message(11, 0);
        assert_eq!(state.offset, 8);
    }

    #[test]
    fn dropped_lines_shift_the_view() {
        let mut state = LogScrollState::new();
        state.home();
        state.offset = 5;
        state.on_new_message(500, 1);
        assert_eq!(state.offset, 4);
    }

    #[test]
    fn reaching_the_bottom_resumes_following() {
        let mut state = LogScrollState::new();
        state.home();
        state.page_down(10, 50);
        assert_eq!(state.offset, 10);
        assert!(!state.auto_scroll);
        state.page_down(100, 50);
        assert_eq!(state.offset, 49);
        assert!(state.auto_scroll);
    }

    #[test]
    fn home_and_end() {
        let mut state = LogScrollState::new();
        state.home();
        assert_eq!(state.offset, 0);
        assert!(!state.auto_scroll);
        state.end(20);
        assert_eq!(state.offset, 19);
        assert!(state.auto_scroll);
    }

    #[test]
    fn scroll_in_empty_log() {
        let mut state = LogScrollState::new();
        state.scroll_down(0);
        assert_eq!(state.offset, 0);
        state.scroll_up();
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn renders_the_tail() {
        let logs: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        let state = LogScrollState::new();
        terminal
            .draw(|frame| render_logs(frame, frame.area(), &logs, &state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let row = |y: u16| -> String {
            (0..30u16).map(|x| buffer[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(1).contains("line 7"));
        assert!(row(3).contains("line 9"));
    }
}
