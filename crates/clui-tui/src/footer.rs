//! TUI footer: key hints, or the pending prompt.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// What the footer line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterState<'a> {
    Running,
    Finished,
    /// A question and the answer typed so far.
    Prompt { question: &'a str, input: &'a str },
}

/// Render the footer panel.
pub fn render_footer(frame: &mut Frame, area: Rect, state: FooterState<'_>) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let line = match state {
        FooterState::Prompt { question, input } => Line::from(vec![
            Span::styled(
                format!("{question} "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        FooterState::Running | FooterState::Finished => {
            let mut spans = vec![
                key("q"),
                Span::raw(": quit | "),
                key("l"),
                Span::raw(": logs | "),
                key("↑↓"),
                Span::raw(": scroll"),
            ];
            if state == FooterState::Finished {
                spans.push(Span::styled(
                    " | all tasks finished",
                    Style::default().fg(Color::Green),
                ));
            }
            Line::from(spans)
        }
    };
    let paragraph = Paragraph::new(vec![line]).block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: FooterState<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        let frame = terminal
            .draw(|frame| render_footer(frame, frame.area(), state))
            .unwrap();
        (0..frame.area.width)
            .map(|x| frame.buffer[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn key_hints() {
        let content = draw(FooterState::Running);
        assert!(content.contains("quit"));
        assert!(content.contains("logs"));
        assert!(!content.contains("finished"));
        assert!(draw(FooterState::Finished).contains("all tasks finished"));
    }

    #[test]
    fn prompt_shows_question_and_input() {
        let content = draw(FooterState::Prompt {
            question: "Name?",
            input: "Ad",
        });
        assert!(content.contains("Name? Ad_"));
    }
}
