//! Widget panel: one gauge or text line per widget.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use clui_core::widget::WidgetSnapshot;

/// Rows each widget takes, borders included.
const WIDGET_HEIGHT: u16 = 3;

/// Render widgets top to bottom; those that do not fit are skipped.
pub fn render_widgets(frame: &mut Frame, area: Rect, widgets: &[&WidgetSnapshot]) {
    let mut y = area.y;
    for snapshot in widgets {
        if y + WIDGET_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height: WIDGET_HEIGHT,
        };
        let color = if snapshot.active {
            Color::Green
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", snapshot.title))
            .border_style(Style::default().fg(color));
        match snapshot.ratio {
            Some(ratio) => {
                let label = snapshot.caption.clone().unwrap_or_default();
                let gauge = Gauge::default()
                    .block(block)
                    .gauge_style(Style::default().fg(color))
                    .ratio(ratio.clamp(0.0, 1.0))
                    .label(label);
                frame.render_widget(gauge, rect);
            }
            None => {
                frame.render_widget(Paragraph::new(snapshot.line.as_str()).block(block), rect);
            }
        }
        y += WIDGET_HEIGHT;
    }
}
