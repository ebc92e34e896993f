// Status bar component
//
// Latest log line on the left, key hints on the right.

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const HINTS: &str = "↑↓ select  ⏎ open  ⌫ up  m menu  q quit ";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = &app.palette;
    let width = area.width as usize;

    let (message, color) = match app.log_buffer.latest() {
        Some(entry) => {
            let color = match entry.level {
                LogLevel::Error => palette.error,
                LogLevel::Warn => palette.warn,
                _ => palette.muted,
            };
            (format!(" {}", entry.message), color)
        }
        None => (String::new(), palette.muted),
    };

    let room = width.saturating_sub(HINTS.width() + 1);
    let message = truncate(&message, room);
    let pad = width.saturating_sub(message.width() + HINTS.width());

    let line = Line::from(vec![
        Span::styled(message, Style::default().fg(color)),
        Span::raw(" ".repeat(pad)),
        Span::styled(HINTS, Style::default().fg(palette.status_bar)),
    ]);

    let status = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

/// Cut to at most `width` columns, marking the cut with `…`
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() + 1 > width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
