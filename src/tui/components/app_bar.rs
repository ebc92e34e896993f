// App bar component
//
// Navigation button on the left (drawer at the top level, back arrow below
// it), the title of the displayed container, and the overflow menu marker.

use crate::navigation::Affordance;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Glyph for the navigation button
pub fn nav_glyph(affordance: Affordance) -> &'static str {
    match affordance {
        Affordance::Menu => "☰",
        Affordance::Up => "←",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = &app.palette;
    let title = if app.snapshot.title.is_empty() {
        "Sitemap Viewer"
    } else {
        app.snapshot.title.as_str()
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", nav_glyph(app.snapshot.affordance())),
            Style::default().fg(palette.highlight),
        ),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(palette.border_type)
            .border_style(Style::default().fg(palette.title))
            .title_top(Line::from(" ⋮ ").right_aligned()),
    );

    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_follows_affordance() {
        assert_eq!(nav_glyph(Affordance::Menu), "☰");
        assert_eq!(nav_glyph(Affordance::Up), "←");
    }
}
