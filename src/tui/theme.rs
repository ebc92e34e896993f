// Color palette for the TUI
//
// A single fixed palette; every component takes colors from here rather than
// hardcoding them.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Palette {
    pub title: Color,
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    /// Frame captions
    pub caption: Color,
    /// Values shown at the right edge of a row (text, switch, slider)
    pub value: Color,
    pub link: Color,
    pub status_bar: Color,
    pub error: Color,
    pub warn: Color,
    pub border_type: BorderType,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            foreground: Color::White,
            background: Color::Black,
            muted: Color::DarkGray,
            highlight: Color::Yellow,
            selection_bg: Color::Rgb(40, 44, 52),
            caption: Color::LightBlue,
            value: Color::Green,
            link: Color::Magenta,
            status_bar: Color::Gray,
            error: Color::Red,
            warn: Color::Yellow,
            border_type: BorderType::Rounded,
        }
    }
}

impl Palette {
    pub fn caption_style(&self) -> Style {
        Style::default()
            .fg(self.caption)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}
