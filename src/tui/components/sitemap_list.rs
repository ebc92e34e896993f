// Sitemap list component
//
// One row per flattened container. Frames render as captions; widgets render
// their atoms on one line: icon and label on the left, the value or action
// marker on the right.

use crate::model::{Atom, Container, UriRef};
use crate::tui::app::App;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Selection state of the list
#[derive(Debug, Default)]
pub struct SitemapList {
    pub selected: usize,
    len: usize,
    page: usize,
}

impl SitemapList {
    /// New content: back to the first row
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.len.saturating_sub(1));
    }
}

impl Interactive for SitemapList {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.select(self.selected + 1),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            KeyCode::PageUp => self.select(self.selected.saturating_sub(self.page.max(1))),
            KeyCode::PageDown => self.select(self.selected + self.page.max(1)),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

/// Text of one row, before styling
#[derive(Debug, Default, PartialEq)]
pub struct RowText<'a> {
    pub icon: Option<&'a UriRef>,
    pub left: String,
    pub right: String,
    pub is_caption: bool,
    pub actionable: bool,
}

/// Describe a container as a row
pub fn describe(container: &Container) -> RowText<'_> {
    match container {
        Container::Frame(frame) => RowText {
            left: frame.caption.clone().unwrap_or_default(),
            is_caption: true,
            ..RowText::default()
        },
        Container::Navigable(nav) => RowText {
            icon: nav.data.icon.as_ref(),
            left: nav.label().to_string(),
            actionable: nav.data.uri.is_some(),
            ..RowText::default()
        },
        Container::Widget(widget) => {
            let mut row = RowText {
                actionable: widget.data().is_some(),
                ..RowText::default()
            };
            let mut left = Vec::new();
            let mut right = Vec::new();

            for atom in &widget.components {
                match atom {
                    Atom::Icon(_, uri) => row.icon = row.icon.or(uri.as_ref()),
                    Atom::Label(_, Some(text)) => left.push(text.clone()),
                    Atom::Text(_, Some(text)) => right.push(text.clone()),
                    Atom::Selection(_, mappings) => right.push(format!(
                        "{} ▾",
                        mappings
                            .selected_label()
                            .or(mappings.selected.as_deref())
                            .unwrap_or("-")
                    )),
                    Atom::Switch(_, mappings) => {
                        let on = mappings.selected.as_deref() == Some("ON");
                        right.push(if on { "[■ on ]" } else { "[ off□]" }.to_string());
                    }
                    Atom::Slider(_, value) => right.push(slider(value.unwrap_or(0.0))),
                    Atom::Group(_, Some(_)) => right.push("›".to_string()),
                    Atom::Label(_, None) | Atom::Text(_, None) | Atom::Group(_, None) => {}
                }
            }

            row.left = left.join(" ");
            row.right = right.join("  ");
            row
        }
    }
}

/// `━━━━━━━─── 65` for a value on a 0-100 scale
fn slider(value: f64) -> String {
    const CELLS: usize = 10;
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * CELLS as f64).round() as usize;
    let number = if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    };
    format!("{}{} {}", "━".repeat(filled), "─".repeat(CELLS - filled), number)
}

/// Render the list of rows for the current container
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.palette.clone();
    let inner_width = area.width.saturating_sub(2) as usize;
    app.list.page = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|container| {
            let row = describe(container);
            if row.is_caption {
                return ListItem::new(Line::from(Span::styled(
                    row.left,
                    palette.caption_style(),
                )));
            }

            let marker = match row.icon.map(|uri| app.icon_available(uri)) {
                Some(true) => "◆ ",
                Some(false) => "◇ ",
                None => "  ",
            };
            let left = format!("  {}{}", marker, row.left);
            let pad = inner_width.saturating_sub(left.width() + row.right.width() + 1);
            let right_style = if row.actionable {
                Style::default().fg(palette.link)
            } else {
                Style::default().fg(palette.value)
            };

            ListItem::new(Line::from(vec![
                Span::styled(left, Style::default().fg(palette.foreground)),
                Span::raw(" ".repeat(pad)),
                Span::styled(row.right, right_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(palette.border_type)
                .border_style(Style::default().fg(palette.muted)),
        )
        .highlight_style(palette.selected_style());

    let mut state = ListState::default();
    if !app.list.is_empty() {
        state.select(Some(app.list.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Mappings;
    use crate::model::{Frame as FrameContainer, Presentation, Widget};
    use crossterm::event::KeyModifiers;

    fn p() -> Presentation {
        Presentation::default()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut list = SitemapList::default();
        list.reset(3);
        assert_eq!(list.handle_key(key(KeyCode::Up)), Handled::Yes);
        assert_eq!(list.selected, 0);
        list.handle_key(key(KeyCode::Char('j')));
        list.handle_key(key(KeyCode::Down));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected, 2);
        list.handle_key(key(KeyCode::Home));
        assert_eq!(list.selected, 0);
        assert_eq!(list.handle_key(key(KeyCode::Char('x'))), Handled::No);
    }

    #[test]
    fn test_describe_widget_splits_left_and_right() {
        let widget = Container::Widget(Widget {
            presentation: p(),
            components: vec![
                Atom::Icon(p(), Some(UriRef::new("icon:light#on"))),
                Atom::Label(p(), Some("Ceiling".to_string())),
                Atom::Switch(
                    p(),
                    Mappings {
                        mappings: vec![("ON".into(), "On".into()), ("OFF".into(), "Off".into())],
                        selected: Some("ON".to_string()),
                    },
                ),
            ],
        });

        let row = describe(&widget);
        assert_eq!(row.icon.map(UriRef::as_str), Some("icon:light#on"));
        assert_eq!(row.left, "Ceiling");
        assert_eq!(row.right, "[■ on ]");
        assert!(!row.actionable);
    }

    #[test]
    fn test_describe_group_and_selection() {
        let widget = Container::Widget(Widget {
            presentation: p(),
            components: vec![
                Atom::Label(p(), Some("Scene".to_string())),
                Atom::Selection(
                    p(),
                    Mappings {
                        mappings: vec![("dine".into(), "Dinner".into())],
                        selected: Some("dine".to_string()),
                    },
                ),
                Atom::Group(p(), Some(UriRef::new("scenes/"))),
            ],
        });
        let row = describe(&widget);
        assert_eq!(row.right, "Dinner ▾  ›");
        assert!(row.actionable);
    }

    #[test]
    fn test_describe_frame_is_caption() {
        let frame = Container::Frame(FrameContainer {
            caption: Some("Ground Floor".to_string()),
            ..FrameContainer::default()
        });
        let row = describe(&frame);
        assert!(row.is_caption);
        assert_eq!(row.left, "Ground Floor");
    }

    #[test]
    fn test_slider_rendering() {
        assert_eq!(slider(65.0), "━━━━━━━─── 65");
        assert_eq!(slider(0.0), "────────── 0");
        assert_eq!(slider(12.5), "━───────── 12.5");
    }
}
