//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a configurable duration.
//! Notices are shown one at a time in arrival order; the queue is the
//! notification sink of the terminal UI.

use crate::notify::{Notice, Notifier};
use crate::tui::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    /// Set when the toast first becomes visible
    shown_at: Option<Instant>,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: None,
            duration,
        }
    }

    /// Check if the toast has been visible for its full duration
    pub fn is_expired(&self) -> bool {
        self.shown_at
            .is_some_and(|shown| shown.elapsed() >= self.duration)
    }

    /// Box width for the message, never wider than the screen allows
    fn width_in(&self, area_width: u16) -> u16 {
        // 2 chars padding each side, including border
        let wanted = self.message.width().saturating_add(4);
        let available = usize::from(area_width.saturating_sub(4));
        wanted.min(available) as u16
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let width = self.width_in(area.width);
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(palette.border_type)
            .border_style(Style::default().fg(palette.highlight))
            .style(Style::default().bg(palette.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

/// FIFO of pending toasts
pub struct ToastQueue {
    toasts: RefCell<VecDeque<Toast>>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: RefCell::new(VecDeque::new()),
            duration,
        }
    }

    /// Drop the visible toast once expired and start the clock on the next
    pub fn tick(&self) {
        let mut toasts = self.toasts.borrow_mut();
        if toasts.front().is_some_and(Toast::is_expired) {
            toasts.pop_front();
        }
        if let Some(front) = toasts.front_mut() {
            front.shown_at.get_or_insert_with(Instant::now);
        }
    }

    /// Message currently on screen
    pub fn current(&self) -> Option<String> {
        self.toasts.borrow().front().map(|t| t.message.clone())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }

    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        if let Some(toast) = self.toasts.borrow().front() {
            toast.render(f, area, palette);
        }
    }
}

impl Notifier for ToastQueue {
    fn enqueue(&self, notice: Notice) {
        self.toasts
            .borrow_mut()
            .push_back(Toast::new(notice.message, self.duration));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_toasts_show_in_arrival_order() {
        let queue = ToastQueue::new(Duration::ZERO);
        queue.enqueue(Notice::new("first"));
        queue.enqueue(Notice::new("second"));
        assert_eq!(queue.current().as_deref(), Some("first"));

        // First tick starts the clock, the next one expires a zero-length toast
        queue.tick();
        assert_eq!(queue.current().as_deref(), Some("first"));
        queue.tick();
        assert_eq!(queue.current().as_deref(), Some("second"));
        queue.tick();
        queue.tick();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_unshown_toast_never_expires() {
        let toast = Toast::new("waiting", Duration::ZERO);
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_width_clamps_oversized_message() {
        let toast = Toast::new("x".repeat(70_000), Duration::ZERO);
        assert_eq!(toast.width_in(80), 76);
        assert_eq!(toast.width_in(u16::MAX), u16::MAX - 4);
        assert_eq!(toast.width_in(2), 0);
        assert_eq!(Toast::new("hi", Duration::ZERO).width_in(80), 6);
    }

    #[test]
    fn test_oversized_toast_renders_inside_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(40, 2)).unwrap();
        let queue = ToastQueue::new(Duration::from_secs(5));
        queue.enqueue(Notice::new("y".repeat(70_000)));
        let palette = Palette::default();

        terminal
            .draw(|f| {
                let area = f.area();
                queue.render(f, area, &palette);
            })
            .unwrap();
    }

    #[test]
    fn test_long_toast_stays() {
        let queue = ToastQueue::new(Duration::from_secs(60));
        queue.enqueue(Notice::new("sticky"));
        queue.tick();
        queue.tick();
        assert_eq!(queue.len(), 1);
    }
}
