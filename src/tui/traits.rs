//! Component contracts
//!
//! Components that react to keys implement [`Interactive`] and report whether
//! they consumed the key, so the app can fall through to the next layer.

use crossterm::event::KeyEvent;

/// Result of offering a key to a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// A component that handles keyboard input
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;
}
