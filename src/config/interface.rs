//! Icon and terminal UI settings

use crate::icon::DEFAULT_ICONSET;
use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Icons
// ─────────────────────────────────────────────────────────────────────────────

/// Icon set selection
#[derive(Debug, Clone)]
pub struct IconsConfig {
    /// Iconset used by `icon:<category>` URIs without an explicit set
    pub default_set: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            default_set: DEFAULT_ICONSET.to_string(),
        }
    }
}

/// Icon settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileIcons {
    pub default_set: Option<String>,
}

impl IconsConfig {
    pub fn from_file(file: Option<FileIcons>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            default_set: file
                .default_set
                .filter(|s| !s.is_empty() && !s.contains('/'))
                .unwrap_or_else(|| DEFAULT_ICONSET.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal UI
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal UI timing
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// How long a notification stays on screen
    pub toast_secs: u64,
    /// Redraw interval
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_secs: 3,
            tick_ms: 200,
        }
    }
}

/// UI settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileUi {
    pub toast_secs: Option<u64>,
    pub tick_ms: Option<u64>,
}

impl UiConfig {
    pub fn from_file(file: Option<FileUi>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            toast_secs: file.toast_secs.unwrap_or(defaults.toast_secs).max(1),
            // Below ~16ms the loop only burns CPU
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms).clamp(16, 5_000),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
