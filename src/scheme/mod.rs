//! URI scheme catalog and dispatch
//!
//! Every URI the viewer acts on is classified into a `SchemeType` (a category
//! of schemes handled uniformly), then routed through the `HandlerRegistry` to
//! the one handler registered for that category.
//!
//! ```text
//! "sitemap://demo/" ─► classify("sitemap") = Sitemap ─► SitemapHandler
//! "icon:switch#on"  ─► classify("icon")    = Icon    ─► IconHandler
//! "ftp://host"      ─► classify("ftp")     = Unknown ─► (no handler)
//! ```

pub mod handler;
pub mod registry;

pub use handler::SchemeHandler;
pub use registry::{Dispatched, HandlerRegistry, Route};

use std::fmt;

/// Category of URI schemes handled by the same handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeType {
    Sitemap,
    Notify,
    Icon,
    Web,
    Unsupported,
    Unknown,
}

impl SchemeType {
    /// All categories, in classification order
    pub fn all() -> &'static [SchemeType] {
        &[
            SchemeType::Sitemap,
            SchemeType::Notify,
            SchemeType::Icon,
            SchemeType::Web,
            SchemeType::Unsupported,
            SchemeType::Unknown,
        ]
    }

    /// Literal schemes belonging to this category
    ///
    /// No scheme may appear under two categories. This is not checked at
    /// runtime; `classify` returns the first match.
    pub fn schemes(&self) -> &'static [&'static str] {
        match self {
            SchemeType::Sitemap => &["sitemap", "navigation", "item", "thing"],
            SchemeType::Notify => &["snackbar"],
            SchemeType::Icon => &["icon"],
            SchemeType::Web => &["http", "https"],
            SchemeType::Unsupported => &["mailto"],
            SchemeType::Unknown => &[],
        }
    }

    /// Whether this category lists the given scheme
    pub fn includes(&self, scheme: &str) -> bool {
        self.schemes().contains(&scheme)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeType::Sitemap => "SITEMAP",
            SchemeType::Notify => "NOTIFY",
            SchemeType::Icon => "ICON",
            SchemeType::Web => "WEB",
            SchemeType::Unsupported => "UNSUPPORTED",
            SchemeType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a scheme into its category, `Unknown` when no category lists it
pub fn classify(scheme: &str) -> SchemeType {
    SchemeType::all()
        .iter()
        .copied()
        .find(|t| t.includes(scheme))
        .unwrap_or(SchemeType::Unknown)
}
