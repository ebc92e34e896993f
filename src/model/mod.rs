//! Sitemap rendering model
//!
//! A sitemap is a tree of components. Containers own an ordered list of
//! children; atoms are leaves. The `type` tag of every node fixes its shape:
//!
//! ```text
//! Sitemap / Page (navigable)
//! └── Frame ("Ground floor")
//!     ├── Widget
//!     │   ├── Icon  (icon:light#on)
//!     │   ├── Label ("Ceiling")
//!     │   └── Switch {ON: On, OFF: Off}
//!     └── Widget
//!         ├── Label ("Kitchen")
//!         └── Group (sitemap://demo/kitchen/)
//! ```
//!
//! Trees are built by [`decode`] and never mutated afterwards.

pub mod atom;
pub mod container;
pub mod decode;

pub use atom::Atom;
pub use container::{Container, Frame, NavigableContainer, NavigableData, NavigableKind, Widget};

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Closed set of component tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Sitemap,
    Frame,
    Group,
    Icon,
    Page,
    Label,
    Selection,
    Slider,
    Switch,
    Text,
    Widget,
}

impl ComponentType {
    pub fn all() -> &'static [ComponentType] {
        &[
            ComponentType::Sitemap,
            ComponentType::Frame,
            ComponentType::Group,
            ComponentType::Icon,
            ComponentType::Page,
            ComponentType::Label,
            ComponentType::Selection,
            ComponentType::Slider,
            ComponentType::Switch,
            ComponentType::Text,
            ComponentType::Widget,
        ]
    }

    /// Tag name as written in payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Sitemap => "sitemap",
            ComponentType::Frame => "frame",
            ComponentType::Group => "group",
            ComponentType::Icon => "icon",
            ComponentType::Page => "page",
            ComponentType::Label => "label",
            ComponentType::Selection => "selection",
            ComponentType::Slider => "slider",
            ComponentType::Switch => "switch",
            ComponentType::Text => "text",
            ComponentType::Widget => "widget",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    /// Case-insensitive match against the tag names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Rendering hints shared by every component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub layout: Option<String>,
    pub style: Option<String>,
}

/// URI reference as authored in a payload
///
/// May be relative (`kitchen/`) and is only resolved against the URI of the
/// container being displayed when acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRef(String);

impl UriRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a base URI (RFC 3986 reference resolution)
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.0)
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Any node of the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Container(Container),
    Atom(Atom),
}

impl Component {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::Container(c) => c.component_type(),
            Component::Atom(a) => a.component_type(),
        }
    }

    pub fn presentation(&self) -> &Presentation {
        match self {
            Component::Container(c) => c.presentation(),
            Component::Atom(a) => a.presentation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_parse_is_case_insensitive() {
        assert_eq!("FRAME".parse::<ComponentType>(), Ok(ComponentType::Frame));
        assert_eq!("Widget".parse::<ComponentType>(), Ok(ComponentType::Widget));
        assert_eq!("slider".parse::<ComponentType>(), Ok(ComponentType::Slider));
        assert!("smarthome".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_every_tag_round_trips() {
        for t in ComponentType::all() {
            assert_eq!(t.as_str().parse::<ComponentType>(), Ok(*t));
        }
    }

    #[test]
    fn test_uri_ref_resolution() {
        let base = Url::parse("sitemap://demo/").unwrap();
        assert_eq!(
            UriRef::new("kitchen/").resolve(&base).unwrap().as_str(),
            "sitemap://demo/kitchen/"
        );
        assert_eq!(
            UriRef::new("page:kitchen").resolve(&base).unwrap().as_str(),
            "page:kitchen"
        );
        assert_eq!(
            UriRef::new("https://www.openhab.org")
                .resolve(&base)
                .unwrap()
                .as_str(),
            "https://www.openhab.org/"
        );
    }
}
