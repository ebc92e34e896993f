// Containers - components owning an ordered list of children
//
// Frames and navigable containers hold other containers; widgets hold atoms.
// Child order is document order and is never rearranged.

use super::{Atom, ComponentType, Presentation, UriRef};

/// Data carried by sitemaps and pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigableData {
    /// Canonical identifier of the container
    pub uri: Option<UriRef>,
    /// Display title
    pub label: Option<String>,
    pub icon: Option<UriRef>,
}

/// Which navigable shape a container has
#[derive(Debug, Clone, PartialEq)]
pub enum NavigableKind {
    /// Root of a sitemap
    Sitemap { id: Option<String> },
    Page,
}

/// Container addressable by its own URI; the only thing navigation displays
#[derive(Debug, Clone, PartialEq)]
pub struct NavigableContainer {
    pub kind: NavigableKind,
    pub presentation: Presentation,
    pub data: NavigableData,
    pub components: Vec<Container>,
}

impl NavigableContainer {
    pub fn component_type(&self) -> ComponentType {
        match self.kind {
            NavigableKind::Sitemap { .. } => ComponentType::Sitemap,
            NavigableKind::Page => ComponentType::Page,
        }
    }

    /// Display title, empty when the payload has none
    pub fn label(&self) -> &str {
        self.data.label.as_deref().unwrap_or_default()
    }

    pub fn sitemap_id(&self) -> Option<&str> {
        match &self.kind {
            NavigableKind::Sitemap { id } => id.as_deref(),
            NavigableKind::Page => None,
        }
    }

    /// Containers shown as list rows, in document order
    ///
    /// Each direct child is a row; children of a non-widget child (a frame's
    /// widgets) follow it as rows of their own. Atoms are never rows.
    pub fn rows(&self) -> Vec<&Container> {
        let mut rows = Vec::new();
        for child in &self.components {
            rows.push(child);
            rows.extend(child.child_containers());
        }
        rows
    }
}

/// Container whose data is a caption
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub presentation: Presentation,
    pub caption: Option<String>,
    pub components: Vec<Container>,
}

/// Container of atoms rendered as a single row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Widget {
    pub presentation: Presentation,
    pub components: Vec<Atom>,
}

impl Widget {
    /// Action URI of the first actionable atom, if any
    ///
    /// This is the widget's data; it is derived from the children on every
    /// call rather than stored.
    pub fn data(&self) -> Option<&UriRef> {
        self.components.iter().find_map(Atom::action)
    }
}

/// Any component that owns children
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Frame(Frame),
    Widget(Widget),
    Navigable(NavigableContainer),
}

impl Container {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Container::Frame(_) => ComponentType::Frame,
            Container::Widget(_) => ComponentType::Widget,
            Container::Navigable(n) => n.component_type(),
        }
    }

    pub fn presentation(&self) -> &Presentation {
        match self {
            Container::Frame(f) => &f.presentation,
            Container::Widget(w) => &w.presentation,
            Container::Navigable(n) => &n.presentation,
        }
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        match self {
            Container::Frame(f) => f.components.len(),
            Container::Widget(w) => w.components.len(),
            Container::Navigable(n) => n.components.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child containers; widgets have none (their children are atoms)
    pub fn child_containers(&self) -> &[Container] {
        match self {
            Container::Frame(f) => &f.components,
            Container::Navigable(n) => &n.components,
            Container::Widget(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> Atom {
        Atom::Label(Presentation::default(), Some(text.to_string()))
    }

    fn group(uri: &str) -> Atom {
        Atom::Group(Presentation::default(), Some(UriRef::new(uri)))
    }

    #[test]
    fn test_widget_without_action_has_empty_data() {
        let widget = Widget {
            presentation: Presentation::default(),
            components: vec![label("Temperature")],
        };
        assert_eq!(widget.data(), None);
    }

    #[test]
    fn test_widget_data_is_first_action() {
        let widget = Widget {
            presentation: Presentation::default(),
            components: vec![label("Kitchen"), group("page:kitchen"), group("page:other")],
        };
        assert_eq!(widget.data(), Some(&UriRef::new("page:kitchen")));
    }

    #[test]
    fn test_group_without_uri_is_skipped() {
        let widget = Widget {
            presentation: Presentation::default(),
            components: vec![
                Atom::Group(Presentation::default(), None),
                group("page:kitchen"),
            ],
        };
        assert_eq!(widget.data().map(UriRef::as_str), Some("page:kitchen"));
    }

    #[test]
    fn test_rows_flatten_one_level() {
        let widget = |text: &str| {
            Container::Widget(Widget {
                presentation: Presentation::default(),
                components: vec![label(text)],
            })
        };
        let page = NavigableContainer {
            kind: NavigableKind::Page,
            presentation: Presentation::default(),
            data: NavigableData::default(),
            components: vec![
                widget("top"),
                Container::Frame(Frame {
                    caption: Some("Lights".to_string()),
                    components: vec![widget("ceiling"), widget("lamp")],
                    ..Frame::default()
                }),
            ],
        };

        let types: Vec<ComponentType> = page.rows().iter().map(|c| c.component_type()).collect();
        assert_eq!(
            types,
            vec![
                ComponentType::Widget,
                ComponentType::Frame,
                ComponentType::Widget,
                ComponentType::Widget
            ]
        );
        assert_eq!(page.rows()[3], &widget("lamp"));
    }

    #[test]
    fn test_child_containers() {
        let frame = Container::Frame(Frame {
            caption: Some("Ground floor".to_string()),
            components: vec![Container::Widget(Widget::default())],
            ..Frame::default()
        });
        assert_eq!(frame.child_containers().len(), 1);
        assert!(Container::Widget(Widget::default())
            .child_containers()
            .is_empty());
    }
}
