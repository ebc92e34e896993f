// Atoms - indivisible leaf components
//
// The tag selects the shape of `data`: a URI for GROUP and ICON, free text
// for LABEL and TEXT, a mapping selection for SELECTION and SWITCH, and a
// number for SLIDER.

use super::{ComponentType, Presentation, UriRef};

/// Ordered key → label entries plus the selected key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mappings {
    pub mappings: Vec<(String, String)>,
    pub selected: Option<String>,
}

impl Mappings {
    /// Label of the selected entry, if the selection names one
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.mappings
            .iter()
            .find(|(key, _)| key == selected)
            .map(|(_, label)| label.as_str())
    }
}

/// Leaf node with tag-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Actionable atom: data is the action URI
    Group(Presentation, Option<UriRef>),
    Icon(Presentation, Option<UriRef>),
    Label(Presentation, Option<String>),
    Text(Presentation, Option<String>),
    Selection(Presentation, Mappings),
    Switch(Presentation, Mappings),
    Slider(Presentation, Option<f64>),
}

impl Atom {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Atom::Group(..) => ComponentType::Group,
            Atom::Icon(..) => ComponentType::Icon,
            Atom::Label(..) => ComponentType::Label,
            Atom::Text(..) => ComponentType::Text,
            Atom::Selection(..) => ComponentType::Selection,
            Atom::Switch(..) => ComponentType::Switch,
            Atom::Slider(..) => ComponentType::Slider,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        match self {
            Atom::Group(p, _)
            | Atom::Icon(p, _)
            | Atom::Label(p, _)
            | Atom::Text(p, _)
            | Atom::Selection(p, _)
            | Atom::Switch(p, _)
            | Atom::Slider(p, _) => p,
        }
    }

    /// Action URI, for actionable atoms that carry one
    pub fn action(&self) -> Option<&UriRef> {
        match self {
            Atom::Group(_, uri) => uri.as_ref(),
            _ => None,
        }
    }
}
