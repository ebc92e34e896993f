//! Tagged-tree decoder for the rendering model
//!
//! Turns a JSON node of the form `{"type": "<tag>", ...fields}` into a
//! [`Component`]. The tag is resolved against [`ComponentType`] and a builder
//! for that tag reads the fields its shape declares:
//!
//! - `layout`, `style`: strings, on every component
//! - `data`: decoded as the shape's data type (caption, URI, text, mappings,
//!   number, or the navigable data record)
//! - `components`: array, every element decoded as a generic component by its
//!   own tag, in document order
//!
//! Unknown keys are ignored. A `null` value is not a valid element shape. The
//! first failure aborts the whole decode; no partially built node escapes.

use super::atom::{Atom, Mappings};
use super::container::{Container, Frame, NavigableContainer, NavigableData, NavigableKind, Widget};
use super::{Component, ComponentType, Presentation, UriRef};
use serde_json::{Map, Value};
use std::fmt;

const TYPE_MEMBER: &str = "type";
const CHILDREN_MEMBER: &str = "components";

/// Errors that can occur while decoding a tagged tree
#[derive(Debug)]
pub enum DecodeError {
    /// Payload is not valid JSON
    Syntax(serde_json::Error),
    /// Tag missing (`None`) or not one of the known component types
    UnknownType(Option<String>),
    /// Node or field value has a shape that cannot be decoded (e.g. `null`)
    UnsupportedElementShape { field: String, found: &'static str },
    /// Value has a decodable shape but the wrong kind for the field
    InvalidValue {
        expected: &'static str,
        found: &'static str,
    },
    /// Child kind not allowed in its parent (atom in a frame, frame in a widget)
    MisplacedComponent {
        parent: ComponentType,
        child: ComponentType,
    },
    /// Root node tagged with a different shape than the one requested
    ShapeMismatch {
        expected: ComponentType,
        found: ComponentType,
    },
    /// Failure inside a field, propagated from the nested decode
    Field {
        field: String,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    fn in_field(field: impl Into<String>, source: DecodeError) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Innermost error, skipping field wrappers
    #[cfg(test)]
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "Malformed payload: {}", e),
            Self::UnknownType(None) => write!(f, "Missing component type"),
            Self::UnknownType(Some(tag)) => write!(f, "Unknown component type {:?}", tag),
            Self::UnsupportedElementShape { field, found } => {
                write!(f, "Unsupported element shape {} for {:?}", found, field)
            }
            Self::InvalidValue { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            Self::MisplacedComponent { parent, child } => {
                write!(f, "A {} cannot contain a {}", parent, child)
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "Expected a {} payload, found a {}", expected, found)
            }
            Self::Field { field, source } => write!(f, "{}: {}", field, source),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            Self::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Decode raw bytes into a navigable container of the expected shape
///
/// `expected` must be `Sitemap` or `Page`; any other tag is treated as `Page`.
pub fn decode_navigable_bytes(
    bytes: &[u8],
    expected: ComponentType,
) -> Result<NavigableContainer, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::Syntax)?;
    decode_navigable(&value, expected)
}

/// Decode a root node as a sitemap or page
///
/// The root may omit its tag, in which case `expected` is assumed.
pub fn decode_navigable(
    value: &Value,
    expected: ComponentType,
) -> Result<NavigableContainer, DecodeError> {
    let node = Node::new(value)?;
    if let Some(found) = node.tag_if_present()? {
        if found != expected {
            return Err(DecodeError::ShapeMismatch { expected, found });
        }
    }
    build_navigable(&node, expected)
}

/// Decode any node by its own tag
pub fn decode_component(value: &Value) -> Result<Component, DecodeError> {
    let node = Node::new(value)?;
    let tag = node.tag()?;

    let component = match tag {
        ComponentType::Sitemap | ComponentType::Page => {
            Component::Container(Container::Navigable(build_navigable(&node, tag)?))
        }
        ComponentType::Frame => Component::Container(Container::Frame(build_frame(&node)?)),
        ComponentType::Widget => Component::Container(Container::Widget(build_widget(&node)?)),
        ComponentType::Group => Component::Atom(Atom::Group(
            node.presentation()?,
            node.field("data", decode_uri)?,
        )),
        ComponentType::Icon => Component::Atom(Atom::Icon(
            node.presentation()?,
            node.field("data", decode_uri)?,
        )),
        ComponentType::Label => Component::Atom(Atom::Label(
            node.presentation()?,
            node.field("data", decode_text)?,
        )),
        ComponentType::Text => Component::Atom(Atom::Text(
            node.presentation()?,
            node.field("data", decode_text)?,
        )),
        ComponentType::Selection => Component::Atom(Atom::Selection(
            node.presentation()?,
            node.field("data", decode_mappings)?.unwrap_or_default(),
        )),
        ComponentType::Switch => Component::Atom(Atom::Switch(
            node.presentation()?,
            node.field("data", decode_mappings)?.unwrap_or_default(),
        )),
        ComponentType::Slider => Component::Atom(Atom::Slider(
            node.presentation()?,
            node.field("data", decode_number)?,
        )),
    };
    Ok(component)
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

fn build_navigable(node: &Node<'_>, tag: ComponentType) -> Result<NavigableContainer, DecodeError> {
    let (data, id) = node
        .field("data", decode_navigable_data)?
        .unwrap_or_default();
    let kind = match tag {
        ComponentType::Sitemap => NavigableKind::Sitemap { id },
        _ => NavigableKind::Page,
    };

    Ok(NavigableContainer {
        kind,
        presentation: node.presentation()?,
        data,
        components: node.containers(tag)?,
    })
}

fn build_frame(node: &Node<'_>) -> Result<Frame, DecodeError> {
    Ok(Frame {
        presentation: node.presentation()?,
        caption: node.field("data", decode_text)?,
        components: node.containers(ComponentType::Frame)?,
    })
}

fn build_widget(node: &Node<'_>) -> Result<Widget, DecodeError> {
    let atoms = node
        .field(CHILDREN_MEMBER, |v| {
            decode_children(v, |child| match child {
                Component::Atom(atom) => Ok(atom),
                Component::Container(c) => Err(DecodeError::MisplacedComponent {
                    parent: ComponentType::Widget,
                    child: c.component_type(),
                }),
            })
        })?
        .unwrap_or_default();

    // `data` is derived from the atoms, so any authored value is ignored
    Ok(Widget {
        presentation: node.presentation()?,
        components: atoms,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Node access
// ─────────────────────────────────────────────────────────────────────────────

/// Object node being decoded
struct Node<'a> {
    members: &'a Map<String, Value>,
}

impl<'a> Node<'a> {
    fn new(value: &'a Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(members) => Ok(Self { members }),
            other => Err(DecodeError::InvalidValue {
                expected: "component object",
                found: kind(other),
            }),
        }
    }

    fn tag_if_present(&self) -> Result<Option<ComponentType>, DecodeError> {
        match self.members.get(TYPE_MEMBER) {
            None => Ok(None),
            Some(Value::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|tag| DecodeError::UnknownType(Some(tag))),
            Some(other) => Err(DecodeError::UnknownType(Some(other.to_string()))),
        }
    }

    fn tag(&self) -> Result<ComponentType, DecodeError> {
        self.tag_if_present()?
            .ok_or(DecodeError::UnknownType(None))
    }

    /// Decode a field if present; failures are wrapped with the field name
    fn field<T>(
        &self,
        name: &str,
        decode: impl FnOnce(&Value) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        match self.members.get(name) {
            None => Ok(None),
            Some(Value::Null) => Err(DecodeError::UnsupportedElementShape {
                field: name.to_string(),
                found: "null",
            }),
            Some(value) => decode(value)
                .map(Some)
                .map_err(|e| DecodeError::in_field(name, e)),
        }
    }

    fn presentation(&self) -> Result<Presentation, DecodeError> {
        Ok(Presentation {
            layout: self.field("layout", decode_string)?,
            style: self.field("style", decode_string)?,
        })
    }

    /// Child list of a container that only holds containers
    fn containers(&self, parent: ComponentType) -> Result<Vec<Container>, DecodeError> {
        Ok(self
            .field(CHILDREN_MEMBER, |v| {
                decode_children(v, |child| match child {
                    Component::Container(c) => Ok(c),
                    Component::Atom(a) => Err(DecodeError::MisplacedComponent {
                        parent,
                        child: a.component_type(),
                    }),
                })
            })?
            .unwrap_or_default())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value decoders
// ─────────────────────────────────────────────────────────────────────────────

fn decode_children<T>(
    value: &Value,
    accept: impl Fn(Component) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let Value::Array(elements) = value else {
        return Err(DecodeError::InvalidValue {
            expected: "array",
            found: kind(value),
        });
    };

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            decode_component(element)
                .and_then(&accept)
                .map_err(|e| DecodeError::in_field(format!("[{}]", i), e))
        })
        .collect()
}

fn decode_string(value: &Value) -> Result<String, DecodeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(DecodeError::InvalidValue {
            expected: "string",
            found: kind(other),
        }),
    }
}

/// Display text; numbers and booleans are accepted and rendered as written
fn decode_text(value: &Value) -> Result<String, DecodeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(DecodeError::InvalidValue {
            expected: "text",
            found: kind(other),
        }),
    }
}

fn decode_uri(value: &Value) -> Result<UriRef, DecodeError> {
    decode_string(value).map(UriRef::new)
}

/// Number, also accepted as a numeric string
fn decode_number(value: &Value) -> Result<f64, DecodeError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or(DecodeError::InvalidValue {
        expected: "number",
        found: kind(value),
    })
}

fn decode_mappings(value: &Value) -> Result<Mappings, DecodeError> {
    let node = Node::new(value)?;
    let mappings: Vec<(String, String)> = node
        .field("mappings", |v| {
            let Value::Object(entries) = v else {
                return Err(DecodeError::InvalidValue {
                    expected: "object",
                    found: kind(v),
                });
            };
            entries
                .iter()
                .map(|(key, label)| {
                    decode_text(label)
                        .map(|label| (key.clone(), label))
                        .map_err(|e| DecodeError::in_field(key.clone(), e))
                })
                .collect()
        })?
        .unwrap_or_default();

    Ok(Mappings {
        mappings,
        selected: node.field("selected", decode_text)?,
    })
}

fn decode_navigable_data(value: &Value) -> Result<(NavigableData, Option<String>), DecodeError> {
    let node = Node::new(value)?;
    let data = NavigableData {
        uri: node.field("uri", decode_uri)?,
        label: node.field("label", decode_text)?,
        icon: node.field("icon", decode_uri)?,
    };
    Ok((data, node.field("id", decode_string)?))
}
