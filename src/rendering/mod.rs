//! Rendering model retrieval
//!
//! Maps a sitemap URI to a stored payload and decodes it. The URI authority is
//! the sitemap id and the path selects the container:
//!
//! ```text
//! sitemap://demo/          → sitemap/demo.json          (Sitemap)
//! sitemap://demo/kitchen/  → sitemap/demo/kitchen.json  (Page)
//! sitemap:demo/kitchen     → sitemap/demo/kitchen.json  (Page)
//! ```
//!
//! Id and path are percent-decoded before they become a store key.

pub mod store;

pub use store::{bundled_store, DirectoryStore, LayeredStore, MemoryStore, ResourceStore};

use crate::error::HandlerError;
use crate::model::decode::decode_navigable_bytes;
use crate::model::{ComponentType, NavigableContainer};
use std::rc::Rc;
use url::Url;

/// Source of navigable containers
pub trait RenderingModelProvider {
    /// Fetch and decode the container a URI points at
    ///
    /// A missing resource is `NotFound`; decode failures propagate unchanged.
    fn retrieve(&self, uri: &Url) -> Result<NavigableContainer, HandlerError>;
}

/// Where a URI's payload lives and which root shape it must have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    pub path: String,
    pub shape: ComponentType,
}

impl ResourceAddress {
    pub fn for_uri(uri: &Url) -> Result<Self, HandlerError> {
        let (id, path) = if uri.cannot_be_a_base() {
            // sitemap:<id>[/<path>]
            match uri.path().split_once('/') {
                Some((id, rest)) => (id.to_string(), format!("/{}", rest)),
                None => (uri.path().to_string(), "/".to_string()),
            }
        } else {
            let id = uri.host_str().unwrap_or_default().to_string();
            let path = match uri.path() {
                "" => "/".to_string(),
                p => p.to_string(),
            };
            (id, path)
        };
        // Store keys are plain file names, the URI keeps them percent-encoded
        let id = decode_component(uri, &id)?;
        let path = decode_component(uri, &path)?;

        if id.is_empty() {
            return Err(HandlerError::validation(uri, "missing sitemap id"));
        }

        let shape = if path == "/" {
            ComponentType::Sitemap
        } else {
            ComponentType::Page
        };
        let file = match path.strip_suffix('/') {
            Some(stem) => format!("{}.json", stem),
            None => format!("{}.json", path),
        };

        Ok(Self {
            path: format!("{}/{}{}", uri.scheme(), id, file),
            shape,
        })
    }
}

fn decode_component(uri: &Url, encoded: &str) -> Result<String, HandlerError> {
    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| HandlerError::validation(uri, format!("invalid percent-encoding: {}", e)))
}

/// Provider backed by a [`ResourceStore`]
#[derive(Clone)]
pub struct StoreRenderingModel {
    store: Rc<dyn ResourceStore>,
}

impl StoreRenderingModel {
    pub fn new(store: Rc<dyn ResourceStore>) -> Self {
        Self { store }
    }
}

impl RenderingModelProvider for StoreRenderingModel {
    fn retrieve(&self, uri: &Url) -> Result<NavigableContainer, HandlerError> {
        let address = ResourceAddress::for_uri(uri)?;

        let Some(bytes) = self.store.open(&address.path)? else {
            tracing::debug!("No resource at {} for {}", address.path, uri);
            return Err(HandlerError::NotFound(uri.to_string()));
        };

        match decode_navigable_bytes(&bytes, address.shape) {
            Ok(container) => {
                tracing::debug!(
                    "Loaded {} {} ({} components)",
                    address.shape,
                    address.path,
                    container.components.len()
                );
                Ok(container)
            }
            Err(e) => {
                tracing::error!("Failed to decode {}: {}", address.path, e);
                Err(e.into())
            }
        }
    }
}
