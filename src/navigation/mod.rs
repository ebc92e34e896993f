//! Navigation history
//!
//! A stack of visited sitemap URIs. The top of the stack is the container on
//! screen; every successful navigation publishes a [`NavigationSnapshot`] on a
//! `watch` channel so the view, the title and the app bar update together.
//!
//! ```text
//! navigate_to(u):  retrieve(u) ── NotFound ──▶ unchanged
//!                      │
//!                      ▼
//!                  push u, publish
//!
//! back():          depth ≤ 1 ──▶ InvalidOperation
//!                  pop current, pop previous, navigate_to(previous)
//! ```

pub mod sitemap_handler;
pub mod web;

pub use sitemap_handler::SitemapHandler;
pub use web::{BrowserOpener, SystemBrowser, WebHandler};

use crate::error::HandlerError;
use crate::model::NavigableContainer;
use crate::rendering::RenderingModelProvider;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

/// App bar affordance for the current depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// At the root: menu/drawer
    Menu,
    /// Below the root: go up one level
    Up,
}

/// Published state after each successful navigation
#[derive(Debug, Clone, Default)]
pub struct NavigationSnapshot {
    pub uri: Option<Url>,
    pub title: String,
    pub depth: usize,
    pub model: Option<Arc<NavigableContainer>>,
}

impl NavigationSnapshot {
    pub fn affordance(&self) -> Affordance {
        if self.depth <= 1 {
            Affordance::Menu
        } else {
            Affordance::Up
        }
    }
}

/// Stack of visited URIs plus the observer channel
pub struct NavigationHistory {
    provider: Rc<dyn RenderingModelProvider>,
    stack: Vec<Url>,
    updates: watch::Sender<NavigationSnapshot>,
}

impl NavigationHistory {
    pub fn new(provider: Rc<dyn RenderingModelProvider>) -> Self {
        let (updates, _) = watch::channel(NavigationSnapshot::default());
        Self {
            provider,
            stack: Vec::new(),
            updates,
        }
    }

    /// Observe every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.updates.subscribe()
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.updates.borrow().clone()
    }

    pub fn current_uri(&self) -> Option<&Url> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn title(&self) -> String {
        self.updates.borrow().title.clone()
    }

    /// Fetch `uri`, push it and publish the new container
    ///
    /// On failure nothing changes. Revisiting a URI already on the stack
    /// pushes another entry.
    pub fn navigate_to(&mut self, uri: &Url) -> Result<NavigationSnapshot, HandlerError> {
        let model = self.provider.retrieve(uri)?;

        self.stack.push(uri.clone());
        let snapshot = NavigationSnapshot {
            uri: Some(uri.clone()),
            title: model.label().to_string(),
            depth: self.stack.len(),
            model: Some(Arc::new(model)),
        };
        tracing::info!("Navigated to {} (depth {})", uri, snapshot.depth);
        self.updates.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Return to the previous entry, fetching it again
    pub fn back(&mut self) -> Result<NavigationSnapshot, HandlerError> {
        if self.stack.len() <= 1 {
            return Err(HandlerError::InvalidOperation(
                "Already at the top level".to_string(),
            ));
        }

        let saved = self.stack.clone();
        let previous = saved[saved.len() - 2].clone();
        self.stack.truncate(saved.len() - 2);

        match self.navigate_to(&previous) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!("Going back to {} failed: {}", previous, e);
                self.stack = saved;
                Err(e)
            }
        }
    }
}
