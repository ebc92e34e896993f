//! Handler registry: one handler per scheme category
//!
//! The registry is built once at startup and passed to whoever needs to route
//! URIs. Each category is a marker type implementing [`Category`], which fixes
//! the handler's result type at compile time:
//!
//! ```text
//! SitemapScheme  → NavigationSnapshot
//! IconScheme     → Option<Vec<u8>>
//! WebScheme      → ()
//! NotifyScheme   → Notice
//! ```
//!
//! Lookups by a runtime scheme string go through [`HandlerRegistry::resolve_for_scheme`],
//! which returns a [`Route`] tagged with the category it resolved to.

use super::{classify, SchemeHandler, SchemeType};
use crate::error::HandlerError;
use crate::navigation::NavigationSnapshot;
use crate::notify::Notice;
use std::rc::Rc;
use url::Url;

/// Shared handle to a handler producing `T`
pub type Handler<T> = Rc<dyn SchemeHandler<Output = T>>;

/// Compile-time binding between a scheme category and its result type
pub trait Category {
    const SCHEME_TYPE: SchemeType;
    type Output: 'static;

    fn slot(registry: &HandlerRegistry) -> &Option<Handler<Self::Output>>;
    fn slot_mut(registry: &mut HandlerRegistry) -> &mut Option<Handler<Self::Output>>;
}

/// Sitemap navigation (`sitemap:`, `navigation:`, `item:`, `thing:`)
pub struct SitemapScheme;
/// Icon lookup (`icon:`)
pub struct IconScheme;
/// External links (`http:`, `https:`)
pub struct WebScheme;
/// Transient notifications (`snackbar:`)
pub struct NotifyScheme;

impl Category for SitemapScheme {
    const SCHEME_TYPE: SchemeType = SchemeType::Sitemap;
    type Output = NavigationSnapshot;

    fn slot(registry: &HandlerRegistry) -> &Option<Handler<Self::Output>> {
        &registry.sitemap
    }
    fn slot_mut(registry: &mut HandlerRegistry) -> &mut Option<Handler<Self::Output>> {
        &mut registry.sitemap
    }
}

impl Category for IconScheme {
    const SCHEME_TYPE: SchemeType = SchemeType::Icon;
    type Output = Option<Vec<u8>>;

    fn slot(registry: &HandlerRegistry) -> &Option<Handler<Self::Output>> {
        &registry.icon
    }
    fn slot_mut(registry: &mut HandlerRegistry) -> &mut Option<Handler<Self::Output>> {
        &mut registry.icon
    }
}

impl Category for WebScheme {
    const SCHEME_TYPE: SchemeType = SchemeType::Web;
    type Output = ();

    fn slot(registry: &HandlerRegistry) -> &Option<Handler<Self::Output>> {
        &registry.web
    }
    fn slot_mut(registry: &mut HandlerRegistry) -> &mut Option<Handler<Self::Output>> {
        &mut registry.web
    }
}

impl Category for NotifyScheme {
    const SCHEME_TYPE: SchemeType = SchemeType::Notify;
    type Output = Notice;

    fn slot(registry: &HandlerRegistry) -> &Option<Handler<Self::Output>> {
        &registry.notify
    }
    fn slot_mut(registry: &mut HandlerRegistry) -> &mut Option<Handler<Self::Output>> {
        &mut registry.notify
    }
}

/// Category → handler table
#[derive(Default)]
pub struct HandlerRegistry {
    sitemap: Option<Handler<NavigationSnapshot>>,
    icon: Option<Handler<Option<Vec<u8>>>>,
    web: Option<Handler<()>>,
    notify: Option<Handler<Notice>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for category `C`, replacing any previous one
    ///
    /// A handler declaring several categories is registered once per
    /// category. Registering it under a category it does not declare is a
    /// wiring bug and fails.
    pub fn register<C: Category>(
        &mut self,
        handler: Handler<C::Output>,
    ) -> Result<(), HandlerError> {
        if !handler.accepted_categories().contains(&C::SCHEME_TYPE) {
            return Err(HandlerError::Configuration(format!(
                "Handler does not accept input type {}",
                C::SCHEME_TYPE
            )));
        }

        let slot = C::slot_mut(self);
        if slot.is_some() {
            tracing::debug!("Replacing handler for {}", C::SCHEME_TYPE);
        } else {
            tracing::debug!("Registered handler for {}", C::SCHEME_TYPE);
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Typed lookup for category `C`
    pub fn resolve<C: Category>(&self) -> Result<Handler<C::Output>, HandlerError> {
        C::slot(self)
            .clone()
            .ok_or_else(|| HandlerError::not_registered(C::SCHEME_TYPE))
    }

    /// Whether any handler is registered for the category
    pub fn is_registered(&self, category: SchemeType) -> bool {
        match category {
            SchemeType::Sitemap => self.sitemap.is_some(),
            SchemeType::Icon => self.icon.is_some(),
            SchemeType::Web => self.web.is_some(),
            SchemeType::Notify => self.notify.is_some(),
            SchemeType::Unsupported | SchemeType::Unknown => false,
        }
    }

    /// Look up the handler for a literal scheme
    pub fn resolve_for_scheme(&self, scheme: &str) -> Result<Route, HandlerError> {
        match classify(scheme) {
            SchemeType::Sitemap => self.resolve::<SitemapScheme>().map(Route::Sitemap),
            SchemeType::Icon => self.resolve::<IconScheme>().map(Route::Icon),
            SchemeType::Web => self.resolve::<WebScheme>().map(Route::Web),
            SchemeType::Notify => self.resolve::<NotifyScheme>().map(Route::Notify),
            other => Err(HandlerError::not_registered(other)),
        }
    }

    /// Route a URI to its handler and act on it
    pub fn dispatch(&self, uri: &Url) -> Result<Dispatched, HandlerError> {
        tracing::debug!("Dispatching {}", uri);
        self.resolve_for_scheme(uri.scheme())?.handle(uri)
    }

    /// Route raw input by its scheme and let the handler parse it
    pub fn dispatch_text(&self, input: &str) -> Result<Dispatched, HandlerError> {
        let scheme = Url::parse(input)
            .map_err(|e| HandlerError::validation(input, e.to_string()))?
            .scheme()
            .to_string();
        tracing::debug!("Dispatching {:?}", input);
        self.resolve_for_scheme(&scheme)?.handle_text(input)
    }
}

/// A handler resolved from a runtime scheme, tagged with its category
#[derive(Clone)]
pub enum Route {
    Sitemap(Handler<NavigationSnapshot>),
    Icon(Handler<Option<Vec<u8>>>),
    Web(Handler<()>),
    Notify(Handler<Notice>),
}

impl Route {
    #[cfg(test)]
    pub fn category(&self) -> SchemeType {
        match self {
            Route::Sitemap(_) => SchemeType::Sitemap,
            Route::Icon(_) => SchemeType::Icon,
            Route::Web(_) => SchemeType::Web,
            Route::Notify(_) => SchemeType::Notify,
        }
    }

    pub fn handle(&self, uri: &Url) -> Result<Dispatched, HandlerError> {
        Ok(match self {
            Route::Sitemap(h) => Dispatched::Navigation(h.handle(uri)?),
            Route::Icon(h) => Dispatched::Icon(h.handle(uri)?),
            Route::Web(h) => {
                h.handle(uri)?;
                Dispatched::Opened
            }
            Route::Notify(h) => Dispatched::Notified(h.handle(uri)?),
        })
    }

    pub fn handle_text(&self, input: &str) -> Result<Dispatched, HandlerError> {
        Ok(match self {
            Route::Sitemap(h) => Dispatched::Navigation(h.handle_text(input)?),
            Route::Icon(h) => Dispatched::Icon(h.handle_text(input)?),
            Route::Web(h) => {
                h.handle_text(input)?;
                Dispatched::Opened
            }
            Route::Notify(h) => Dispatched::Notified(h.handle_text(input)?),
        })
    }

    pub fn current_uri(&self) -> Result<Url, HandlerError> {
        match self {
            Route::Sitemap(h) => h.current_uri(),
            Route::Icon(h) => h.current_uri(),
            Route::Web(h) => h.current_uri(),
            Route::Notify(h) => h.current_uri(),
        }
    }
}

/// Result of a dynamically routed URI
#[derive(Debug)]
pub enum Dispatched {
    Navigation(NavigationSnapshot),
    Icon(Option<Vec<u8>>),
    Opened,
    Notified(Notice),
}
