// Sitemap navigation handler
//
// sitemap:<...>       navigate to the container
// navigation:up       go back one level
// navigation:<other>  "Invalid URL"
// item:, thing:       not implemented yet, reported to the user
//
// Problems the user should see go through the notification handler; the
// caller still gets the error where one occurred.

use super::{NavigationHistory, NavigationSnapshot};
use crate::error::HandlerError;
use crate::notify::Notice;
use crate::scheme::registry::Handler;
use crate::scheme::{SchemeHandler, SchemeType};
use std::cell::RefCell;
use tokio::sync::watch;
use url::Url;

/// Handler for the SITEMAP category; owns the navigation history
pub struct SitemapHandler {
    history: RefCell<NavigationHistory>,
    notify: Handler<Notice>,
}

impl SitemapHandler {
    pub fn new(history: NavigationHistory, notify: Handler<Notice>) -> Self {
        Self {
            history: RefCell::new(history),
            notify,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.history.borrow().subscribe()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        self.history.borrow().snapshot()
    }

    fn notify(&self, message: &str) {
        if let Err(e) = self.notify.handle_text(message) {
            tracing::error!("Failed to show notification {:?}: {}", message, e);
        }
    }

    fn navigate(&self, uri: &Url) -> Result<NavigationSnapshot, HandlerError> {
        let target = hierarchical(uri)?;
        let result = self.history.borrow_mut().navigate_to(&target);
        if let Err(HandlerError::NotFound(_)) = &result {
            self.notify(&format!("Page not found: {}", target));
        }
        result
    }

    fn up(&self) -> Result<NavigationSnapshot, HandlerError> {
        let result = self.history.borrow_mut().back();
        match result {
            Err(HandlerError::InvalidOperation(message)) => {
                self.notify(&message);
                Ok(self.snapshot())
            }
            Err(HandlerError::NotFound(uri)) => {
                self.notify(&format!("Page not found: {}", uri));
                Err(HandlerError::NotFound(uri))
            }
            other => other,
        }
    }
}

/// `sitemap:<id>[/<path>]` → `sitemap://<id>/<path>`
///
/// Relative actions are resolved against the current URI, which needs an
/// authority and a path.
fn hierarchical(uri: &Url) -> Result<Url, HandlerError> {
    if !uri.cannot_be_a_base() {
        return Ok(uri.clone());
    }

    let (id, rest) = uri.path().split_once('/').unwrap_or((uri.path(), ""));
    let mut rewritten = format!("{}://{}/{}", uri.scheme(), id, rest);
    if let Some(query) = uri.query() {
        rewritten.push('?');
        rewritten.push_str(query);
    }
    Url::parse(&rewritten).map_err(|e| HandlerError::validation(uri, e.to_string()))
}

impl SchemeHandler for SitemapHandler {
    type Output = NavigationSnapshot;

    fn accepted_categories(&self) -> &'static [SchemeType] {
        &[SchemeType::Sitemap]
    }

    fn current_uri(&self) -> Result<Url, HandlerError> {
        self.history
            .borrow()
            .current_uri()
            .cloned()
            .ok_or_else(|| HandlerError::InvalidOperation("Nothing displayed yet".to_string()))
    }

    fn handle(&self, uri: &Url) -> Result<NavigationSnapshot, HandlerError> {
        self.validate(uri)?;

        match uri.scheme() {
            "sitemap" => return self.navigate(uri),
            "navigation" if uri.cannot_be_a_base() && uri.path() == "up" => return self.up(),
            "navigation" => self.notify(&format!("Invalid URL {}", uri)),
            scheme @ ("item" | "thing") => {
                self.notify(&format!("Implementation for \"{}\" scheme missing", scheme))
            }
            _ => self.notify(&format!("Unsupported scheme on URI {}", uri)),
        }
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Affordance;
    use crate::notify::tests::RecordingNotifier;
    use crate::notify::NotifyHandler;
    use crate::rendering::{MemoryStore, StoreRenderingModel};
    use std::rc::Rc;

    const ROOT: &str = r#"{
        "type": "sitemap",
        "data": {"label": "Demo"},
        "components": [
            {"type": "widget", "components": [
                {"type": "label", "data": "Kitchen"},
                {"type": "group", "data": "kitchen/"}
            ]}
        ]
    }"#;

    const KITCHEN: &str = r#"{"type": "page", "data": {"label": "Kitchen"}, "components": []}"#;

    fn setup() -> (SitemapHandler, Rc<RecordingNotifier>) {
        let store = MemoryStore::new()
            .with("sitemap/demo.json", ROOT.as_bytes().to_vec())
            .with("sitemap/demo/kitchen.json", KITCHEN.as_bytes().to_vec());
        let history = NavigationHistory::new(Rc::new(StoreRenderingModel::new(Rc::new(store))));

        let sink = Rc::new(RecordingNotifier::default());
        let notify: Handler<Notice> = Rc::new(NotifyHandler::new(sink.clone()));
        (SitemapHandler::new(history, notify), sink)
    }

    fn last_message(sink: &RecordingNotifier) -> String {
        sink.messages.borrow().last().cloned().unwrap_or_default()
    }

    #[test]
    fn test_sitemap_uri_navigates() {
        let (handler, sink) = setup();
        let snapshot = handler.handle_text("sitemap://demo").unwrap();
        assert_eq!(snapshot.title, "Demo");
        assert_eq!(snapshot.depth, 1);
        assert_eq!(handler.current_uri().unwrap().as_str(), "sitemap://demo/");
        assert!(sink.messages.borrow().is_empty());
    }

    #[test]
    fn test_opaque_sitemap_uri_becomes_hierarchical() {
        let (handler, _) = setup();
        handler.handle_text("sitemap:demo").unwrap();
        let current = handler.current_uri().unwrap();
        assert_eq!(current.as_str(), "sitemap://demo/");
        assert_eq!(
            current.join("kitchen/").unwrap().as_str(),
            "sitemap://demo/kitchen/"
        );
    }

    #[test]
    fn test_navigation_up_goes_back() {
        let (handler, _) = setup();
        handler.handle_text("sitemap://demo/").unwrap();
        handler.handle_text("sitemap://demo/kitchen/").unwrap();
        assert_eq!(handler.snapshot().affordance(), Affordance::Up);

        let snapshot = handler.handle_text("navigation:up").unwrap();
        assert_eq!(snapshot.depth, 1);
        assert_eq!(snapshot.title, "Demo");
        assert_eq!(snapshot.affordance(), Affordance::Menu);
    }

    #[test]
    fn test_navigation_up_at_root_is_reported() {
        let (handler, sink) = setup();
        handler.handle_text("sitemap://demo/").unwrap();

        let snapshot = handler.handle_text("navigation:up").unwrap();
        assert_eq!(snapshot.depth, 1);
        assert_eq!(last_message(&sink), "Already at the top level");
    }

    #[test]
    fn test_other_navigation_payload_is_invalid() {
        let (handler, sink) = setup();
        handler.handle_text("navigation:sideways").unwrap();
        assert_eq!(last_message(&sink), "Invalid URL navigation:sideways");
    }

    #[test]
    fn test_item_and_thing_are_not_implemented() {
        let (handler, sink) = setup();
        handler.handle_text("item:Kitchen_Light").unwrap();
        assert_eq!(
            last_message(&sink),
            "Implementation for \"item\" scheme missing"
        );
        handler.handle_text("thing:garage-door").unwrap();
        assert_eq!(
            last_message(&sink),
            "Implementation for \"thing\" scheme missing"
        );
    }

    #[test]
    fn test_missing_page_is_reported_and_state_kept() {
        let (handler, sink) = setup();
        handler.handle_text("sitemap://demo/").unwrap();

        let err = handler.handle_text("sitemap://demo/attic/").unwrap_err();
        assert!(matches!(err, HandlerError::NotFound(_)));
        assert_eq!(last_message(&sink), "Page not found: sitemap://demo/attic/");
        assert_eq!(handler.snapshot().depth, 1);
    }

    #[test]
    fn test_foreign_scheme_fails_validation() {
        let (handler, sink) = setup();
        let err = handler.handle_text("https://example.com").unwrap_err();
        assert!(matches!(err, HandlerError::Validation { .. }));
        assert!(sink.messages.borrow().is_empty());
    }

    #[test]
    fn test_current_uri_before_navigation() {
        let (handler, _) = setup();
        assert!(matches!(
            handler.current_uri(),
            Err(HandlerError::InvalidOperation(_))
        ));
    }
}
