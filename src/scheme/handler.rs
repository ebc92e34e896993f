//! Scheme handler contract
//!
//! A handler owns one or more scheme categories and knows how to act on URIs
//! in them. Every `handle` implementation validates first, then acts.

use super::{classify, SchemeType};
use crate::error::HandlerError;
use url::Url;

/// Handler for the URIs of one or more scheme categories
///
/// `Output` is the result of acting on a URI; it is fixed per handler and the
/// registry binds it to the category at compile time.
pub trait SchemeHandler {
    type Output;

    /// Categories this handler is responsible for (non-empty)
    fn accepted_categories(&self) -> &'static [SchemeType];

    /// Act on a URI
    fn handle(&self, uri: &Url) -> Result<Self::Output, HandlerError>;

    /// Whether the given scheme belongs to one of the accepted categories
    fn accepts(&self, scheme: &str) -> bool {
        self.accepted_categories().contains(&classify(scheme))
    }

    /// Fail unless the URI's scheme classifies into an accepted category
    fn validate(&self, uri: &Url) -> Result<(), HandlerError> {
        if self.accepts(uri.scheme()) {
            Ok(())
        } else {
            Err(HandlerError::validation(
                uri,
                format!("scheme {:?} not accepted here", uri.scheme()),
            ))
        }
    }

    /// Turn raw input into a URI for this handler
    fn parse(&self, input: &str) -> Result<Url, HandlerError> {
        Url::parse(input).map_err(|e| HandlerError::validation(input, e.to_string()))
    }

    /// URI currently associated with the handler; stateful handlers only
    fn current_uri(&self) -> Result<Url, HandlerError> {
        Err(HandlerError::UnsupportedOperation(format!(
            "current_uri() not implemented for {} handler",
            self.accepted_categories()
                .first()
                .map(SchemeType::as_str)
                .unwrap_or("unnamed")
        )))
    }

    /// Parse raw input and handle it
    ///
    /// A hierarchical URI with an empty path is pointed at its root (`/`).
    fn handle_text(&self, input: &str) -> Result<Self::Output, HandlerError> {
        let mut uri = self.parse(input)?;
        if !uri.cannot_be_a_base() && uri.path().is_empty() {
            uri.set_path("/");
        }
        self.handle(&uri)
    }
}
