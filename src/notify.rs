// Transient notifications (`snackbar:<message>`)
//
// The message is the scheme-specific part of the URI. Input that already is a
// `snackbar:` URI is parsed as one; any other text handed to `handle_text` is
// the message itself and is percent-encoded first so spaces, `#` and `?`
// survive parsing and come back unchanged.

use crate::error::HandlerError;
use crate::scheme::{SchemeHandler, SchemeType};
use std::rc::Rc;
use url::Url;

const SCHEME: &str = "snackbar";

/// A message queued for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sink that shows notices to the user
pub trait Notifier {
    fn enqueue(&self, notice: Notice);
}

/// Prints notices to stdout (headless mode)
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn enqueue(&self, notice: Notice) {
        println!("  » {}", notice.message);
    }
}

/// Handler for the NOTIFY category
pub struct NotifyHandler {
    sink: Rc<dyn Notifier>,
}

impl NotifyHandler {
    pub fn new(sink: Rc<dyn Notifier>) -> Self {
        Self { sink }
    }
}

impl SchemeHandler for NotifyHandler {
    type Output = Notice;

    fn accepted_categories(&self) -> &'static [SchemeType] {
        &[SchemeType::Notify]
    }

    /// `snackbar:` URIs as they are, free text as `snackbar:<percent-encoded text>`
    fn parse(&self, input: &str) -> Result<Url, HandlerError> {
        let uri = match input.strip_prefix(SCHEME).and_then(|rest| rest.strip_prefix(':')) {
            Some(_) => input.to_string(),
            None => format!("{}:{}", SCHEME, urlencoding::encode(input)),
        };
        Url::parse(&uri).map_err(|e| HandlerError::validation(input, e.to_string()))
    }

    fn handle(&self, uri: &Url) -> Result<Notice, HandlerError> {
        self.validate(uri)?;

        let raw = match uri.query() {
            Some(query) => format!("{}?{}", uri.path(), query),
            None => uri.path().to_string(),
        };
        let message = urlencoding::decode(&raw)
            .map_err(|e| HandlerError::validation(uri, e.to_string()))?
            .into_owned();

        let notice = Notice::new(message);
        tracing::info!("Notification: {}", notice.message);
        self.sink.enqueue(notice.clone());
        Ok(notice)
    }
}
