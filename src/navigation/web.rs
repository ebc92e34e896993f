// External links (`http:`, `https:`) opened in the system browser

use crate::error::HandlerError;
use crate::scheme::{SchemeHandler, SchemeType};
use std::io;
use std::rc::Rc;
use url::Url;
use webbrowser::{Browser, BrowserOptions};

/// Something that can show a document outside the viewer
pub trait BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The user's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser {
    /// Resolve the browser without launching it
    dry_run: bool,
}

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut options = BrowserOptions::new();
        // Browser output would corrupt the terminal UI
        options.with_suppress_output(true).with_dry_run(self.dry_run);
        webbrowser::open_browser_with_options(Browser::Default, url, &options)
    }
}

/// Handler for the WEB category
pub struct WebHandler {
    opener: Rc<dyn BrowserOpener>,
}

impl WebHandler {
    pub fn new(opener: Rc<dyn BrowserOpener>) -> Self {
        Self { opener }
    }
}

impl SchemeHandler for WebHandler {
    type Output = ();

    fn accepted_categories(&self) -> &'static [SchemeType] {
        &[SchemeType::Web]
    }

    fn handle(&self, uri: &Url) -> Result<(), HandlerError> {
        self.validate(uri)?;
        tracing::info!("Opening {} in browser", uri);
        self.opener.open(uri.as_str())?;
        Ok(())
    }
}
