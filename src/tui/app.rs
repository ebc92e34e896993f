// TUI application state
//
// Holds the snapshot being displayed, the list selection and the toast queue.
// Input never navigates directly: activating a row schedules a deferred
// dispatch that the event loop runs on its next turn.

use super::components::sitemap_list::{describe, SitemapList};
use super::components::toast::ToastQueue;
use super::deferred::{Deferred, Scheduler};
use super::theme::Palette;
use super::traits::Interactive;
use crate::error::HandlerError;
use crate::logging::LogBuffer;
use crate::model::{Container, UriRef};
use crate::navigation::{Affordance, NavigationSnapshot};
use crate::scheme::registry::{Dispatched, IconScheme, NotifyScheme, SitemapScheme};
use crate::scheme::{classify, HandlerRegistry, SchemeHandler, SchemeType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::rc::Rc;

pub const DRAWER_MISSING: &str = "Drawer not implemented yet";
pub const MENU_MISSING: &str = "Menu not implemented yet";

pub struct App {
    registry: Rc<HandlerRegistry>,
    scheduler: Scheduler,
    pub toasts: Rc<ToastQueue>,
    pub log_buffer: LogBuffer,
    pub palette: Palette,
    pub snapshot: NavigationSnapshot,
    pub list: SitemapList,
    /// Icon reference → whether the icon handler found an image
    icons: HashMap<String, bool>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        registry: Rc<HandlerRegistry>,
        scheduler: Scheduler,
        toasts: Rc<ToastQueue>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            registry,
            scheduler,
            toasts,
            log_buffer,
            palette: Palette::default(),
            snapshot: NavigationSnapshot::default(),
            list: SitemapList::default(),
            icons: HashMap::new(),
            should_quit: false,
        }
    }

    /// Display a new snapshot
    pub fn show(&mut self, snapshot: NavigationSnapshot) {
        tracing::debug!("Showing {:?} (depth {})", snapshot.title, snapshot.depth);
        self.snapshot = snapshot;
        self.list.reset(self.rows().len());
        self.refresh_icons();
    }

    /// Rows of the displayed container, empty before the first load
    pub fn rows(&self) -> Vec<&Container> {
        self.snapshot
            .model
            .as_deref()
            .map(|model| model.rows())
            .unwrap_or_default()
    }

    pub fn icon_available(&self, icon: &UriRef) -> bool {
        self.icons.get(icon.as_str()).copied().unwrap_or(false)
    }

    fn refresh_icons(&mut self) {
        let references: Vec<UriRef> = self
            .rows()
            .into_iter()
            .filter_map(|row| describe(row).icon.cloned())
            .collect();

        self.icons.clear();
        let Ok(handler) = self.registry.resolve::<IconScheme>() else {
            return;
        };
        for reference in references {
            let found = self
                .resolve(&reference)
                .and_then(|uri| handler.handle(&uri))
                .map(|image| image.is_some())
                .unwrap_or_else(|e| {
                    tracing::debug!("Icon {}: {}", reference, e);
                    false
                });
            self.icons.insert(reference.as_str().to_string(), found);
        }
    }

    /// Resolve a reference against the URI of the displayed container
    fn resolve(&self, reference: &UriRef) -> Result<url::Url, HandlerError> {
        let base = self.registry.resolve::<SitemapScheme>()?.current_uri()?;
        reference
            .resolve(&base)
            .map_err(|e| HandlerError::validation(reference, e.to_string()))
    }

    pub fn on_tick(&mut self) {
        self.toasts.tick();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.list.handle_key(key).was_handled() {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('u') => {
                self.go_up()
            }
            KeyCode::Char('m') => self.notify(MENU_MISSING),
            _ => {}
        }
    }

    /// Schedule the action of the selected row
    pub fn activate(&mut self) {
        let target = match self.rows().get(self.list.selected) {
            Some(Container::Widget(widget)) => widget.data().cloned(),
            Some(Container::Navigable(nav)) => nav.data.uri.clone(),
            Some(Container::Frame(_)) | None => None,
        };
        let Some(target) = target else {
            return;
        };

        match self.resolve(&target) {
            Ok(uri) => self.scheduler.schedule(Deferred::Dispatch(uri)),
            Err(e) => tracing::error!("Cannot act on {}: {}", target, e),
        }
    }

    /// App bar navigation button
    pub fn go_up(&mut self) {
        match self.snapshot.affordance() {
            Affordance::Up => self
                .scheduler
                .schedule(Deferred::DispatchText("navigation:up".to_string())),
            Affordance::Menu => self.notify(DRAWER_MISSING),
        }
    }

    /// Show a message through the NOTIFY handler
    pub fn notify(&self, message: &str) {
        let result = self
            .registry
            .resolve::<NotifyScheme>()
            .and_then(|handler| handler.handle_text(message));
        if let Err(e) = result {
            tracing::warn!("Dropped notification {:?}: {}", message, e);
        }
    }

    /// Run one deferred task
    ///
    /// Navigation results reach the view through the snapshot channel, so
    /// only failures are handled here.
    pub fn run_deferred(&mut self, task: Deferred) {
        let target = match &task {
            Deferred::Dispatch(uri) => uri.to_string(),
            Deferred::DispatchText(input) => input.clone(),
        };
        let scheme = target.split(':').next().unwrap_or_default();
        if matches!(classify(scheme), SchemeType::Unsupported | SchemeType::Unknown) {
            self.notify(&format!("Unsupported scheme on URI {}", target));
            return;
        }

        let result = match task {
            Deferred::Dispatch(uri) => self.registry.dispatch(&uri),
            Deferred::DispatchText(input) => self.registry.dispatch_text(&input),
        };
        match result {
            Ok(Dispatched::Opened) => tracing::info!("Opened {}", target),
            Ok(_) => {}
            Err(e) if e.is_user_visible() => tracing::debug!("{}: {}", target, e),
            Err(e) => tracing::error!("{}: {}", target, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::navigation::BrowserOpener;
    use crate::rendering::bundled_store;
    use crate::startup::{build_services, load_initial, Services};
    use crate::tui::deferred::TaskQueue;
    use std::cell::RefCell;
    use std::io;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl BrowserOpener for RecordingOpener {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct Harness {
        app: App,
        services: Services,
        tasks: TaskQueue,
        opener: Rc<RecordingOpener>,
    }

    impl Harness {
        fn new() -> Self {
            let toasts = Rc::new(ToastQueue::new(Duration::from_secs(60)));
            let opener = Rc::new(RecordingOpener::default());
            let services = build_services(
                &Config::default(),
                Rc::new(bundled_store()),
                toasts.clone(),
                opener.clone(),
            )
            .unwrap();
            load_initial(&services.registry, "sitemap://demo/").unwrap();

            let (scheduler, tasks) = TaskQueue::new();
            let mut app = App::new(
                services.registry.clone(),
                scheduler,
                toasts,
                LogBuffer::new(),
            );
            app.show(services.updates.borrow().clone());
            Self {
                app,
                services,
                tasks,
                opener,
            }
        }

        /// Activate row `index` and run whatever it scheduled
        fn click(&mut self, index: usize) {
            self.app.list.selected = index;
            self.app.activate();
            while let Some(task) = self.tasks.try_next() {
                self.app.run_deferred(task);
            }
            self.app.show(self.services.updates.borrow().clone());
        }

        fn toast(&self) -> Option<String> {
            self.app.toasts.current()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_activation_is_deferred() {
        let mut h = Harness::new();
        h.app.list.selected = 1;
        h.app.activate();

        assert_eq!(h.services.updates.borrow().depth, 1);
        let task = h.tasks.try_next().unwrap();
        assert_eq!(
            task,
            Deferred::Dispatch(url::Url::parse("sitemap://demo/kitchen/").unwrap())
        );

        h.app.run_deferred(task);
        assert_eq!(h.services.updates.borrow().depth, 2);
        assert_eq!(h.services.updates.borrow().title, "Kitchen");
    }

    #[test]
    fn test_frame_rows_do_nothing() {
        let mut h = Harness::new();
        h.app.list.selected = 0;
        h.app.activate();
        assert!(h.tasks.try_next().is_none());
    }

    #[test]
    fn test_up_at_root_opens_missing_drawer() {
        let mut h = Harness::new();
        h.app.handle_key(key(KeyCode::Backspace));
        assert!(h.tasks.try_next().is_none());
        assert_eq!(h.toast().as_deref(), Some(DRAWER_MISSING));
    }

    #[test]
    fn test_up_after_navigation_goes_back() {
        let mut h = Harness::new();
        h.click(1);
        assert_eq!(h.app.snapshot.affordance(), Affordance::Up);

        h.app.handle_key(key(KeyCode::Left));
        let task = h.tasks.try_next().unwrap();
        assert_eq!(task, Deferred::DispatchText("navigation:up".to_string()));
        h.app.run_deferred(task);
        h.app.show(h.services.updates.borrow().clone());

        assert_eq!(h.app.snapshot.title, "Demo House");
        assert_eq!(h.app.snapshot.depth, 1);
    }

    #[test]
    fn test_menu_key_notifies() {
        let mut h = Harness::new();
        h.app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(h.toast().as_deref(), Some(MENU_MISSING));
    }

    #[test]
    fn test_web_row_opens_browser() {
        let mut h = Harness::new();
        h.click(6);
        assert_eq!(
            h.opener.opened.borrow().as_slice(),
            ["https://www.openhab.org/"]
        );
        assert_eq!(h.app.snapshot.depth, 1);
    }

    #[test]
    fn test_snackbar_row_shows_message() {
        let mut h = Harness::new();
        h.click(7);
        assert_eq!(h.toast().as_deref(), Some("Hello from the demo house"));
    }

    #[test]
    fn test_thing_row_reports_missing_scheme() {
        let mut h = Harness::new();
        h.click(8);
        assert_eq!(
            h.toast().as_deref(),
            Some("Implementation for \"thing\" scheme missing")
        );
    }

    #[test]
    fn test_mailto_row_is_unsupported() {
        let mut h = Harness::new();
        h.click(9);
        assert_eq!(
            h.toast().as_deref(),
            Some("Unsupported scheme on URI mailto:caretaker@example.org")
        );
    }

    #[test]
    fn test_missing_page_keeps_current_view() {
        let mut h = Harness::new();
        h.click(1);
        h.click(3);
        assert_eq!(
            h.toast().as_deref(),
            Some("Page not found: sitemap://demo/kitchen/pantry/")
        );
        assert_eq!(h.app.snapshot.title, "Kitchen");
    }

    #[test]
    fn test_bundled_icons_are_found() {
        let h = Harness::new();
        assert!(h.app.icon_available(&UriRef::new("icon:kitchen")));
        assert!(!h.app.icon_available(&UriRef::new("icon:garage")));
    }

    #[test]
    fn test_quit_keys() {
        let mut h = Harness::new();
        h.app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(h.app.should_quit);
    }
}
