// Startup module - service wiring and startup banner
//
// Handlers are registered in dependency order: NOTIFY first, because the
// sitemap handler resolves it from the registry to report problems.

use crate::config::{Config, VERSION};
use crate::error::HandlerError;
use crate::icon::IconHandler;
use crate::navigation::{
    BrowserOpener, NavigationHistory, NavigationSnapshot, SitemapHandler, WebHandler,
};
use crate::notify::{Notifier, NotifyHandler};
use crate::rendering::{
    bundled_store, DirectoryStore, LayeredStore, ResourceStore, StoreRenderingModel,
};
use crate::scheme::registry::{Dispatched, IconScheme, NotifyScheme, SitemapScheme, WebScheme};
use crate::scheme::{HandlerRegistry, SchemeType};
use crate::tui::components::sitemap_list::describe;
use std::rc::Rc;
use tokio::sync::watch;
use url::Url;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
}

/// Everything the view layer needs after startup
pub struct Services {
    pub registry: Rc<HandlerRegistry>,
    pub updates: watch::Receiver<NavigationSnapshot>,
}

/// Configured resource directory (if any) layered over the bundled demo
pub fn build_store(config: &Config) -> Rc<dyn ResourceStore> {
    let mut store = LayeredStore::new();
    if let Some(dir) = &config.resources {
        tracing::info!("Resources: {}", dir.display());
        store = store.push(DirectoryStore::new(dir));
    }
    Rc::new(store.push(bundled_store()))
}

/// Construct and register all scheme handlers
pub fn build_services(
    config: &Config,
    store: Rc<dyn ResourceStore>,
    notifier: Rc<dyn Notifier>,
    opener: Rc<dyn BrowserOpener>,
) -> Result<Services, HandlerError> {
    let mut registry = HandlerRegistry::new();

    registry.register::<NotifyScheme>(Rc::new(NotifyHandler::new(notifier)))?;
    registry.register::<IconScheme>(Rc::new(IconHandler::with_default_set(
        store.clone(),
        config.icons.default_set.clone(),
    )))?;
    registry.register::<WebScheme>(Rc::new(WebHandler::new(opener)))?;

    let history = NavigationHistory::new(Rc::new(StoreRenderingModel::new(store)));
    let sitemap = SitemapHandler::new(history, registry.resolve::<NotifyScheme>()?);
    let updates = sitemap.subscribe();
    registry.register::<SitemapScheme>(Rc::new(sitemap))?;

    for category in SchemeType::all() {
        tracing::debug!(
            "{:<11} {}",
            category.as_str(),
            if registry.is_registered(*category) {
                "registered"
            } else {
                "no handler"
            }
        );
    }

    Ok(Services {
        registry: Rc::new(registry),
        updates,
    })
}

/// Route the startup URI like any other input
pub fn load_initial(registry: &HandlerRegistry, input: &str) -> Result<Dispatched, HandlerError> {
    tracing::info!("Initial URI: {}", input);
    registry.dispatch_text(input)
}

/// Print the startup banner (headless mode, before any output)
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}Sitemap Viewer{RESET} {DIM}v{VERSION}{RESET}");
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!("  {DIM}Loading{RESET} {BOLD}{}{RESET}", config.load);
    println!();
}

/// Plain-text rendering of a snapshot (headless mode)
pub fn print_page(snapshot: &NavigationSnapshot) {
    use colors::*;

    let uri = snapshot.uri.as_ref().map(Url::as_str).unwrap_or_default();
    println!("  {BOLD}{}{RESET} {DIM}{}{RESET}", snapshot.title, uri);
    let Some(model) = &snapshot.model else {
        return;
    };
    for row in model.rows() {
        let text = describe(row);
        if text.is_caption {
            println!();
            println!("  {CYAN}{}{RESET}", text.left);
        } else if text.right.is_empty() {
            println!("    {}", text.left);
        } else {
            println!("    {:<32} {GREEN}{}{RESET}", text.left, text.right);
        }
    }
    println!();
}

/// Startup messages for the TUI log buffer
pub fn log_startup(config: &Config) {
    tracing::info!("Sitemap Viewer v{}", VERSION);
    tracing::info!("Loading {}", config.load);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::rendering::MemoryStore;
    use std::io;

    struct NoBrowser;

    impl BrowserOpener for NoBrowser {
        fn open(&self, _url: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no browser in tests"))
        }
    }

    fn services(store: Rc<dyn ResourceStore>) -> (Services, Rc<RecordingNotifier>) {
        let sink = Rc::new(RecordingNotifier::default());
        let services =
            build_services(&Config::default(), store, sink.clone(), Rc::new(NoBrowser)).unwrap();
        (services, sink)
    }

    #[test]
    fn test_every_routable_category_is_registered() {
        let (services, _) = services(Rc::new(bundled_store()));
        for category in [
            SchemeType::Sitemap,
            SchemeType::Notify,
            SchemeType::Icon,
            SchemeType::Web,
        ] {
            assert!(services.registry.is_registered(category), "{}", category);
        }
        assert!(!services.registry.is_registered(SchemeType::Unsupported));
    }

    #[test]
    fn test_load_initial_bundled_demo() {
        let (services, _) = services(Rc::new(bundled_store()));
        let result = load_initial(&services.registry, "sitemap://demo").unwrap();
        let Dispatched::Navigation(snapshot) = result else {
            panic!("expected navigation, got {:?}", result);
        };
        assert_eq!(snapshot.title, "Demo House");
        assert_eq!(services.updates.borrow().depth, 1);
    }

    #[test]
    fn test_sitemap_handler_reports_through_registered_notifier() {
        let (services, sink) = services(Rc::new(MemoryStore::new()));
        let err = load_initial(&services.registry, "sitemap://nowhere/").unwrap_err();
        assert!(matches!(err, HandlerError::NotFound(_)));
        assert_eq!(
            sink.messages.borrow().as_slice(),
            ["Page not found: sitemap://nowhere/"]
        );
    }

    #[test]
    fn test_load_initial_rejects_unroutable_input() {
        let (services, _) = services(Rc::new(MemoryStore::new()));
        assert!(matches!(
            load_initial(&services.registry, "not a uri"),
            Err(HandlerError::Validation { .. })
        ));
        assert!(matches!(
            load_initial(&services.registry, "mailto:someone@example.org"),
            Err(HandlerError::Configuration(_))
        ));
    }
}
