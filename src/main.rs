// Sitemap Viewer - terminal browser for home automation sitemaps
//
// A sitemap is a tree of frames and widgets fetched by URI. Every action a
// widget carries is itself a URI, routed by scheme to a handler.
//
// Architecture:
// - Scheme registry: one handler per category (sitemap, icon, web, notify)
// - Rendering model: resource store + tagged-JSON decoder
// - Navigation: history stack publishing snapshots on a watch channel
// - TUI (ratatui): renders snapshots, defers actions to the event loop

mod cli;
mod config;
mod error;
mod icon;
mod logging;
mod model;
mod navigation;
mod notify;
mod rendering;
mod scheme;
mod startup;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use navigation::SystemBrowser;
use notify::{ConsoleNotifier, Notice, Notifier};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::app::App;
use tui::components::ToastQueue;
use tui::deferred::TaskQueue;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Config subcommands (--show, --reset, --edit, --path) exit early
    if cli::handle_command(&cli) {
        return Ok(());
    }

    Config::ensure_config_exists();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    let log_buffer = LogBuffer::new();
    // Keeps the non-blocking file writer flushing until exit
    let _file_guard = init_tracing(&config, &log_buffer);

    let store = startup::build_store(&config);

    if !config.enable_tui {
        return run_headless(&config, store);
    }

    startup::log_startup(&config);
    let toasts = Rc::new(ToastQueue::new(config.ui.toast_duration()));
    let services = startup::build_services(
        &config,
        store,
        toasts.clone(),
        Rc::new(SystemBrowser::default()),
    )?;

    if let Err(e) = startup::load_initial(&services.registry, &config.load) {
        tracing::error!("Failed to load {}: {}", config.load, e);
        if !e.is_user_visible() {
            toasts.enqueue(Notice::new(format!("Cannot load {}", config.load)));
        }
    }

    let (scheduler, tasks) = TaskQueue::new();
    let app = App::new(
        services.registry.clone(),
        scheduler,
        toasts,
        log_buffer,
    );

    tui::run_tui(app, services.updates, tasks, config.ui.tick_interval()).await
}

/// Print the start page once and exit
fn run_headless(config: &Config, store: Rc<dyn rendering::ResourceStore>) -> Result<()> {
    startup::print_startup(config);

    let services = startup::build_services(
        config,
        store,
        Rc::new(ConsoleNotifier),
        Rc::new(SystemBrowser::default()),
    )?;
    startup::load_initial(&services.registry, &config.load)
        .with_context(|| format!("Failed to load {}", config.load))?;

    startup::print_page(&services.updates.borrow());
    Ok(())
}

/// Initialize tracing with conditional output
///
/// In TUI mode logs go to the in-memory buffer (stdout belongs to the
/// terminal UI); headless mode logs to stdout. File logging is added on top
/// when enabled.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("sitemap={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let (tui_layer, stdout_layer) = if config.enable_tui {
        (Some(TuiLogLayer::new(log_buffer.clone())), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
