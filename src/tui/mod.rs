// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, snapshots, deferred tasks)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod deferred;
pub mod theme;
pub mod traits;

use crate::navigation::NavigationSnapshot;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deferred::TaskQueue;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::watch;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal when
/// done, even if the loop failed.
pub async fn run_tui(
    mut app: App,
    mut updates: watch::Receiver<NavigationSnapshot>,
    mut tasks: TaskQueue,
    tick: Duration,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.show(updates.borrow_and_update().clone());
    let result = run_event_loop(&mut terminal, &mut app, &mut updates, &mut tasks, tick).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on four sources and reacts to whichever is ready first:
/// 1. Keyboard input
/// 2. Timer ticks (toast expiry, redraw)
/// 3. New navigation snapshots
/// 4. Deferred tasks scheduled by input handling
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    updates: &mut watch::Receiver<NavigationSnapshot>,
    tasks: &mut TaskQueue,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press {
                            app.handle_key(key);
                        }
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.on_tick();
            }

            Ok(()) = updates.changed() => {
                let snapshot = updates.borrow_and_update().clone();
                app.show(snapshot);
            }

            Some(task) = tasks.next() => {
                app.run_deferred(task);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Lay out the screen: app bar, list, status bar, toast overlay
fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::app_bar::render(f, chunks[0], app);
    components::sitemap_list::render(f, chunks[1], app);
    components::status_bar::render(f, chunks[2], app);

    let area = f.area();
    app.toasts.render(f, area, &app.palette);
}
