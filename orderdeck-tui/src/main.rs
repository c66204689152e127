//! OrderDeck TUI — reorderable trading dashboard panels.
//!
//! Panels:
//! 1. Watchlist — symbol rows with quotes and alerts
//! 2. Portfolio — open positions with P&L summary
//! 3. Strategies — strategy rows with run controls
//! 4. Help — keyboard shortcuts and error history
//!
//! Every panel is a sortable container: rows reorder by keyboard grab or
//! mouse drag, commits are debounced, and the resulting order persists
//! locally (and to a remote endpoint when configured).

mod app;
mod config;
mod domain;
mod input;
mod persistence;
mod sample_data;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use orderdeck_core::FileOrderStore;

use crate::app::{AppState, ErrorCategory, Panel};
use crate::config::DashboardConfig;
use crate::worker::{WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // Paths
    let config_root = config::config_dir();
    let dashboard_config = DashboardConfig::load(&config_root.join("config.toml"));
    let state_path = config_root.join("state.json");
    let orders_dir = config_root.join("orders");

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn sync worker
    let worker_handle =
        worker::spawn_worker(dashboard_config.remote_endpoint.clone(), cmd_rx, resp_tx);

    // Build app state
    let mut app = AppState::new(
        dashboard_config,
        FileOrderStore::new(orders_dir),
        state_path.clone(),
        cmd_tx.clone(),
        resp_rx,
    );

    // Apply persisted state, then restore stored orders through the same
    // debounced path as a user drag.
    persistence::apply(&mut app, persisted);
    app.restore_orders(Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut tick: u64 = 0;
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Flush due debounced commits
        app.pump_commits(Instant::now());

        // 4. Quote simulation, roughly once a second at the 50ms tick
        tick += 1;
        if tick % 20 == 0 {
            app.tick_quotes();
        }

        // 5. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            let size = terminal.size()?;
            let frame = Rect::new(0, 0, size.width, size.height);
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse, frame),
                _ => {}
            }
            keep_cursor_visible(app, frame);
        }

        // 6. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn keep_cursor_visible(app: &mut AppState, frame: Rect) {
    let viewport = ui::list_rect(frame).height;
    match app.active_panel {
        Panel::Watchlist => app.watchlist.ensure_cursor_visible(viewport),
        Panel::Portfolio => app.portfolio.ensure_cursor_visible(viewport),
        Panel::Strategies => app.strategies.ensure_cursor_visible(viewport),
        Panel::Help => {}
    }
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::OrderFetched { key, entries } => {
            app.apply_order(&key, &entries, Instant::now());
            app.set_status(format!("Remote order applied for {key}"));
        }
        WorkerResponse::PushDone { .. } => {}
        WorkerResponse::Error { context, message } => {
            // Best-effort sync: recorded, never surfaced as a dialog.
            app.record_error(ErrorCategory::Remote, message, context);
        }
    }
}
