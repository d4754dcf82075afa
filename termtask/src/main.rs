//! `TermTask` — terminal task list with remote sync.
//!
//! Launches the TUI and synchronizes the task list with the task API.
//! When the API cannot be reached at startup, the session drops into a
//! self-contained sample mode so the UI stays usable. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/termtask/config.toml`).
//!
//! ```bash
//! # Against the default API address
//! cargo run --bin termtask
//!
//! # Against a specific API
//! cargo run --bin termtask -- --api-url http://127.0.0.1:3000
//!
//! # Or via environment variable
//! TERMTASK_API_URL=http://127.0.0.1:3000 cargo run --bin termtask
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use termtask::app::App;
use termtask::config::{CliArgs, ClientConfig};
use termtask::store::remote::RemoteStore;
use termtask::store::sample::SampleStore;
use termtask::sync::{self, SyncCommand, SyncEvent};
use termtask::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, "termtask starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtask exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtask.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop: draw, drain sync events, forward key intents.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new();

    let remote = RemoteStore::new(config.api_url.clone());
    let (cmd_tx, mut evt_rx) = sync::spawn_sync(remote, SampleStore::new(), config.sync_options());

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending sync events (non-blocking).
        drain_sync_events(&mut app, &mut evt_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(cmd) = app.handle_key_event(key) {
                match cmd_tx.try_send(cmd) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!("sync driver busy, command dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        tracing::error!("sync driver gone");
                    }
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(SyncCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `SyncEvent`s from the receiver and apply them.
fn drain_sync_events(app: &mut App, rx: &mut mpsc::Receiver<SyncEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SyncEvent::Refreshed(snapshot) => app.apply_snapshot(snapshot),
            SyncEvent::AddApplied => app.clear_input(),
        }
    }
}
