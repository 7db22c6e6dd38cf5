//! blip - swipe through movies from your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! blip
//!
//! # CLI mode (for automation)
//! blip discover --platforms netflix --limit 5
//! blip rate 603 watch
//! blip watchlist --all --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use blip::api::BlipClient;
use blip::app::{App, AppEvent, Effect};
use blip::cli::{Cli, Command, ExitCode, Output};
use blip::commands;
use blip::config::{Config, Settings};
use blip::logging::{self, LogTarget};
use blip::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let settings = config.resolve(cli.api_url.as_deref(), cli.user_id);

    if cli.is_cli_mode() {
        // Logging is best effort; a second init or an unwritable dir is not fatal
        let _ = logging::init(cli.verbose, cli.quiet, LogTarget::Stderr);

        let exit_code = run_cli(cli, &settings).await;
        std::process::exit(exit_code.into());
    } else {
        if let Some(dir) = logging::default_log_dir() {
            let _ = logging::init(cli.verbose, cli.quiet, LogTarget::File(dir));
        }
        run_tui(settings).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, settings: &Settings) -> ExitCode {
    let output = Output::new(&cli);
    debug!(api_url = %settings.api_url, user_id = settings.user_id, "cli mode");

    match cli.command {
        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, settings, &output).await,
        Some(Command::Rate(cmd)) => commands::rate_cmd(cmd, settings, &output).await,
        Some(Command::Watchlist(cmd)) => commands::watchlist_cmd(cmd, settings, &output).await,
        Some(Command::Platforms(cmd)) => commands::platforms_cmd(cmd, settings, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(settings: Settings) -> Result<()> {
    info!(api_url = %settings.api_url, user_id = settings.user_id, "starting tui");

    let client = BlipClient::new(&settings.api_url, settings.user_id);
    let mut app = App::new(settings.platforms);
    app.start();

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, runs effects, applies their results
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: &BlipClient) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();

    while app.running {
        for effect in app.take_effects() {
            spawn_effect(client.clone(), effect, tx.clone());
        }

        drain_events(app, &mut rx);

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for input with a timeout so finished tasks get picked up
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// Apply every finished result without blocking
fn drain_events(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.handle_event(event);
    }
}

/// Run an effect on a task, reporting back through `tx`
fn spawn_effect(client: BlipClient, effect: Effect, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        match effect {
            Effect::Discover { request, platforms } => {
                let result = client.discover(&platforms).await;
                let _ = tx.send(AppEvent::Discovered(request, result));
            }
            Effect::RecordOpinion { movie_id, opinion } => {
                // Fire and forget: the card is already gone
                if let Err(e) = client.record_opinion(movie_id, opinion).await {
                    warn!(movie_id, %opinion, error = %e, "failed to record opinion");
                }
            }
            Effect::Watchlist(request) => {
                let result = client.watchlist(request.page).await;
                let _ = tx.send(AppEvent::WatchlistLoaded(request, result));
            }
        }
    });
}
