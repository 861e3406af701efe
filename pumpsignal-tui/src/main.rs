//! PumpSignal TUI — live dashboard for pump-token signals.
//!
//! Regions:
//! 1. Header: logo, live indicator, radar sweep with one blip per HIGH signal
//! 2. Ticker: the whole set scrolling right to left
//! 3. Sidebar: eased stats, trending narratives, top devs, insider alert
//! 4. Signals: filter tabs and staggered signal cards

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pumpsignal_core::feed;
use pumpsignal_core::{Dashboard, DashboardConfig};

use crate::app::AppState;
use crate::worker::FeedCommand;

#[derive(Parser, Debug)]
#[command(name = "pumpsignal-tui", about = "Live pump-token signal dashboard")]
struct Args {
    /// TOML config file (animation timings, radar seed, ticker, feed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON or TOML signal file; overrides the config's feed path
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Re-fetch the feed every N seconds (0 = only on `r`)
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Directory for the rolling log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(&args.log_dir)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = args.feed {
        config.feed.path = Some(path);
    }
    if let Some(secs) = args.refresh_secs {
        config.feed.refresh_secs = secs;
    }

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pumpsignal")
        .join("state.json");
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let source = feed::source_for(config.feed.path.as_deref());
    let feed_name = source.name().to_string();
    let refresh =
        (config.feed.refresh_secs > 0).then(|| Duration::from_secs(config.feed.refresh_secs));
    let worker_handle = worker::spawn_worker(source, refresh, cmd_rx, resp_tx)
        .context("spawning feed worker")?;

    info!(feed = %feed_name, ?refresh, "starting dashboard");
    let mut app = AppState::new(Dashboard::new(config), feed_name, cmd_tx.clone(), resp_rx);
    persistence::apply(&mut app, persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Stop every animation driver before the surface goes away.
    app.dashboard.teardown();

    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    let _ = cmd_tx.send(FeedCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let frame_interval = app.dashboard.frame_interval();
    let mut last = Instant::now();
    loop {
        // 1. Advance animations by wall time since the last frame
        let now = Instant::now();
        app.tick(now - last);
        last = now;

        // 2. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 3. Drain feed responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_feed_response(resp);
        }

        // 4. Poll for input at the fastest animation cadence
        if event::poll(frame_interval)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to a daily-rolling file; the terminal belongs to the dashboard.
fn init_tracing(dir: &std::path::Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log dir {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(dir, "pumpsignal.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}
