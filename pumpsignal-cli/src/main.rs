//! PumpSignal CLI — headless access to the dashboard engine.
//!
//! Commands:
//! - `snapshot`: load a feed, apply a filter, advance the clock, print JSON
//! - `radar`: lay out N blips and print their polar and cartesian positions
//! - `counter`: print every frame of an eased counter run
//! - `ticker`: wrap a raw ticker offset for a set size

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pumpsignal_core::anim::eased_value;
use pumpsignal_core::config::TickerConfig;
use pumpsignal_core::feed;
use pumpsignal_core::radar::{layout_blips, RadarGeometry};
use pumpsignal_core::rng::SeedHierarchy;
use pumpsignal_core::ticker::wrap_offset;
use pumpsignal_core::{Dashboard, DashboardConfig};

#[derive(Parser)]
#[command(name = "pumpsignal", about = "PumpSignal CLI: headless dashboard engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard snapshot as JSON.
    Snapshot {
        /// JSON or TOML signal file. Defaults to the built-in mock feed.
        #[arg(long)]
        feed: Option<PathBuf>,

        /// Active filter: all, insider, bundler, highbond.
        #[arg(long, default_value = "all")]
        filter: String,

        /// TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Advance the animation clock by this many milliseconds first.
        #[arg(long, default_value_t = 0)]
        at_ms: u64,
    },
    /// Lay out radar blips for N high-potential signals.
    Radar {
        #[arg(long)]
        count: usize,

        /// Master seed for jitter.
        #[arg(long, default_value_t = 0x5EED)]
        seed: u64,

        /// Layout generation (each recompute bumps it).
        #[arg(long, default_value_t = 0)]
        generation: u64,
    },
    /// Print each frame of an eased counter run toward a target.
    Counter {
        #[arg(long)]
        target: u32,

        #[arg(long, default_value_t = 30)]
        steps: u32,
    },
    /// Wrap a raw ticker offset for a set of N items.
    Ticker {
        #[arg(long)]
        count: usize,

        #[arg(long, allow_hyphen_values = true)]
        offset: i64,

        #[arg(long, default_value_t = TickerConfig::default().item_width)]
        item_width: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            feed,
            filter,
            config,
            at_ms,
        } => run_snapshot(feed, &filter, config, at_ms),
        Commands::Radar {
            count,
            seed,
            generation,
        } => run_radar(count, seed, generation),
        Commands::Counter { target, steps } => run_counter(target, steps),
        Commands::Ticker {
            count,
            offset,
            item_width,
        } => run_ticker(count, offset, item_width),
    }
}

fn run_snapshot(
    feed_path: Option<PathBuf>,
    filter: &str,
    config_path: Option<PathBuf>,
    at_ms: u64,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let feed_path = feed_path.or_else(|| config.feed.path.clone());
    let mut source = feed::source_for(feed_path.as_deref());
    let signals = source
        .fetch()
        .with_context(|| format!("fetching signals from {}", source.name()))?;
    info!(source = source.name(), count = signals.len(), "feed loaded");

    let mut dashboard = Dashboard::with_signals(config, signals);
    dashboard.set_active_filter_by_name(filter);
    dashboard.advance(Duration::from_millis(at_ms));

    let snapshot = dashboard.snapshot(Utc::now());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_radar(count: usize, seed: u64, generation: u64) -> Result<()> {
    let mut rng = SeedHierarchy::new(seed).rng_for("radar", generation);
    let blips = layout_blips(count, &RadarGeometry::default(), &mut rng);
    let rows: Vec<_> = blips
        .iter()
        .map(|b| {
            let (x, y) = b.project();
            json!({
                "index": b.index,
                "angleDegrees": b.angle_degrees,
                "radiusUnits": b.radius_units,
                "x": x,
                "y": y,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn run_counter(target: u32, steps: u32) -> Result<()> {
    if steps == 0 {
        bail!("--steps must be at least 1");
    }
    for step in 0..=steps {
        println!("{step:>3} {}", eased_value(target, step, steps));
    }
    Ok(())
}

fn run_ticker(count: usize, offset: i64, item_width: u32) -> Result<()> {
    if item_width == 0 {
        bail!("--item-width must be at least 1");
    }
    println!("{}", wrap_offset(offset, count, item_width));
    Ok(())
}
