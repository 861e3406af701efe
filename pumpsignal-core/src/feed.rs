//! Signal producers.
//!
//! A producer hands over a complete, ordered signal set on every fetch. The
//! dashboard replaces its set wholesale with whatever comes back; there is no
//! incremental patching.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::{BondPotential, Signal, SignalId};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("read signal file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse signal JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse signal TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Anything that can produce a whole signal set on demand.
pub trait SignalSource: Send {
    /// Human-readable name for logs and the status bar.
    fn name(&self) -> &str;

    fn fetch(&mut self) -> Result<Vec<Signal>, FeedError>;
}

/// Text columns of the reference set: id, token address, ticker, narrative,
/// market cap.
const REFERENCE_LABELS: [(&str, &str, &str, &str, &str); 6] = [
    ("1", "0x7f3a...8b2c", "$PEPE2", "Pepe Revival", "$1.2M"),
    ("2", "0x9a2b...4c1d", "$WOJAK", "Wojak Meta", "$890K"),
    ("3", "0x3c4d...7e8f", "$GROK", "AI Agents", "$2.1M"),
    ("4", "0x5e6f...9a0b", "$BONK2", "Dog Meta", "$450K"),
    ("5", "0x1a2b...3c4d", "$SIGMA", "Sigma Grindset", "$3.4M"),
    ("6", "0x8d9e...f0a1", "$FROG", "Frog Season", "$180K"),
];

/// Numeric columns of the reference set: score, insider buys, profitable
/// wallets, dev bond rate, minutes ago, price change, bundler, bond potential.
#[allow(clippy::type_complexity)]
const REFERENCE_METRICS: [(u8, u32, u32, u8, i64, f64, bool, BondPotential); 6] = [
    (94, 12, 8, 87, 2, 234.5, true, BondPotential::High),
    (88, 9, 6, 92, 5, 156.2, true, BondPotential::High),
    (82, 7, 5, 78, 10, 89.3, false, BondPotential::Medium),
    (79, 5, 4, 65, 15, 45.7, true, BondPotential::Medium),
    (91, 15, 11, 95, 3, 312.8, true, BondPotential::High),
    (71, 4, 3, 58, 20, 23.1, false, BondPotential::Low),
];

/// The six reference signals, observed relative to `now`.
pub fn reference_signals(now: DateTime<Utc>) -> Vec<Signal> {
    REFERENCE_LABELS
        .into_iter()
        .zip(REFERENCE_METRICS)
        .map(|((id, token, ticker, narrative, mcap), metrics)| {
            let (score, insider, wallets, dev_rate, mins, change, bundler, bond) = metrics;
            Signal {
                id: SignalId::new(id),
                token_address: token.into(),
                ticker: ticker.into(),
                score,
                insider_buys: insider,
                profitable_wallets: wallets,
                narrative: narrative.into(),
                bundler_activity: bundler,
                dev_bond_rate: dev_rate,
                bond_potential: bond,
                observed_at: now - Duration::minutes(mins),
                price_change_percent: change,
                market_cap_display: mcap.into(),
            }
        })
        .collect()
}

/// Built-in mock producer. Timestamps are anchored when the feed is created,
/// so the elapsed labels age naturally across reloads.
#[derive(Debug, Clone)]
pub struct MockFeed {
    anchor: DateTime<Utc>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::anchored_at(Utc::now())
    }

    pub fn anchored_at(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for MockFeed {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&mut self) -> Result<Vec<Signal>, FeedError> {
        Ok(reference_signals(self.anchor))
    }
}

#[derive(Debug, Deserialize)]
struct SignalTable {
    #[serde(default)]
    signals: Vec<toml::Value>,
}

/// Decode each record on its own; an unreadable record is logged and skipped
/// so the rest of the set still loads.
fn decode_records<R, E: std::fmt::Display>(
    records: Vec<R>,
    decode: impl Fn(R) -> Result<Signal, E>,
) -> Vec<Signal> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match decode(record) {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable signal record");
                None
            }
        })
        .collect()
}

/// Reads a signal set from a JSON array or a TOML `[[signals]]` table.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
    label: String,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse by extension: `.toml` as TOML, anything else as JSON.
    ///
    /// A document that is not an array (or `[[signals]]` table) is an error.
    /// Individual records that cannot be read are dropped.
    pub fn parse(path: &Path, content: &str) -> Result<Vec<Signal>, FeedError> {
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            let table: SignalTable = toml::from_str(content)?;
            Ok(decode_records(table.signals, Signal::deserialize))
        } else {
            let records: Vec<serde_json::Value> = serde_json::from_str(content)?;
            Ok(decode_records(records, serde_json::from_value::<Signal>))
        }
    }
}

impl SignalSource for FileFeed {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&mut self) -> Result<Vec<Signal>, FeedError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        Self::parse(&self.path, &content)
    }
}

/// Pick the producer for an optional signal file.
pub fn source_for(path: Option<&Path>) -> Box<dyn SignalSource> {
    match path {
        Some(p) => Box::new(FileFeed::new(p)),
        None => Box::new(MockFeed::new()),
    }
}
