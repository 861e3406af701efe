//! Signal records and the pure derivations drawn from them.
//!
//! A `Signal` is supplied wholesale by an external producer. Nothing here
//! creates or mutates signals beyond clamping out-of-range inputs; every
//! function is total so a malformed record degrades to a safe rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable signal identifier, unique within a live set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalId(pub String);

impl SignalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorical opportunity rating, supplied independently of `score`.
///
/// Labels outside HIGH/MEDIUM/LOW deserialize to `Unknown`, which is styled
/// like LOW and never counts as HIGH.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BondPotential {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BondPotential {
    pub fn label(self) -> &'static str {
        match self {
            BondPotential::High => "HIGH",
            BondPotential::Medium => "MEDIUM",
            BondPotential::Low => "LOW",
            BondPotential::Unknown => "UNKNOWN",
        }
    }

    pub fn is_high(self) -> bool {
        self == BondPotential::High
    }

    /// Visual descriptor for this rating. Unknown ratings get the LOW look.
    pub fn style(self) -> BondStyle {
        match self {
            BondPotential::High => BondStyle {
                tone: Tone::Positive,
                rgb: (0, 255, 136),
                emphasized: true,
            },
            BondPotential::Medium => BondStyle {
                tone: Tone::Caution,
                rgb: (255, 255, 0),
                emphasized: false,
            },
            BondPotential::Low | BondPotential::Unknown => BondStyle {
                tone: Tone::Alert,
                rgb: (255, 102, 0),
                emphasized: false,
            },
        }
    }
}

/// Coarse color family shared by score buckets and bond styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Accent,
    Caution,
    Alert,
}

/// Color/emphasis descriptor for a bond potential badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BondStyle {
    pub tone: Tone,
    pub rgb: (u8, u8, u8),
    pub emphasized: bool,
}

/// Score severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ScoreBucket {
    Weak,
    Fair,
    Good,
    Excellent,
}

impl ScoreBucket {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => ScoreBucket::Excellent,
            s if s >= 80 => ScoreBucket::Good,
            s if s >= 70 => ScoreBucket::Fair,
            _ => ScoreBucket::Weak,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ScoreBucket::Excellent => Tone::Positive,
            ScoreBucket::Good => Tone::Accent,
            ScoreBucket::Fair => Tone::Caution,
            ScoreBucket::Weak => Tone::Alert,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ScoreBucket::Excellent => (0, 255, 136),
            ScoreBucket::Good => (0, 255, 255),
            ScoreBucket::Fair => (255, 255, 0),
            ScoreBucket::Weak => (255, 102, 0),
        }
    }
}

/// Time since a signal was observed, bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    JustNow,
    Minutes(i64),
    Hours(i64),
}

impl Elapsed {
    /// Whole minutes are floored; observations in the future read as "just now".
    pub fn between(observed_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let minutes = (now - observed_at).num_seconds().max(0) / 60;
        match minutes {
            0 => Elapsed::JustNow,
            m if m < 60 => Elapsed::Minutes(m),
            m => Elapsed::Hours(m / 60),
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::JustNow => write!(f, "just now"),
            Elapsed::Minutes(m) => write!(f, "{m}m ago"),
            Elapsed::Hours(h) => write!(f, "{h}h ago"),
        }
    }
}

/// Render the elapsed label against `now`. Never cache the result: the label
/// changes with wall-clock time even when the signal does not.
pub fn elapsed_label(observed_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    Elapsed::between(observed_at, now).to_string()
}

/// Shown in place of a missing ticker symbol.
pub const PLACEHOLDER_TICKER: &str = "?";

/// One tracked token candidate.
///
/// Only `id` and `observedAt` are required on the wire. Any other field that
/// is missing or `null` takes its default and is cleaned up by `sanitize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: SignalId,
    #[serde(default, deserialize_with = "de_or_default")]
    pub token_address: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub ticker: String,
    #[serde(default, deserialize_with = "de_percent")]
    pub score: u8,
    #[serde(default, deserialize_with = "de_count")]
    pub insider_buys: u32,
    #[serde(default, deserialize_with = "de_count")]
    pub profitable_wallets: u32,
    #[serde(default, deserialize_with = "de_or_default")]
    pub narrative: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub bundler_activity: bool,
    #[serde(default, deserialize_with = "de_percent")]
    pub dev_bond_rate: u8,
    #[serde(default, deserialize_with = "de_or_default")]
    pub bond_potential: BondPotential,
    pub observed_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub price_change_percent: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub market_cap_display: String,
}

impl Signal {
    pub fn score_bucket(&self) -> ScoreBucket {
        ScoreBucket::from_score(self.score)
    }

    pub fn bond_style(&self) -> BondStyle {
        self.bond_potential.style()
    }

    pub fn elapsed_label(&self, now: DateTime<Utc>) -> String {
        elapsed_label(self.observed_at, now)
    }

    /// Clamp bounded fields into range and fill a blank ticker.
    /// Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.score > 100 {
            self.score = 100;
            changed = true;
        }
        if self.dev_bond_rate > 100 {
            self.dev_bond_rate = 100;
            changed = true;
        }
        if !self.price_change_percent.is_finite() {
            self.price_change_percent = 0.0;
            changed = true;
        }
        if self.ticker.trim().is_empty() {
            self.ticker = PLACEHOLDER_TICKER.to_string();
            changed = true;
        }
        changed
    }

    /// Signed percent change with one decimal, e.g. `+234.5%` or `-3.0%`.
    pub fn price_change_text(&self) -> String {
        format!("{:+.1}%", self.price_change_percent)
    }
}

/// `null` reads as the type's default.
fn de_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn de_percent<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    match Option::<f64>::deserialize(d)? {
        Some(raw) if !raw.is_nan() => Ok(raw.round().clamp(0.0, 100.0) as u8),
        _ => Ok(0),
    }
}

fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    match Option::<f64>::deserialize(d)? {
        Some(raw) if !raw.is_nan() => Ok(raw.round().clamp(0.0, u32::MAX as f64) as u32),
        _ => Ok(0),
    }
}
