//! Signal filter — one active predicate selects a stable subset of the set.
//!
//! Filters are never chained. Switching is total: an unrecognized selector
//! falls back to `All`.

use serde::{Deserialize, Serialize};

use crate::domain::Signal;

/// Minimum insider buys for the INSIDER filter.
pub const INSIDER_THRESHOLD: u32 = 7;

/// Active filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterKind {
    #[default]
    All,
    Insider,
    Bundler,
    HighBond,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::All,
        FilterKind::Insider,
        FilterKind::Bundler,
        FilterKind::HighBond,
    ];

    /// Parse a selector name. Unknown names select `All`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "insider" => FilterKind::Insider,
            "bundler" => FilterKind::Bundler,
            "highbond" | "high_bond" | "high-bond" | "high bond" => FilterKind::HighBond,
            _ => FilterKind::All,
        }
    }

    pub fn index(self) -> usize {
        match self {
            FilterKind::All => 0,
            FilterKind::Insider => 1,
            FilterKind::Bundler => 2,
            FilterKind::HighBond => 3,
        }
    }

    /// Selector at a tab index; out-of-range indices select `All`.
    pub fn from_index(i: usize) -> Self {
        Self::ALL.get(i).copied().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::ALL.len())
    }

    pub fn prev(self) -> Self {
        Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len())
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::All => "ALL",
            FilterKind::Insider => "INSIDER",
            FilterKind::Bundler => "BUNDLER",
            FilterKind::HighBond => "HIGH BOND",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FilterKind::All => "◎",
            FilterKind::Insider => "◉",
            FilterKind::Bundler => "⬡",
            FilterKind::HighBond => "◈",
        }
    }

    pub fn matches(self, signal: &Signal) -> bool {
        match self {
            FilterKind::All => true,
            FilterKind::Insider => signal.insider_buys >= INSIDER_THRESHOLD,
            FilterKind::Bundler => signal.bundler_activity,
            FilterKind::HighBond => signal.bond_potential.is_high(),
        }
    }

    /// Stable filter: survivors keep their original relative order.
    pub fn apply<'a>(self, signals: &'a [Signal]) -> Vec<&'a Signal> {
        signals.iter().filter(|s| self.matches(s)).collect()
    }
}
