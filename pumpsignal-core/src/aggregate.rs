//! Summary statistics over the whole signal set.
//!
//! Aggregates ignore the active filter: they always describe the full set.
//! Everything here is a pure function of its input and total over the empty set.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Signal;

/// Headline dashboard statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub total_count: u32,
    pub high_potential_count: u32,
    /// Rounded mean score; 0 for the empty set.
    pub average_score: u32,
    /// Distinct narrative labels in the set.
    pub active_narratives: u32,
}

impl Aggregates {
    pub const FIELDS: usize = 4;

    pub fn compute(signals: &[Signal]) -> Self {
        let total_count = signals.len() as u32;
        let high_potential_count = signals
            .iter()
            .filter(|s| s.bond_potential.is_high())
            .count() as u32;
        let score_sum: u64 = signals.iter().map(|s| u64::from(s.score)).sum();
        let narratives: HashSet<&str> = signals.iter().map(|s| s.narrative.as_str()).collect();

        Self {
            total_count,
            high_potential_count,
            average_score: rounded_mean(score_sum, signals.len() as u64),
            active_narratives: narratives.len() as u32,
        }
    }

    /// Field order: total, high potential, average score, narratives.
    pub fn to_array(self) -> [u32; Self::FIELDS] {
        [
            self.total_count,
            self.high_potential_count,
            self.average_score,
            self.active_narratives,
        ]
    }

    pub fn from_array(values: [u32; Self::FIELDS]) -> Self {
        Self {
            total_count: values[0],
            high_potential_count: values[1],
            average_score: values[2],
            active_narratives: values[3],
        }
    }
}

/// Integer mean rounded half-up, 0 when `count == 0`.
fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    ((sum * 2 + count) / (count * 2)) as u32
}

/// A narrative label and its heat (highest score among its signals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeHeat {
    pub name: String,
    pub heat: u8,
}

/// Narratives ranked by heat, hottest first. Ties keep first-seen order.
pub fn trending_narratives(signals: &[Signal], limit: usize) -> Vec<NarrativeHeat> {
    let mut ranked: Vec<NarrativeHeat> = Vec::new();
    for signal in signals {
        match ranked.iter_mut().find(|n| n.name == signal.narrative) {
            Some(entry) => entry.heat = entry.heat.max(signal.score),
            None => ranked.push(NarrativeHeat {
                name: signal.narrative.clone(),
                heat: signal.score,
            }),
        }
    }
    ranked.sort_by(|a, b| b.heat.cmp(&a.heat));
    ranked.truncate(limit);
    ranked
}

/// A developer bond-rate row for the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevRate {
    pub token_address: String,
    pub dev_bond_rate: u8,
    pub insider_buys: u32,
}

/// Signals ranked by `dev_bond_rate`, highest first (stable).
pub fn top_devs(signals: &[Signal], limit: usize) -> Vec<DevRate> {
    let mut ranked: Vec<&Signal> = signals.iter().collect();
    ranked.sort_by(|a, b| b.dev_bond_rate.cmp(&a.dev_bond_rate));
    ranked
        .into_iter()
        .take(limit)
        .map(|s| DevRate {
            token_address: s.token_address.clone(),
            dev_bond_rate: s.dev_bond_rate,
            insider_buys: s.insider_buys,
        })
        .collect()
}

/// Highlighted insider-activity alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub ticker: String,
    pub message: String,
}

/// Alert for the signal with the most insider buys (first on ties).
pub fn insider_alert(signals: &[Signal]) -> Option<Alert> {
    let mut best: Option<&Signal> = None;
    for signal in signals {
        if best.map_or(true, |b| signal.insider_buys > b.insider_buys) {
            best = Some(signal);
        }
    }
    best.map(|s| Alert {
        ticker: s.ticker.clone(),
        message: format!(
            "New insider activity detected on {}. {} profitable wallets accumulating.",
            s.ticker, s.profitable_wallets
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::reference_signals;
    use chrono::Utc;

    #[test]
    fn empty_set_is_all_zero() {
        let agg = Aggregates::compute(&[]);
        assert_eq!(agg, Aggregates::default());
        assert!(trending_narratives(&[], 4).is_empty());
        assert!(top_devs(&[], 3).is_empty());
        assert!(insider_alert(&[]).is_none());
    }

    #[test]
    fn reference_set_aggregates() {
        let signals = reference_signals(Utc::now());
        let agg = Aggregates::compute(&signals);
        assert_eq!(agg.total_count, 6);
        assert_eq!(agg.high_potential_count, 3);
        assert_eq!(agg.average_score, 84);
        assert_eq!(agg.active_narratives, 6);
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(505, 6), 84);
        assert_eq!(rounded_mean(7, 3), 2);
        assert_eq!(rounded_mean(0, 0), 0);
    }

    #[test]
    fn array_round_trip_keeps_field_order() {
        let agg = Aggregates {
            total_count: 1,
            high_potential_count: 2,
            average_score: 3,
            active_narratives: 4,
        };
        assert_eq!(agg.to_array(), [1, 2, 3, 4]);
        assert_eq!(Aggregates::from_array(agg.to_array()), agg);
    }

    #[test]
    fn narratives_ranked_by_heat() {
        let signals = reference_signals(Utc::now());
        let trending = trending_narratives(&signals, 4);
        let names: Vec<&str> = trending.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Pepe Revival", "Sigma Grindset", "Wojak Meta", "AI Agents"]
        );
        assert_eq!(trending[0].heat, 94);
    }

    #[test]
    fn top_devs_by_bond_rate() {
        let signals = reference_signals(Utc::now());
        let devs = top_devs(&signals, 3);
        let rates: Vec<u8> = devs.iter().map(|d| d.dev_bond_rate).collect();
        assert_eq!(rates, vec![95, 92, 87]);
        assert_eq!(devs[0].token_address, "0x1a2b...3c4d");
    }

    #[test]
    fn alert_picks_most_insider_buys() {
        let signals = reference_signals(Utc::now());
        let alert = insider_alert(&signals).unwrap();
        assert_eq!(alert.ticker, "$SIGMA");
        assert!(alert.message.contains("$SIGMA"));
    }
}
