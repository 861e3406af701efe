//! Ticker strip — the full signal set repeated end to end and scrolled left.
//!
//! The raw scroll offset decreases forever; it is wrapped into
//! `(-(N * item_width), 0]` when consumed, which keeps the seam invisible as
//! long as the viewport is narrower than the remaining copies.

use serde::Serialize;

use crate::config::TickerConfig;
use crate::domain::Signal;

/// Wrap a raw offset into `(-(count * item_width), 0]`.
///
/// Uses a euclidean remainder so negative offsets wrap the same way as
/// positive ones. An empty set pins the strip at 0. A span too wide for
/// `i64` already contains every non-positive offset, so `raw` is only
/// clamped to 0 from above.
pub fn wrap_offset(raw: i64, count: usize, item_width: u32) -> i64 {
    let span = i64::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(i64::from(item_width)));
    let span = match span {
        Some(0) => return 0,
        Some(span) => span,
        None => return raw.min(0),
    };
    match raw.rem_euclid(span) {
        0 => 0,
        r => r - span,
    }
}

/// Text pieces of one ticker item, kept apart so a surface can style each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemParts<'a> {
    pub ticker: &'a str,
    /// Direction arrow and absolute change, e.g. `▲ 234.5%`.
    pub change: String,
    pub market_cap: &'a str,
    pub score: u8,
}

pub fn item_parts(signal: &Signal) -> ItemParts<'_> {
    let arrow = if signal.price_change_percent > 0.0 { '▲' } else { '▼' };
    ItemParts {
        ticker: &signal.ticker,
        change: format!("{arrow} {:.1}%", signal.price_change_percent.abs()),
        market_cap: &signal.market_cap_display,
        score: signal.score,
    }
}

/// An item intersecting the viewport, positioned relative to its left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleItem<'a> {
    pub signal: &'a Signal,
    /// Position in the repeated sequence.
    pub slot: usize,
    /// Left edge relative to the viewport; negative when partly scrolled out.
    pub x: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct TickerStrip<'a> {
    signals: &'a [Signal],
    item_width: u32,
    repeat: usize,
    offset: i64,
}

impl<'a> TickerStrip<'a> {
    pub fn new(signals: &'a [Signal], config: &TickerConfig, raw_offset: i64) -> Self {
        Self {
            signals,
            item_width: config.item_width,
            repeat: config.repeat.max(1),
            offset: wrap_offset(raw_offset, signals.len(), config.item_width),
        }
    }

    /// Wrapped offset applied to the strip.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Number of items in the repeated sequence.
    pub fn len(&self) -> usize {
        self.signals.len() * self.repeat
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// The repeated sequence, in order.
    pub fn items(&self) -> impl Iterator<Item = &'a Signal> + 'a {
        let signals = self.signals;
        (0..self.repeat).flat_map(move |_| signals.iter())
    }

    /// Items that intersect a viewport `width` units wide.
    pub fn visible(&self, width: u32) -> Vec<VisibleItem<'a>> {
        let item_width = i64::from(self.item_width);
        let width = i64::from(width);
        self.items()
            .enumerate()
            .filter_map(|(slot, signal)| {
                let x = self.offset + slot as i64 * item_width;
                (x + item_width > 0 && x < width).then_some(VisibleItem { signal, slot, x })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::reference_signals;
    use chrono::Utc;

    #[test]
    fn wraps_mid_strip_offset() {
        assert_eq!(wrap_offset(-1685, 6, 280), -5);
    }

    #[test]
    fn wrap_range() {
        assert_eq!(wrap_offset(0, 6, 280), 0);
        assert_eq!(wrap_offset(-1680, 6, 280), 0);
        assert_eq!(wrap_offset(-1, 6, 280), -1);
        assert_eq!(wrap_offset(-1679, 6, 280), -1679);
        assert_eq!(wrap_offset(-1_000_000_007, 6, 280), -(1_000_000_007 % 1680));
        assert_eq!(wrap_offset(5, 6, 280), -1675);
    }

    #[test]
    fn oversized_span_does_not_overflow() {
        assert_eq!(wrap_offset(-1685, usize::MAX, u32::MAX), -1685);
        assert_eq!(wrap_offset(i64::MIN, usize::MAX, u32::MAX), i64::MIN);
        assert_eq!(wrap_offset(42, usize::MAX, u32::MAX), 0);
    }

    #[test]
    fn empty_set_does_not_divide_by_zero() {
        assert_eq!(wrap_offset(-1685, 0, 280), 0);
        let strip = TickerStrip::new(&[], &TickerConfig::default(), -50);
        assert!(strip.is_empty());
        assert!(strip.visible(1000).is_empty());
    }

    #[test]
    fn strip_repeats_three_times() {
        let signals = reference_signals(Utc::now());
        let strip = TickerStrip::new(&signals, &TickerConfig::default(), 0);
        assert_eq!(strip.len(), 18);
        let tickers: Vec<&str> = strip.items().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers[0], tickers[6]);
        assert_eq!(tickers[5], tickers[17]);
    }

    #[test]
    fn visible_window_follows_offset() {
        let signals = reference_signals(Utc::now());
        let strip = TickerStrip::new(&signals, &TickerConfig::default(), -1685);
        let visible = strip.visible(600);
        assert_eq!(visible[0].slot, 0);
        assert_eq!(visible[0].x, -5);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[2].x, 555);
    }

    #[test]
    fn no_seam_at_wrap_boundary() {
        let signals = reference_signals(Utc::now());
        let config = TickerConfig::default();
        for raw in [-1679, -1680, -1681, -3359] {
            let strip = TickerStrip::new(&signals, &config, raw);
            let visible = strip.visible(1680);
            let covered_to = visible.last().map(|v| v.x + 280).unwrap_or(0);
            assert!(covered_to >= 1680, "gap at raw offset {raw}");
        }
    }

    #[test]
    fn item_parts_use_direction_arrow() {
        let mut signals = reference_signals(Utc::now());
        let parts = item_parts(&signals[0]);
        assert_eq!(parts.ticker, "$PEPE2");
        assert_eq!(parts.change, "▲ 234.5%");
        assert_eq!(parts.market_cap, "$1.2M");
        assert_eq!(parts.score, 94);
        signals[0].price_change_percent = -12.34;
        assert_eq!(item_parts(&signals[0]).change, "▼ 12.3%");
        signals[0].price_change_percent = 0.0;
        assert_eq!(item_parts(&signals[0]).change, "▼ 0.0%");
    }
}
