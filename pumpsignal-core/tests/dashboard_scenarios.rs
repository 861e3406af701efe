//! End-to-end scenarios over the reference signal set.
//!
//! Drives the `Dashboard` the way a render loop would: load a set, switch
//! filters, feed elapsed time in, tear down.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use pumpsignal_core::anim::DriverKind;
use pumpsignal_core::domain::{BondPotential, ScoreBucket, Tone};
use pumpsignal_core::feed::{reference_signals, MockFeed, SignalSource};
use pumpsignal_core::radar;
use pumpsignal_core::ticker::wrap_offset;
use pumpsignal_core::{Aggregates, Dashboard, DashboardConfig, FilterKind};

fn loaded() -> Dashboard {
    let mut feed = MockFeed::new();
    let signals = feed.fetch().unwrap();
    Dashboard::with_signals(DashboardConfig::default(), signals)
}

fn tickers(dash: &Dashboard) -> Vec<String> {
    dash.filtered().iter().map(|s| s.ticker.clone()).collect()
}

#[test]
fn reference_set_aggregates() {
    let dash = loaded();
    assert_eq!(
        dash.aggregates(),
        Aggregates {
            total_count: 6,
            high_potential_count: 3,
            average_score: 84,
            active_narratives: 6,
        }
    );
}

#[test]
fn insider_filter_selects_seven_and_up() {
    let mut dash = loaded();
    dash.set_active_filter(FilterKind::Insider);
    assert_eq!(tickers(&dash), ["$PEPE2", "$WOJAK", "$GROK", "$SIGMA"]);
}

#[test]
fn every_filter_preserves_source_order() {
    let mut dash = loaded();
    let cases = [
        (FilterKind::All, vec!["$PEPE2", "$WOJAK", "$GROK", "$BONK2", "$SIGMA", "$FROG"]),
        (FilterKind::Bundler, vec!["$PEPE2", "$WOJAK", "$BONK2", "$SIGMA"]),
        (FilterKind::HighBond, vec!["$PEPE2", "$WOJAK", "$SIGMA"]),
    ];
    for (filter, expected) in cases {
        dash.set_active_filter(filter);
        assert_eq!(tickers(&dash), expected, "filter {filter:?}");
    }
}

#[test]
fn display_derivations_for_reference_cards() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let signals = reference_signals(now);
    let dash = Dashboard::with_signals(DashboardConfig::default(), signals);
    let snapshot = dash.snapshot(now);

    let pepe = &snapshot.signals[0];
    assert_eq!(pepe.score_bucket, ScoreBucket::Excellent);
    assert_eq!(pepe.bond_style.tone, Tone::Positive);
    assert_eq!(pepe.elapsed, "2m ago");
    assert_eq!(pepe.price_change, "+234.5%");

    let grok = &snapshot.signals[2];
    assert_eq!(grok.score_bucket, ScoreBucket::Good);
    assert_eq!(grok.bond_potential, BondPotential::Medium);
    assert_eq!(grok.bond_style.tone, Tone::Caution);

    let frog = &snapshot.signals[5];
    assert_eq!(frog.score_bucket, ScoreBucket::Fair);
    assert_eq!(frog.bond_style.tone, Tone::Alert);
    assert_eq!(frog.elapsed, "20m ago");
}

#[test]
fn radar_has_one_blip_per_high_signal_inside_outer_ring() {
    let dash = loaded();
    assert_eq!(dash.blips().len(), 3);
    for blip in dash.blips() {
        assert!((25.0..45.0).contains(&blip.radius_units));
        let (x, y) = blip.project();
        let distance = ((x - radar::CENTER).powi(2) + (y - radar::CENTER).powi(2)).sqrt();
        assert!(distance <= radar::OUTER_RADIUS);
    }
}

#[test]
fn ticker_wraps_one_full_span_plus_five() {
    assert_eq!(wrap_offset(-1685, 6, 280), -5);
}

#[test]
fn ticker_scrolls_left_with_time() {
    let mut dash = loaded();
    dash.advance(Duration::from_millis(30 * 1685));
    assert_eq!(dash.raw_ticker_offset(), -1685);
    assert_eq!(dash.ticker().offset(), -5);
}

#[test]
fn counter_reaches_targets_after_one_second() {
    let mut dash = loaded();
    for _ in 0..20 {
        dash.advance(Duration::from_millis(50));
    }
    assert_eq!(dash.displayed_stats(), dash.aggregates());
}

#[test]
fn counter_is_past_halfway_at_halftime() {
    let mut dash = loaded();
    dash.advance(Duration::from_millis(500));
    let shown = dash.displayed_stats();
    assert!(shown.average_score * 2 > dash.aggregates().average_score);
}

#[test]
fn set_replacement_mid_run_retargets_from_zero() {
    let mut dash = loaded();
    dash.advance(Duration::from_millis(500));
    let mut smaller = reference_signals(Utc::now());
    smaller.truncate(2);
    let report = dash.replace_signals(smaller);
    assert!(report.counter_restarted);
    assert_eq!(dash.displayed_stats(), Aggregates::default());
    dash.advance(Duration::from_secs(1));
    assert_eq!(dash.displayed_stats().total_count, 2);
    assert_eq!(dash.displayed_stats().average_score, 91);
}

#[test]
fn teardown_then_tick_changes_nothing() {
    let mut dash = loaded();
    dash.advance(Duration::from_millis(250));
    let before = dash.snapshot(Utc::now());
    dash.teardown();
    let report = dash.advance(Duration::from_secs(30));
    assert!(!report.any());
    let after = dash.snapshot(Utc::now());
    assert_eq!(before.rotation, after.rotation);
    assert_eq!(before.scan_offset, after.scan_offset);
    assert_eq!(before.raw_ticker_offset, after.raw_ticker_offset);
    assert_eq!(before.clock_ms, after.clock_ms);
}

#[test]
fn handle_cancels_from_another_thread() {
    let mut dash = loaded();
    let handle = dash.driver_handle(DriverKind::Scan);
    std::thread::spawn(move || handle.cancel()).join().unwrap();
    dash.advance(Duration::from_millis(500));
    assert_eq!(dash.scan_offset(), 0);
    assert_eq!(dash.rotation(), 20);
}

#[test]
fn empty_feed_renders_zeros() {
    let mut dash = Dashboard::with_signals(DashboardConfig::default(), Vec::new());
    dash.advance(Duration::from_secs(3));
    let snapshot = dash.snapshot(Utc::now());
    assert_eq!(snapshot.aggregates, Aggregates::default());
    assert!(snapshot.blips.is_empty());
    assert!(snapshot.signals.is_empty());
    assert_eq!(snapshot.ticker_offset, 0);
    assert!(snapshot.alert.is_none());
}

#[test]
fn sidebar_views_follow_the_full_set() {
    let mut dash = loaded();
    dash.set_active_filter(FilterKind::HighBond);

    let narratives = dash.trending_narratives();
    assert_eq!(narratives.len(), 4);
    assert_eq!(narratives[0].name, "Pepe Revival");
    assert_eq!(narratives[0].heat, 94);

    let devs = dash.top_devs();
    assert_eq!(devs.len(), 3);
    assert_eq!(devs[0].dev_bond_rate, 95);

    let alert = dash.alert().unwrap();
    assert_eq!(alert.ticker, "$SIGMA");
}
