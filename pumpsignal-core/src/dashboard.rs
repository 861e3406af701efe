//! Dashboard — the state and presentation engine behind the render surface.
//!
//! Owns the live signal set, the active filter, every derived view and the
//! animation scheduler. Derived views are rebuilt from scratch whenever the
//! set or the filter changes; animation ticks never touch the set.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{self, Aggregates, Alert, DevRate, NarrativeHeat};
use crate::anim::{AnimationScheduler, CancelHandle, DriverKind, RevealClock, TickReport};
use crate::config::DashboardConfig;
use crate::domain::{BondPotential, BondStyle, ScoreBucket, Signal, SignalId};
use crate::filter::FilterKind;
use crate::radar::{self, Blip};
use crate::rng::SeedHierarchy;
use crate::ticker::TickerStrip;

const RADAR_STREAM: &str = "radar";
const TRENDING_LIMIT: usize = 4;
const TOP_DEVS_LIMIT: usize = 3;

/// What happened to an incoming set during `replace_signals`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    pub accepted: usize,
    pub duplicates_dropped: usize,
    pub clamped: usize,
    pub relayout: bool,
    pub counter_restarted: bool,
    pub reveal_restarted: bool,
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    signals: Vec<Signal>,
    filter: FilterKind,
    /// Indices into `signals` that pass the active filter, in order.
    filtered: Vec<usize>,
    aggregates: Aggregates,
    seeds: SeedHierarchy,
    layout_generation: u64,
    blips: Vec<Blip>,
    scheduler: AnimationScheduler,
    reveal: RevealClock,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let scheduler = AnimationScheduler::new(&config.animation);
        let reveal = RevealClock::new(config.animation.reveal_stagger());
        let seeds = SeedHierarchy::new(config.radar.seed);
        Self {
            config,
            signals: Vec::new(),
            filter: FilterKind::All,
            filtered: Vec::new(),
            aggregates: Aggregates::default(),
            seeds,
            layout_generation: 0,
            blips: Vec::new(),
            scheduler,
            reveal,
        }
    }

    pub fn with_signals(config: DashboardConfig, signals: Vec<Signal>) -> Self {
        let mut dashboard = Self::new(config);
        dashboard.replace_signals(signals);
        dashboard
    }

    /// Swap in a whole new set and rebuild every derived view.
    ///
    /// Later duplicates of an id are dropped; out-of-range fields are clamped.
    pub fn replace_signals(&mut self, incoming: Vec<Signal>) -> ReplaceReport {
        let mut report = ReplaceReport::default();
        let mut seen: HashSet<SignalId> = HashSet::with_capacity(incoming.len());
        let mut signals = Vec::with_capacity(incoming.len());
        for mut signal in incoming {
            if !seen.insert(signal.id.clone()) {
                report.duplicates_dropped += 1;
                continue;
            }
            if signal.sanitize() {
                report.clamped += 1;
            }
            signals.push(signal);
        }
        report.accepted = signals.len();
        if report.duplicates_dropped > 0 {
            warn!(dropped = report.duplicates_dropped, "duplicate signal ids dropped");
        }

        let previous_high = self.aggregates.high_potential_count;
        let previous_ids = self.filtered_ids();
        self.signals = signals;
        self.aggregates = Aggregates::compute(&self.signals);
        self.refilter();

        if self.aggregates.high_potential_count != previous_high {
            self.relayout();
            report.relayout = true;
        }
        report.counter_restarted = self.scheduler.retarget_stats(self.aggregates);
        // Cards already on screen stay put while the filtered ids keep their order.
        if self.filtered_ids() != previous_ids {
            self.reveal.reset(self.scheduler.clock());
            report.reveal_restarted = true;
        }

        info!(
            accepted = report.accepted,
            clamped = report.clamped,
            high = self.aggregates.high_potential_count,
            avg = self.aggregates.average_score,
            "signal set replaced"
        );
        report
    }

    /// Switch the active filter. Always succeeds.
    pub fn set_active_filter(&mut self, filter: FilterKind) {
        if filter == self.filter {
            return;
        }
        debug!(from = ?self.filter, to = ?filter, "filter switched");
        self.filter = filter;
        self.refilter();
        self.reveal.reset(self.scheduler.clock());
    }

    /// Switch by selector name; unknown names select `All`.
    pub fn set_active_filter_by_name(&mut self, name: &str) {
        self.set_active_filter(FilterKind::parse(name));
    }

    fn refilter(&mut self) {
        let filter = self.filter;
        self.filtered = self
            .signals
            .iter()
            .enumerate()
            .filter(|(_, s)| filter.matches(s))
            .map(|(i, _)| i)
            .collect();
    }

    fn filtered_ids(&self) -> Vec<SignalId> {
        self.filtered
            .iter()
            .map(|&i| self.signals[i].id.clone())
            .collect()
    }

    fn relayout(&mut self) {
        let mut rng = self.seeds.rng_for(RADAR_STREAM, self.layout_generation);
        self.layout_generation += 1;
        let count = self.aggregates.high_potential_count as usize;
        self.blips = radar::layout_blips(count, &self.config.radar.geometry(), &mut rng);
        debug!(count, generation = self.layout_generation, "radar re-laid out");
    }

    /// Advance the animation clock. A no-op after teardown.
    pub fn advance(&mut self, dt: Duration) -> TickReport {
        self.scheduler.advance(dt)
    }

    /// Cancel every animation driver. Idempotent.
    pub fn teardown(&mut self) -> usize {
        self.scheduler.teardown()
    }

    pub fn is_torn_down(&self) -> bool {
        self.scheduler.is_torn_down()
    }

    pub fn driver_handle(&self, kind: DriverKind) -> CancelHandle {
        self.scheduler.handle(kind)
    }

    // ── Read accessors ────────────────────────────────────────────────

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn active_filter(&self) -> FilterKind {
        self.filter
    }

    pub fn filtered(&self) -> Vec<&Signal> {
        self.filtered.iter().map(|&i| &self.signals[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    /// Eased stat values for display.
    pub fn displayed_stats(&self) -> Aggregates {
        self.scheduler.displayed_stats()
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn rotation(&self) -> u32 {
        self.scheduler.rotation()
    }

    pub fn scan_offset(&self) -> u32 {
        self.scheduler.scan_offset()
    }

    pub fn raw_ticker_offset(&self) -> i64 {
        self.scheduler.ticker_offset()
    }

    /// The ticker strip over the full set at the current scroll position.
    pub fn ticker(&self) -> TickerStrip<'_> {
        TickerStrip::new(&self.signals, &self.config.ticker, self.raw_ticker_offset())
    }

    pub fn clock(&self) -> Duration {
        self.scheduler.clock()
    }

    /// Shortest animation period, for render-loop pacing.
    pub fn frame_interval(&self) -> Duration {
        self.scheduler.min_period()
    }

    /// Filtered cards revealed so far by the stagger.
    pub fn visible_card_count(&self) -> usize {
        self.reveal.visible_count(self.filtered.len(), self.scheduler.clock())
    }

    pub fn trending_narratives(&self) -> Vec<NarrativeHeat> {
        aggregate::trending_narratives(&self.signals, TRENDING_LIMIT)
    }

    pub fn top_devs(&self) -> Vec<DevRate> {
        aggregate::top_devs(&self.signals, TOP_DEVS_LIMIT)
    }

    pub fn alert(&self) -> Option<Alert> {
        aggregate::insider_alert(&self.signals)
    }

    /// Everything a render surface consumes at `now`, in serializable form.
    pub fn snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        let ticker = self.ticker();
        DashboardSnapshot {
            clock_ms: self.clock().as_millis() as u64,
            active_filter: self.filter,
            aggregates: self.aggregates,
            displayed_stats: self.displayed_stats(),
            signals: self
                .filtered()
                .into_iter()
                .map(|s| SignalView::new(s, now))
                .collect(),
            blips: self.blips.iter().map(BlipView::from).collect(),
            rotation: self.rotation(),
            scan_offset: self.scan_offset(),
            raw_ticker_offset: self.raw_ticker_offset(),
            ticker_offset: ticker.offset(),
            trending_narratives: self.trending_narratives(),
            top_devs: self.top_devs(),
            alert: self.alert(),
        }
    }
}

/// A filtered signal with its display derivations resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalView {
    pub id: SignalId,
    pub ticker: String,
    pub token_address: String,
    pub score: u8,
    pub score_bucket: ScoreBucket,
    pub bond_potential: BondPotential,
    pub bond_style: BondStyle,
    pub insider_buys: u32,
    pub profitable_wallets: u32,
    pub dev_bond_rate: u8,
    pub narrative: String,
    pub bundler_activity: bool,
    pub price_change: String,
    pub market_cap: String,
    pub elapsed: String,
}

impl SignalView {
    pub fn new(signal: &Signal, now: DateTime<Utc>) -> Self {
        Self {
            id: signal.id.clone(),
            ticker: signal.ticker.clone(),
            token_address: signal.token_address.clone(),
            score: signal.score,
            score_bucket: signal.score_bucket(),
            bond_potential: signal.bond_potential,
            bond_style: signal.bond_style(),
            insider_buys: signal.insider_buys,
            profitable_wallets: signal.profitable_wallets,
            dev_bond_rate: signal.dev_bond_rate,
            narrative: signal.narrative.clone(),
            bundler_activity: signal.bundler_activity,
            price_change: signal.price_change_text(),
            market_cap: signal.market_cap_display.clone(),
            elapsed: signal.elapsed_label(now),
        }
    }
}

/// A blip with its cartesian projection.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipView {
    pub angle_degrees: f64,
    pub radius_units: f64,
    pub x: f64,
    pub y: f64,
}

impl From<&Blip> for BlipView {
    fn from(blip: &Blip) -> Self {
        let (x, y) = blip.project();
        Self {
            angle_degrees: blip.angle_degrees,
            radius_units: blip.radius_units,
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub clock_ms: u64,
    pub active_filter: FilterKind,
    pub aggregates: Aggregates,
    pub displayed_stats: Aggregates,
    pub signals: Vec<SignalView>,
    pub blips: Vec<BlipView>,
    pub rotation: u32,
    pub scan_offset: u32,
    pub raw_ticker_offset: i64,
    pub ticker_offset: i64,
    pub trending_narratives: Vec<NarrativeHeat>,
    pub top_devs: Vec<DevRate>,
    pub alert: Option<Alert>,
}
