//! Animation scheduler — one clock, four independent drivers.
//!
//! Drivers never read or write each other's state, so their order within a
//! tick does not matter. After `teardown` every driver is cancelled and
//! `advance` is a guarded no-op.

use std::time::Duration;

use tracing::{debug, info};

use crate::aggregate::Aggregates;
use crate::config::AnimationConfig;

use super::counter::CounterAnimator;
use super::driver::{CancelHandle, PeriodicDriver};

/// Identifies one of the scheduler's drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    Rotation,
    Scan,
    TickerScroll,
    StatCounter,
}

impl DriverKind {
    pub const ALL: [DriverKind; 4] = [
        DriverKind::Rotation,
        DriverKind::Scan,
        DriverKind::TickerScroll,
        DriverKind::StatCounter,
    ];
}

/// Ticks fired per driver during one `advance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub rotation: u64,
    pub scan: u64,
    pub ticker: u64,
    pub counter: u32,
}

impl TickReport {
    pub fn any(&self) -> bool {
        self.rotation + self.scan + self.ticker > 0 || self.counter > 0
    }
}

#[derive(Debug)]
pub struct AnimationScheduler {
    clock: Duration,
    rotation: PeriodicDriver<u32>,
    scan: PeriodicDriver<u32>,
    ticker: PeriodicDriver<i64>,
    counter: CounterAnimator<{ Aggregates::FIELDS }>,
    torn_down: bool,
}

impl AnimationScheduler {
    pub fn new(config: &AnimationConfig) -> Self {
        let step = config.rotation_step_deg % 360;
        Self {
            clock: Duration::ZERO,
            rotation: PeriodicDriver::new("rotation", config.rotation_period(), 0, move |angle| {
                (angle + step) % 360
            }),
            scan: PeriodicDriver::new("scan", config.scan_period(), 0, |offset| (offset + 1) % 100),
            ticker: PeriodicDriver::new("ticker", config.ticker_period(), 0, |offset: i64| {
                offset.saturating_sub(1)
            }),
            counter: CounterAnimator::new(config.counter_steps, config.counter_duration()),
            torn_down: false,
        }
    }

    /// Advance the shared clock by `dt` and tick every live driver.
    pub fn advance(&mut self, dt: Duration) -> TickReport {
        if self.torn_down {
            debug!("advance after teardown ignored");
            return TickReport::default();
        }
        self.clock += dt;
        TickReport {
            rotation: self.rotation.advance(dt),
            scan: self.scan.advance(dt),
            ticker: self.ticker.advance(dt),
            counter: self.counter.advance(dt),
        }
    }

    /// Point the stat counter at new targets. Restarts it only if they changed.
    pub fn retarget_stats(&mut self, targets: Aggregates) -> bool {
        let restarted = self.counter.retarget(targets.to_array());
        if restarted {
            debug!(?targets, "stat counter restarted");
        }
        restarted
    }

    /// Elapsed time on the scheduler clock.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Radar sweep angle in whole degrees, [0, 360).
    pub fn rotation(&self) -> u32 {
        self.rotation.value()
    }

    /// Ambient scanline offset, [0, 100).
    pub fn scan_offset(&self) -> u32 {
        self.scan.value()
    }

    /// Raw ticker offset. Decreases without bound; wrap it at consumption time.
    pub fn ticker_offset(&self) -> i64 {
        self.ticker.value()
    }

    pub fn displayed_stats(&self) -> Aggregates {
        Aggregates::from_array(self.counter.displayed())
    }

    pub fn counter_running(&self) -> bool {
        self.counter.is_running()
    }

    /// Shortest driver period; a render loop polling at this rate misses no tick.
    pub fn min_period(&self) -> Duration {
        self.rotation
            .period()
            .min(self.scan.period())
            .min(self.ticker.period())
            .min(self.counter.step_period())
    }

    pub fn handle(&self, kind: DriverKind) -> CancelHandle {
        match kind {
            DriverKind::Rotation => self.rotation.handle(),
            DriverKind::Scan => self.scan.handle(),
            DriverKind::TickerScroll => self.ticker.handle(),
            DriverKind::StatCounter => self.counter.handle(),
        }
    }

    /// Cancel a single driver. Returns false if it was already cancelled.
    pub fn cancel(&self, kind: DriverKind) -> bool {
        self.handle(kind).cancel()
    }

    pub fn is_cancelled(&self, kind: DriverKind) -> bool {
        self.handle(kind).is_cancelled()
    }

    /// Cancel every driver exactly once. Safe to call repeatedly; returns how
    /// many drivers this call cancelled.
    pub fn teardown(&mut self) -> usize {
        let cancelled = DriverKind::ALL
            .iter()
            .filter(|kind| self.cancel(**kind))
            .count();
        if !self.torn_down {
            info!(
                cancelled,
                clock_ms = self.clock.as_millis() as u64,
                "animation scheduler torn down"
            );
        }
        self.torn_down = true;
        cancelled
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
