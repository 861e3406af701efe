//! Fixed-period drivers and their cancellation handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shortest period a driver will accept; zero would never stop firing.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Cancellation flag shared between a driver and its owner.
///
/// Cancelling twice is a no-op. A cancelled driver ignores every later tick.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type Transition<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// A `(period, transition)` pair: each full `period` of elapsed time applies
/// `transition` once. Leftover time carries into the next advance.
pub struct PeriodicDriver<T> {
    name: &'static str,
    period: Duration,
    carry: Duration,
    value: T,
    transition: Transition<T>,
    ticks: u64,
    cancel: CancelHandle,
}

impl<T: Copy> PeriodicDriver<T> {
    pub fn new(
        name: &'static str,
        period: Duration,
        initial: T,
        transition: impl Fn(T) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            period: period.max(MIN_PERIOD),
            carry: Duration::ZERO,
            value: initial,
            transition: Box::new(transition),
            ticks: 0,
            cancel: CancelHandle::new(),
        }
    }

    /// Feed elapsed time in. Returns how many ticks fired.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        if self.cancel.is_cancelled() {
            return 0;
        }
        self.carry += dt;
        let mut fired = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            self.value = (self.transition)(self.value);
            fired += 1;
        }
        self.ticks += fired;
        fired
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) -> bool {
        self.cancel.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T: fmt::Debug> fmt::Debug for PeriodicDriver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicDriver")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("value", &self.value)
            .field("ticks", &self.ticks)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
