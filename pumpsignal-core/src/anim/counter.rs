//! Eased stat counters.
//!
//! A run is a fixed number of discrete steps spread over a window. Step `s`
//! shows `round(target * ease_out_cubic(s / steps))`; the final step shows the
//! exact target. A new target restarts the run from zero and supersedes the
//! one in flight.

use std::time::Duration;

use super::driver::{CancelHandle, MIN_PERIOD};

/// `1 - (1 - p)^3`, with `p` clamped to [0, 1].
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Displayed value at `step` of `steps`. Exact at the last step.
pub fn eased_value(target: u32, step: u32, steps: u32) -> u32 {
    if steps == 0 || step >= steps {
        return target;
    }
    let eased = ease_out_cubic(f64::from(step) / f64::from(steps));
    (f64::from(target) * eased).round() as u32
}

#[derive(Debug)]
pub struct CounterAnimator<const N: usize> {
    steps: u32,
    step_period: Duration,
    carry: Duration,
    step: u32,
    target: [u32; N],
    displayed: [u32; N],
    cancel: CancelHandle,
}

impl<const N: usize> CounterAnimator<N> {
    /// An idle animator at zero. Call `retarget` to start a run.
    pub fn new(steps: u32, duration: Duration) -> Self {
        let steps = steps.max(1);
        Self {
            steps,
            step_period: (duration / steps).max(MIN_PERIOD),
            carry: Duration::ZERO,
            step: steps,
            target: [0; N],
            displayed: [0; N],
            cancel: CancelHandle::new(),
        }
    }

    /// Start a fresh run toward `target` if it differs from the current one.
    /// Returns true when a run was (re)started.
    pub fn retarget(&mut self, target: [u32; N]) -> bool {
        if self.cancel.is_cancelled() || target == self.target {
            return false;
        }
        self.target = target;
        self.step = 0;
        self.carry = Duration::ZERO;
        self.displayed = [0; N];
        true
    }

    /// Feed elapsed time in. Returns how many steps fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.cancel.is_cancelled() || !self.is_running() {
            return 0;
        }
        self.carry += dt;
        let mut fired = 0;
        while self.carry >= self.step_period && self.step < self.steps {
            self.carry -= self.step_period;
            self.step += 1;
            fired += 1;
        }
        if fired > 0 {
            let (step, steps) = (self.step, self.steps);
            for (shown, target) in self.displayed.iter_mut().zip(self.target) {
                *shown = eased_value(target, step, steps);
            }
        }
        if !self.is_running() {
            self.carry = Duration::ZERO;
        }
        fired
    }

    pub fn is_running(&self) -> bool {
        self.step < self.steps
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn step_period(&self) -> Duration {
        self.step_period
    }

    pub fn target(&self) -> [u32; N] {
        self.target
    }

    pub fn displayed(&self) -> [u32; N] {
        self.displayed
    }

    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) -> bool {
        self.cancel.cancel()
    }
}
