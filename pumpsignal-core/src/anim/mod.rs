//! Animation: fixed-period drivers on a shared clock.
//!
//! - `driver`: `(period, transition)` pairs with cancellation handles
//! - `counter`: 30-step ease-out stat counters
//! - `reveal`: staggered card reveal
//! - `scheduler`: the dashboard's rotation, scan, ticker and counter drivers

pub mod counter;
pub mod driver;
pub mod reveal;
pub mod scheduler;

pub use counter::{ease_out_cubic, eased_value, CounterAnimator};
pub use driver::{CancelHandle, PeriodicDriver};
pub use reveal::RevealClock;
pub use scheduler::{AnimationScheduler, DriverKind, TickReport};
