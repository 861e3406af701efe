//! PumpSignal Core — signal model, derived views, layout and animation state.
//!
//! This crate contains everything the dashboard computes, with no terminal code:
//! - Signal domain types and per-signal display derivations
//! - Aggregates, trending narratives, top devs and the insider alert
//! - Filter selectors over the live set
//! - Radar blip layout with seeded jitter
//! - Animation scheduler (rotation, scanline, ticker scroll, eased counters)
//! - Ticker strip wrap and visible window
//! - Signal producers (mock and file-backed) and TOML configuration
//! - The `Dashboard` facade tying it together

pub mod aggregate;
pub mod anim;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod feed;
pub mod filter;
pub mod radar;
pub mod rng;
pub mod ticker;

pub use aggregate::Aggregates;
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, ReplaceReport};
pub use domain::Signal;
pub use feed::{FeedError, SignalSource};
pub use filter::FilterKind;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: state crossing the feed worker thread is Send,
    /// and everything the render loop shares is Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<Aggregates>();
        require_sync::<Aggregates>();
        require_send::<FilterKind>();
        require_sync::<FilterKind>();
        require_send::<radar::Blip>();
        require_sync::<radar::Blip>();

        require_send::<anim::CancelHandle>();
        require_sync::<anim::CancelHandle>();
        require_send::<anim::AnimationScheduler>();
        require_sync::<anim::AnimationScheduler>();

        require_send::<Dashboard>();
        require_sync::<Dashboard>();
        require_send::<DashboardSnapshot>();
        require_send::<DashboardConfig>();

        require_send::<FeedError>();
        require_send::<ConfigError>();
        require_send::<Box<dyn SignalSource>>();
    }
}
