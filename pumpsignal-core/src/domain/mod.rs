//! Domain types for the signal dashboard

pub mod signal;

pub use signal::{
    elapsed_label, BondPotential, BondStyle, Elapsed, ScoreBucket, Signal, SignalId, Tone,
    PLACEHOLDER_TICKER,
};
