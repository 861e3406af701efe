//! Radar layout: one blip per high-potential signal, in polar coordinates.
//!
//! The plane is normalized to [0,100]×[0,100] with the center at (50,50) and
//! y growing downward. Jitter is drawn from an injected RNG, so a layout is
//! reproducible from its seed but reshuffles on every recompute.

use rand::Rng;
use serde::Serialize;

pub const CENTER: f64 = 50.0;
/// Outer ring radius, also the sweep arm length.
pub const OUTER_RADIUS: f64 = 45.0;

/// Tunable layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarGeometry {
    /// Upper bound (exclusive) of the angular jitter, degrees.
    pub jitter_deg: f64,
    pub min_radius: f64,
    /// Radii fall in `[min_radius, min_radius + radius_span)`.
    pub radius_span: f64,
}

impl Default for RadarGeometry {
    fn default() -> Self {
        Self {
            jitter_deg: 30.0,
            min_radius: 25.0,
            radius_span: 20.0,
        }
    }
}

/// A single radar marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blip {
    pub index: usize,
    /// Normalized into [0, 360).
    pub angle_degrees: f64,
    pub radius_units: f64,
}

impl Blip {
    /// Cartesian position on the normalized plane.
    pub fn project(&self) -> (f64, f64) {
        let theta = self.angle_degrees.to_radians();
        (
            CENTER + self.radius_units * theta.cos(),
            CENTER + self.radius_units * theta.sin(),
        )
    }
}

/// Lay out `count` blips evenly around the dial with random jitter.
pub fn layout_blips<R: Rng + ?Sized>(
    count: usize,
    geometry: &RadarGeometry,
    rng: &mut R,
) -> Vec<Blip> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = 360.0 / count as f64;
    (0..count)
        .map(|index| {
            let jitter = rng.gen::<f64>() * geometry.jitter_deg;
            let radius = geometry.min_radius + rng.gen::<f64>() * geometry.radius_span;
            Blip {
                index,
                angle_degrees: normalize_degrees(spacing * index as f64 + jitter),
                radius_units: radius,
            }
        })
        .collect()
}

/// Tip of the sweep arm at `rotation_deg`, rotating clockwise from 12 o'clock.
pub fn sweep_endpoint(rotation_deg: f64) -> (f64, f64) {
    let theta = rotation_deg.to_radians();
    (
        CENTER + OUTER_RADIUS * theta.sin(),
        CENTER - OUTER_RADIUS * theta.cos(),
    )
}

fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
