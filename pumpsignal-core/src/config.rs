//! Dashboard configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! reference timings: 50ms rotation and scan ticks, 30ms ticker ticks, and a
//! 30-step, one-second stat counter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::radar::RadarGeometry;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub rotation_period_ms: u64,
    pub rotation_step_deg: u32,
    pub scan_period_ms: u64,
    pub ticker_period_ms: u64,
    pub counter_duration_ms: u64,
    pub counter_steps: u32,
    pub reveal_stagger_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_period_ms: 50,
            rotation_step_deg: 2,
            scan_period_ms: 50,
            ticker_period_ms: 30,
            counter_duration_ms: 1000,
            counter_steps: 30,
            reveal_stagger_ms: 100,
        }
    }
}

impl AnimationConfig {
    pub fn rotation_period(&self) -> Duration {
        Duration::from_millis(self.rotation_period_ms)
    }

    pub fn scan_period(&self) -> Duration {
        Duration::from_millis(self.scan_period_ms)
    }

    pub fn ticker_period(&self) -> Duration {
        Duration::from_millis(self.ticker_period_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Master seed for layout jitter.
    pub seed: u64,
    pub jitter_deg: f64,
    pub min_radius: f64,
    pub radius_span: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        let geometry = RadarGeometry::default();
        Self {
            seed: 0x5EED,
            jitter_deg: geometry.jitter_deg,
            min_radius: geometry.min_radius,
            radius_span: geometry.radius_span,
        }
    }
}

impl RadarConfig {
    pub fn geometry(&self) -> RadarGeometry {
        RadarGeometry {
            jitter_deg: self.jitter_deg,
            min_radius: self.min_radius,
            radius_span: self.radius_span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Layout width of one ticker item, in scroll units.
    pub item_width: u32,
    /// How many back-to-back copies of the set make up the strip.
    pub repeat: usize,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            item_width: 280,
            repeat: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// JSON or TOML signal file. `None` uses the built-in mock feed.
    pub path: Option<PathBuf>,
    /// Re-fetch interval; 0 means reload on demand only.
    pub refresh_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub animation: AnimationConfig,
    pub radar: RadarConfig,
    pub ticker: TickerConfig,
    pub feed: FeedConfig,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.animation;
        let periods = [
            ("rotation_period_ms", a.rotation_period_ms),
            ("scan_period_ms", a.scan_period_ms),
            ("ticker_period_ms", a.ticker_period_ms),
            ("counter_duration_ms", a.counter_duration_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("animation.{name} must be > 0")));
            }
        }
        if a.counter_steps == 0 {
            return Err(ConfigError::Invalid("animation.counter_steps must be > 0".into()));
        }
        if self.ticker.item_width == 0 {
            return Err(ConfigError::Invalid("ticker.item_width must be > 0".into()));
        }
        if self.ticker.repeat == 0 {
            return Err(ConfigError::Invalid("ticker.repeat must be > 0".into()));
        }
        let r = &self.radar;
        if !(r.jitter_deg >= 0.0 && r.min_radius >= 0.0 && r.radius_span >= 0.0) {
            return Err(ConfigError::Invalid(
                "radar jitter and radii must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.animation.rotation_period(), Duration::from_millis(50));
        assert_eq!(config.animation.ticker_period(), Duration::from_millis(30));
        assert_eq!(config.ticker.item_width, 280);
        assert!(config.feed.path.is_none());
    }

    #[test]
    fn partial_sections_override() {
        let config = DashboardConfig::from_toml(
            r#"
            [animation]
            ticker_period_ms = 15

            [radar]
            seed = 7

            [feed]
            path = "signals.json"
            refresh_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.ticker_period_ms, 15);
        assert_eq!(config.animation.scan_period_ms, 50);
        assert_eq!(config.radar.seed, 7);
        assert_eq!(config.radar.geometry(), RadarGeometry::default());
        assert_eq!(config.feed.path, Some(PathBuf::from("signals.json")));
        assert_eq!(config.feed.refresh_secs, 30);
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = DashboardConfig::from_toml("[animation]\nscan_period_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("scan_period_ms"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DashboardConfig::from_toml("[animation\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err =
            DashboardConfig::from_file(Path::new("/nonexistent/pumpsignal.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
