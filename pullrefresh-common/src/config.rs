//! Gesture configuration
//!
//! Every field has a default so hosts can supply partial JSON:
//! 1. `threshold` and `is_loading` are the public contract
//! 2. `tuning` groups the fixed constants of the gesture in one place

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Error, Result};

/// Pull distance required to arm a refresh, in CSS pixels
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Top-level pull-to-refresh configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullConfig {
    /// Pull distance required to arm a refresh
    pub threshold: f64,
    /// Initial value of the external loading signal
    pub is_loading: bool,
    /// When false all input is ignored
    pub enabled: bool,
    /// Resistance factors and timing constants
    pub tuning: PullTuning,
}

/// Resistance factors and timing constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullTuning {
    /// Multiplier applied to touch/mouse displacement
    pub resistance: f64,
    /// Multiplier applied to upward wheel deltas
    pub wheel_pull_factor: f64,
    /// Multiplier applied to downward wheel deltas
    pub wheel_push_factor: f64,
    /// Wheel pull distance is clamped to `threshold * max_pull_factor`
    pub max_pull_factor: f64,
    /// Page offsets up to this value still count as "at top"
    pub scroll_tolerance: f64,
    /// Pause between refresh completion and indicator reset
    pub settle_delay_ms: u64,
    /// Wheel silence that ends a wheel gesture
    pub wheel_idle_ms: u64,
    /// Minimum spacing between visible wheel updates
    pub wheel_throttle_ms: u64,
    /// Single upward wheel delta that triggers immediately once armed
    pub wheel_fast_delta: f64,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            is_loading: false,
            enabled: true,
            tuning: PullTuning::default(),
        }
    }
}

impl Default for PullTuning {
    fn default() -> Self {
        Self {
            resistance: 0.4,
            wheel_pull_factor: 0.3,
            wheel_push_factor: 0.5,
            max_pull_factor: 2.0,
            scroll_tolerance: 5.0,
            settle_delay_ms: 500,
            wheel_idle_ms: 50,
            wheel_throttle_ms: 16,
            wheel_fast_delta: 50.0,
        }
    }
}

impl PullConfig {
    /// Default configuration with a custom threshold
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the threshold and tuning factors are usable
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }

        let factors = [
            ("resistance", self.tuning.resistance),
            ("wheel_pull_factor", self.tuning.wheel_pull_factor),
            ("wheel_push_factor", self.tuning.wheel_push_factor),
            ("max_pull_factor", self.tuning.max_pull_factor),
            ("scroll_tolerance", self.tuning.scroll_tolerance),
            ("wheel_fast_delta", self.tuning.wheel_fast_delta),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.tuning.max_pull_factor < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "max_pull_factor must be at least 1, got {}",
                self.tuning.max_pull_factor
            )));
        }

        Ok(())
    }

    /// Upper bound for the wheel pull distance
    pub fn max_pull(&self) -> f64 {
        self.threshold * self.tuning.max_pull_factor
    }
}

impl PullTuning {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn wheel_idle(&self) -> Duration {
        Duration::from_millis(self.wheel_idle_ms)
    }

    pub fn wheel_throttle(&self) -> Duration {
        Duration::from_millis(self.wheel_throttle_ms)
    }
}
