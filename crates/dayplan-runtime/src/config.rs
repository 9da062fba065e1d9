#![forbid(unsafe_code)]

//! Planner configuration as data.
//!
//! [`PlannerConfig`] gathers every tunable of the timeline and the auto-scroll
//! controller into one struct that can be loaded from TOML or JSON at startup
//! (feature `config-files`).
//!
//! # Loading
//!
//! ```toml
//! # dayplan.toml
//! [timeline]
//! snap_minutes = 15
//! min_duration_minutes = 10
//!
//! [autoscroll]
//! edge_threshold = 48.0
//! max_frame_delta_ms = 50
//! ```
//!
//! ```rust,ignore
//! let config = PlannerConfig::from_toml_file("dayplan.toml")?.validated()?;
//! let engine = MutationEngine::new(config.to_timeline_config(), day);
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the component default, so
//! `PlannerConfig::default()` behaves exactly like unconfigured components.
//! Missing keys in a file fall back to the same defaults.

#[cfg(feature = "config-files")]
use std::path::Path;
use std::time::Duration;

use dayplan_layout::TimelineConfig;
use serde::{Deserialize, Serialize};

use crate::autoscroll::{
    AutoScrollConfig, DEFAULT_EDGE_THRESHOLD, DEFAULT_EPSILON, DEFAULT_HYSTERESIS,
    DEFAULT_MAX_FRAME_DELTA, DEFAULT_MAX_SPEED,
};

// ---------------------------------------------------------------------------
// Top-level PlannerConfig
// ---------------------------------------------------------------------------

/// Top-level planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Layout and commit tunables.
    pub timeline: TimelineConfig,

    /// Edge auto-scroll tunables.
    pub autoscroll: AutoScrollPolicyConfig,
}

impl PlannerConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let timeline = &self.timeline;
        let scroll = &self.autoscroll;

        if timeline.default_duration_minutes == 0 {
            errors.push("timeline.default_duration_minutes must be > 0".into());
        }
        if timeline.snap_minutes == 0 {
            errors.push("timeline.snap_minutes must be > 0".into());
        }
        if timeline.min_duration_minutes == 0 {
            errors.push("timeline.min_duration_minutes must be > 0".into());
        }
        if timeline.max_span_days == 0 {
            errors.push("timeline.max_span_days must be > 0".into());
        }

        if !(scroll.edge_threshold.is_finite() && scroll.edge_threshold > 0.0) {
            errors.push(format!(
                "autoscroll.edge_threshold must be > 0, got {}",
                scroll.edge_threshold
            ));
        }
        if !(scroll.hysteresis.is_finite() && scroll.hysteresis >= 0.0) {
            errors.push(format!(
                "autoscroll.hysteresis must be >= 0, got {}",
                scroll.hysteresis
            ));
        }
        if !(scroll.max_speed.is_finite() && scroll.max_speed > 0.0) {
            errors.push(format!(
                "autoscroll.max_speed must be > 0, got {}",
                scroll.max_speed
            ));
        }
        if !(scroll.epsilon.is_finite() && scroll.epsilon >= 0.0) {
            errors.push(format!(
                "autoscroll.epsilon must be >= 0, got {}",
                scroll.epsilon
            ));
        } else if scroll.max_speed > 0.0 && scroll.epsilon >= scroll.max_speed {
            errors.push(format!(
                "autoscroll.epsilon must be < max_speed ({}), got {}",
                scroll.max_speed, scroll.epsilon
            ));
        }
        if scroll.max_frame_delta_ms == 0 {
            errors.push("autoscroll.max_frame_delta_ms must be > 0".into());
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds no problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Build a [`TimelineConfig`] from this policy.
    #[must_use]
    pub const fn to_timeline_config(&self) -> TimelineConfig {
        self.timeline
    }

    /// Build an [`AutoScrollConfig`] from this policy.
    #[must_use]
    pub fn to_autoscroll_config(&self) -> AutoScrollConfig {
        AutoScrollConfig::default()
            .with_edge_threshold(self.autoscroll.edge_threshold)
            .with_hysteresis(self.autoscroll.hysteresis)
            .with_max_speed(self.autoscroll.max_speed)
            .with_epsilon(self.autoscroll.epsilon)
            .with_max_frame_delta(Duration::from_millis(self.autoscroll.max_frame_delta_ms))
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Auto-scroll parameters in file-friendly units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollPolicyConfig {
    /// Engage distance from an edge, in px.
    pub edge_threshold: f64,
    /// Sustain band beyond the threshold, in px.
    pub hysteresis: f64,
    /// Peak speed, in px/s.
    pub max_speed: f64,
    /// Idle speed, in px/s.
    pub epsilon: f64,
    /// Frame delta cap, in milliseconds.
    pub max_frame_delta_ms: u64,
}

impl Default for AutoScrollPolicyConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            hysteresis: DEFAULT_HYSTERESIS,
            max_speed: DEFAULT_MAX_SPEED,
            epsilon: DEFAULT_EPSILON,
            max_frame_delta_ms: u64::try_from(DEFAULT_MAX_FRAME_DELTA.as_millis())
                .unwrap_or(100),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a planner configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
