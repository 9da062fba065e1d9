#![forbid(unsafe_code)]

//! Tunables shared by the layout pass and the mutation engine.

use serde::{Deserialize, Serialize};

/// Default fallback duration for open-ended items.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;
/// Default time-grid granularity for drag previews.
pub const DEFAULT_SNAP_MINUTES: u32 = 5;
/// Default floor on item duration after a move or resize.
pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 15;
/// Default ceiling on how far a resize may stretch an item.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 1;

/// Timeline tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Fallback duration for items without an explicit end.
    pub default_duration_minutes: u32,
    /// Snap granularity for drag-derived time deltas.
    pub snap_minutes: u32,
    /// Minimum duration enforced on commit.
    pub min_duration_minutes: u32,
    /// Maximum span (in days) a resize may produce.
    pub max_span_days: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            snap_minutes: DEFAULT_SNAP_MINUTES,
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
        }
    }
}

impl TimelineConfig {
    /// Set the default duration (builder pattern).
    #[must_use]
    pub const fn with_default_duration(mut self, minutes: u32) -> Self {
        self.default_duration_minutes = minutes;
        self
    }

    /// Set the snap granularity (builder pattern).
    #[must_use]
    pub const fn with_snap(mut self, minutes: u32) -> Self {
        self.snap_minutes = minutes;
        self
    }

    /// Set the minimum duration (builder pattern).
    #[must_use]
    pub const fn with_min_duration(mut self, minutes: u32) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    /// Set the maximum resize span (builder pattern).
    #[must_use]
    pub const fn with_max_span_days(mut self, days: u32) -> Self {
        self.max_span_days = days;
        self
    }

    /// Minimum duration with a floor of one minute, so committed items are
    /// never empty.
    #[must_use]
    pub fn effective_min_duration(&self) -> i64 {
        i64::from(self.min_duration_minutes.max(1))
    }

    /// Longest duration a resize may produce, never below the minimum.
    #[must_use]
    pub fn max_span_minutes(&self) -> i64 {
        (i64::from(self.max_span_days) * dayplan_core::MINUTES_PER_DAY)
            .max(self.effective_min_duration())
    }
}
