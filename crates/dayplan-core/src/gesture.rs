#![forbid(unsafe_code)]

//! Gesture math: raw drag translations → snapped minute/lane deltas.
//!
//! The gesture source reports pointer translations in pixels. These helpers
//! convert them into the engine's coordinate space without touching any item
//! state; they are called on every input sample while a drag is in progress.
//!
//! # Invariants
//!
//! 1. Minute deltas are always multiples of the snap granularity.
//! 2. `origin_lane + lane_delta` always lies in `[0, lane_count - 1]`.
//! 3. Degenerate metrics (zero hour height, zero lane stride) yield zero deltas.
//!
//! # Failure Modes
//!
//! None. Non-finite translations are treated as zero.

use serde::{Deserialize, Serialize};

use crate::geometry::TimelineMetrics;

/// Informational deltas for an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewDelta {
    /// Snapped time delta in minutes (start for moves, end for resizes).
    pub minutes: i64,
    /// Clamped lane delta.
    pub lane_delta: i32,
    /// Lane the block would land in.
    pub target_lane: u16,
}

impl PreviewDelta {
    /// Whether the preview would change anything on commit.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.minutes == 0 && self.lane_delta == 0
    }
}

/// Round `minutes` to the nearest multiple of `snap` (half away from zero).
///
/// A zero snap granularity is treated as 1.
#[must_use]
pub fn snap_minutes(minutes: i64, snap: u32) -> i64 {
    let snap = i64::from(snap.max(1));
    let steps = (minutes as f64 / snap as f64).round() as i64;
    steps * snap
}

/// Vertical translation → snapped minute delta.
#[must_use]
pub fn snapped_minutes_for_dy(dy: f64, metrics: &TimelineMetrics, snap: u32) -> i64 {
    if !dy.is_finite() || metrics.hour_height <= 0.0 {
        return 0;
    }
    let minutes = (dy / metrics.hour_height * 60.0).round() as i64;
    snap_minutes(minutes, snap)
}

/// Horizontal translation → lane delta, clamped so the target lane stays in
/// `[0, lane_count - 1]`.
#[must_use]
pub fn lane_delta(dx: f64, metrics: &TimelineMetrics, origin_lane: u16, lane_count: u16) -> i32 {
    let stride = metrics.lane_stride();
    if !dx.is_finite() || stride <= 0.0 {
        return 0;
    }
    let raw = (dx / stride).round() as i64;
    let last = i64::from(lane_count.max(1) - 1);
    let origin = i64::from(origin_lane).min(last);
    let target = (origin + raw).clamp(0, last);
    // Both ends fit in u16, so the difference fits in i32.
    (target - i64::from(origin_lane)) as i32
}

/// Preview for a move gesture: time and lane deltas together.
#[must_use]
pub fn preview_move(
    dx: f64,
    dy: f64,
    metrics: &TimelineMetrics,
    origin_lane: u16,
    lane_count: u16,
    snap: u32,
) -> PreviewDelta {
    let lane_delta = lane_delta(dx, metrics, origin_lane, lane_count);
    let target = i64::from(origin_lane) + i64::from(lane_delta);
    PreviewDelta {
        minutes: snapped_minutes_for_dy(dy, metrics, snap),
        lane_delta,
        target_lane: u16::try_from(target).unwrap_or(0),
    }
}

/// Preview for a resize gesture: only the end boundary moves.
#[must_use]
pub fn preview_resize(dy: f64, metrics: &TimelineMetrics, origin_lane: u16, snap: u32) -> PreviewDelta {
    PreviewDelta {
        minutes: snapped_minutes_for_dy(dy, metrics, snap),
        lane_delta: 0,
        target_lane: origin_lane,
    }
}
