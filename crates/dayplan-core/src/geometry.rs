#![forbid(unsafe_code)]

//! Timeline geometry: minute ↔ pixel mapping and block rectangles.

use serde::{Deserialize, Serialize};

use crate::interval::Segment;
use crate::time::MINUTES_PER_DAY;

/// A block rectangle in timeline content coordinates (pixels, origin at
/// the top-left of the 00:00 row, lane 0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl BlockRect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Pixel scale of the timeline axis supplied by the viewport host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineMetrics {
    /// Vertical pixels per hour.
    pub hour_height: f64,
    /// Width of one lane column.
    pub lane_width: f64,
    /// Horizontal gap between lane columns.
    pub lane_gap: f64,
}

impl Default for TimelineMetrics {
    fn default() -> Self {
        Self {
            hour_height: 60.0,
            lane_width: 120.0,
            lane_gap: 4.0,
        }
    }
}

impl TimelineMetrics {
    /// Create metrics from the three scale parameters.
    #[must_use]
    pub const fn new(hour_height: f64, lane_width: f64, lane_gap: f64) -> Self {
        Self {
            hour_height,
            lane_width,
            lane_gap,
        }
    }

    /// Horizontal distance between the left edges of adjacent lanes.
    #[inline]
    #[must_use]
    pub fn lane_stride(&self) -> f64 {
        self.lane_width + self.lane_gap
    }

    /// Pixels per minute.
    #[inline]
    #[must_use]
    pub fn minute_height(&self) -> f64 {
        self.hour_height / 60.0
    }

    /// Vertical offset of a day-relative minute.
    #[inline]
    #[must_use]
    pub fn y_for_minute(&self, minute: f64) -> f64 {
        minute * self.minute_height()
    }

    /// Day-relative minute at a vertical offset, unclamped.
    ///
    /// Returns 0 for a degenerate (non-positive) hour height.
    #[must_use]
    pub fn minute_for_y(&self, y: f64) -> f64 {
        if self.hour_height <= 0.0 {
            return 0.0;
        }
        y / self.hour_height * 60.0
    }

    /// Total height of the 24-hour axis.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.y_for_minute(MINUTES_PER_DAY as f64)
    }

    /// Left edge of a lane column.
    #[inline]
    #[must_use]
    pub fn lane_x(&self, lane: u16) -> f64 {
        f64::from(lane) * self.lane_stride()
    }

    /// Total width occupied by `lane_count` columns (no trailing gap).
    #[must_use]
    pub fn content_width(&self, lane_count: u16) -> f64 {
        if lane_count == 0 {
            return 0.0;
        }
        f64::from(lane_count) * self.lane_width + f64::from(lane_count - 1) * self.lane_gap
    }

    /// Rectangle at which a laid-out segment is drawn.
    #[must_use]
    pub fn block_rect(&self, segment: &Segment) -> BlockRect {
        let y = self.y_for_minute(f64::from(segment.display_start));
        let height = self.y_for_minute(f64::from(segment.duration_minutes()));
        BlockRect::new(self.lane_x(segment.lane), y, self.lane_width, height)
    }
}
