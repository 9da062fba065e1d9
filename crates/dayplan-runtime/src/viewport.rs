#![forbid(unsafe_code)]

//! The scroll container seam.

use dayplan_core::TimelineMetrics;

/// A vertically scrolling viewport over the timeline content.
pub trait ViewportHost {
    /// Current scroll offset in px.
    fn scroll_offset(&self) -> f64;

    /// Scroll to `offset` px. Hosts clamp to their own range.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Visible height in px.
    fn viewport_height(&self) -> f64;

    /// Largest valid scroll offset in px.
    fn max_scroll_offset(&self) -> f64;
}

/// In-memory viewport with a fixed height and content height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    offset: f64,
    height: f64,
    content_height: f64,
}

impl FixedViewport {
    /// Viewport `height` px tall over `content_height` px of content.
    #[must_use]
    pub fn new(height: f64, content_height: f64) -> Self {
        Self {
            offset: 0.0,
            height: height.max(0.0),
            content_height: content_height.max(0.0),
        }
    }

    /// Viewport over a full 24-hour axis drawn with `metrics`.
    #[must_use]
    pub fn for_timeline(height: f64, metrics: &TimelineMetrics) -> Self {
        Self::new(height, metrics.content_height())
    }

    /// Start at `offset` (builder pattern).
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.set_scroll_offset(offset);
        self
    }
}

impl ViewportHost for FixedViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max_scroll_offset());
        }
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }
}
