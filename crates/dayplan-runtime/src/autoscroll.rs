#![forbid(unsafe_code)]

//! Edge auto-scroll while dragging near the viewport's top or bottom.
//!
//! [`AutoScroller`] is an explicit two-state machine (`Idle` / `Active`).
//! Pointer samples call [`AutoScroller::update_drag`], which recomputes the
//! scroll velocity; each frame calls [`AutoScroller::tick`] with the elapsed
//! time, which integrates the velocity into a clamped offset.
//!
//! # Velocity ramp
//!
//! With `start = edge_threshold` and `stop = start + hysteresis`, a pointer
//! at distance `d` from an edge scrolls at
//!
//! ```text
//! d <= start            : max_speed * (1 - d / start)^2
//! start < d <= stop     : max_speed * (1 - d / stop)^2   (only if already engaged)
//! otherwise             : 0, engagement dropped
//! ```
//!
//! Upward scrolling is negative. When both edges qualify (very short
//! viewports) the nearer edge wins, the top edge on ties.
//!
//! # Invariants
//!
//! 1. The offset always stays within `[0, max_offset]`.
//! 2. `tick` on an idle scroller changes nothing and reports nothing.
//! 3. `stop` is idempotent and leaves the scroller idle with zero velocity.
//!
//! # Failure Modes
//!
//! - Non-finite pointer positions or viewport heights produce zero velocity.
//! - Very large `dt`: callers cap it; [`AutoScrollDriver`] uses
//!   `max_frame_delta`.

use std::time::Duration;

use dayplan_core::FrameClock;
use web_time::Instant;

use crate::viewport::ViewportHost;

const TARGET: &str = "dayplan.autoscroll";

/// Default distance from an edge (px) at which scrolling engages.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 64.0;
/// Default extra band (px) that keeps an engaged scroll running.
pub const DEFAULT_HYSTERESIS: f64 = 24.0;
/// Default peak speed (px/s).
pub const DEFAULT_MAX_SPEED: f64 = 900.0;
/// Default speed (px/s) at or below which scrolling stops.
pub const DEFAULT_EPSILON: f64 = 0.5;
/// Default cap on a single frame's elapsed time.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Auto-scroll tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Engage distance from an edge, in px.
    pub edge_threshold: f64,
    /// Extra band beyond the threshold that sustains an engaged scroll, in px.
    pub hysteresis: f64,
    /// Peak speed, in px/s.
    pub max_speed: f64,
    /// Speed below which the controller goes idle, in px/s.
    pub epsilon: f64,
    /// Longest frame delta the driver will integrate in one tick.
    pub max_frame_delta: Duration,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            hysteresis: DEFAULT_HYSTERESIS,
            max_speed: DEFAULT_MAX_SPEED,
            epsilon: DEFAULT_EPSILON,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl AutoScrollConfig {
    /// Set the edge threshold (builder pattern).
    #[must_use]
    pub const fn with_edge_threshold(mut self, px: f64) -> Self {
        self.edge_threshold = px;
        self
    }

    /// Set the hysteresis band (builder pattern).
    #[must_use]
    pub const fn with_hysteresis(mut self, px: f64) -> Self {
        self.hysteresis = px;
        self
    }

    /// Set the peak speed (builder pattern).
    #[must_use]
    pub const fn with_max_speed(mut self, px_per_sec: f64) -> Self {
        self.max_speed = px_per_sec;
        self
    }

    /// Set the idle epsilon (builder pattern).
    #[must_use]
    pub const fn with_epsilon(mut self, px_per_sec: f64) -> Self {
        self.epsilon = px_per_sec;
        self
    }

    /// Set the frame delta cap (builder pattern).
    #[must_use]
    pub const fn with_max_frame_delta(mut self, dt: Duration) -> Self {
        self.max_frame_delta = dt;
        self
    }

    fn start(&self) -> f64 {
        self.edge_threshold.max(0.0)
    }

    fn stop(&self) -> f64 {
        self.start() + self.hysteresis.max(0.0)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoScrollPhase {
    /// No tick source needed.
    #[default]
    Idle,
    /// A drag is in progress; ticks integrate the velocity.
    Active,
}

/// Edge the scroll is engaged toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the top edge (offset decreasing).
    Up,
    /// Toward the bottom edge (offset increasing).
    Down,
}

impl ScrollDirection {
    /// Velocity sign for this direction.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up => -1.0,
            Self::Down => 1.0,
        }
    }
}

/// Quadratic ramp: 1 at the edge, 0 at `limit`.
fn ramp(distance: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }
    let t = 1.0 - distance.clamp(0.0, limit) / limit;
    t * t
}

/// Edge auto-scroll state machine.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    phase: AutoScrollPhase,
    velocity: f64,
    offset: f64,
    max_offset: f64,
    engaged: Option<ScrollDirection>,
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(AutoScrollConfig::default())
    }
}

impl AutoScroller {
    /// Create an idle scroller at offset 0.
    #[must_use]
    pub const fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            phase: AutoScrollPhase::Idle,
            velocity: 0.0,
            offset: 0.0,
            max_offset: 0.0,
            engaged: None,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> AutoScrollPhase {
        self.phase
    }

    /// Whether ticks are needed.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == AutoScrollPhase::Active
    }

    /// Current velocity in px/s (negative scrolls up).
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current offset in px.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Largest reachable offset in px.
    #[must_use]
    pub const fn max_offset(&self) -> f64 {
        self.max_offset
    }

    /// Edge the scroll is currently engaged toward.
    #[must_use]
    pub const fn engaged(&self) -> Option<ScrollDirection> {
        self.engaged
    }

    /// Sync the offset from the host, clamped into range.
    pub fn set_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max_offset);
        }
    }

    /// Sync the scrollable range from the host. The offset is re-clamped.
    pub fn set_max_offset(&mut self, max_offset: f64) {
        self.max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            0.0
        };
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }

    /// Feed a pointer sample: `y` relative to the viewport's top edge.
    ///
    /// Enters `Active` and recomputes the velocity.
    pub fn update_drag(&mut self, y: f64, viewport_height: f64) {
        if self.phase == AutoScrollPhase::Idle {
            tracing::trace!(target: TARGET, y, viewport_height, "auto-scroll active");
        }
        self.phase = AutoScrollPhase::Active;

        if !y.is_finite() || !viewport_height.is_finite() {
            self.velocity = 0.0;
            self.engaged = None;
            return;
        }

        let start = self.config.start();
        let stop = self.config.stop();
        let top = y;
        let bottom = viewport_height - y;

        let (direction, speed) = match (top <= start, bottom <= start) {
            (true, true) if top <= bottom => (Some(ScrollDirection::Up), ramp(top, start)),
            (true, true) | (false, true) => (Some(ScrollDirection::Down), ramp(bottom, start)),
            (true, false) => (Some(ScrollDirection::Up), ramp(top, start)),
            (false, false) => match self.engaged {
                Some(ScrollDirection::Up) if top <= stop => {
                    (Some(ScrollDirection::Up), ramp(top, stop))
                }
                Some(ScrollDirection::Down) if bottom <= stop => {
                    (Some(ScrollDirection::Down), ramp(bottom, stop))
                }
                _ => (None, 0.0),
            },
        };

        if direction != self.engaged {
            tracing::trace!(target: TARGET, ?direction, "auto-scroll engagement changed");
        }
        self.engaged = direction;
        self.velocity = direction.map_or(0.0, |dir| dir.sign() * self.config.max_speed * speed);
    }

    /// Advance by `dt`. Returns the new offset while active.
    ///
    /// Goes idle once the speed is within epsilon or the offset hits the
    /// bound it is moving toward.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        if self.phase == AutoScrollPhase::Idle {
            return None;
        }
        let next = (self.offset + self.velocity * dt.as_secs_f64()).clamp(0.0, self.max_offset);
        self.offset = next;

        let saturated = (self.velocity < 0.0 && next <= 0.0)
            || (self.velocity > 0.0 && next >= self.max_offset);
        if self.velocity.abs() <= self.config.epsilon || saturated {
            self.phase = AutoScrollPhase::Idle;
            self.velocity = 0.0;
            tracing::trace!(target: TARGET, offset = next, saturated, "auto-scroll idle");
        }
        Some(next)
    }

    /// Halt immediately. Idempotent.
    pub fn stop(&mut self) {
        if self.phase == AutoScrollPhase::Active {
            tracing::trace!(target: TARGET, offset = self.offset, "auto-scroll stopped");
        }
        self.phase = AutoScrollPhase::Idle;
        self.velocity = 0.0;
        self.engaged = None;
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Binds an [`AutoScroller`] to a frame clock and a viewport host.
///
/// The driver measures frame deltas from the injected clock, caps them at
/// `max_frame_delta`, and writes each new offset to the host.
#[derive(Debug)]
pub struct AutoScrollDriver<C: FrameClock> {
    scroller: AutoScroller,
    clock: C,
    last_frame: Option<Instant>,
}

impl<C: FrameClock> AutoScrollDriver<C> {
    /// Create a driver around `scroller`, reading time from `clock`.
    #[must_use]
    pub const fn new(scroller: AutoScroller, clock: C) -> Self {
        Self {
            scroller,
            clock,
            last_frame: None,
        }
    }

    /// The wrapped controller.
    #[must_use]
    pub const fn scroller(&self) -> &AutoScroller {
        &self.scroller
    }

    /// The injected clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Feed a pointer sample, syncing offset and range from `host` first.
    pub fn update_drag(&mut self, y: f64, host: &impl ViewportHost) {
        self.scroller.set_max_offset(host.max_scroll_offset());
        self.scroller.set_offset(host.scroll_offset());
        if !self.scroller.is_active() {
            self.last_frame = Some(self.clock.now());
        }
        self.scroller.update_drag(y, host.viewport_height());
    }

    /// Run one frame. Returns whether the tick source should keep running.
    pub fn frame(&mut self, host: &mut impl ViewportHost) -> bool {
        if !self.scroller.is_active() {
            self.last_frame = None;
            return false;
        }
        let now = self.clock.now();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last))
            .min(self.scroller.config().max_frame_delta);
        self.last_frame = Some(now);

        if let Some(offset) = self.scroller.tick(dt) {
            host.set_scroll_offset(offset);
        }
        let running = self.scroller.is_active();
        if !running {
            self.last_frame = None;
        }
        running
    }

    /// End the drag: stop scrolling and forget the frame origin.
    pub fn stop(&mut self) {
        self.scroller.stop();
        self.last_frame = None;
    }
}
