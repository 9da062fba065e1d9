#![forbid(unsafe_code)]

//! Frame clocks: injectable time sources for frame-driven controllers.
//!
//! Controllers that integrate over time (auto-scroll) never read the wall
//! clock directly. They ask a [`FrameClock`] for the current instant, which
//! lets tests drive them with a [`ManualClock`] and no real time passing.

use std::cell::Cell;
use std::time::Duration;

use web_time::Instant;

/// A monotonic time source sampled once per display frame.
pub trait FrameClock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock implementation backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FrameClock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock advanced explicitly by the caller.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dayplan_core::clock::{FrameClock, ManualClock};
///
/// let clock = ManualClock::new();
/// let t0 = clock.now();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(clock.now() - t0, Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(dt));
    }

    /// Total time advanced since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
