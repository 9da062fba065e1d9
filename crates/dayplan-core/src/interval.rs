#![forbid(unsafe_code)]

//! Interval normalization: items → day-relative display segments.
//!
//! [`normalize`] maps an [`Item`] onto the `[0, 1440]` minute axis of a
//! [`DayWindow`], recording whether the raw interval spilled past either edge.
//!
//! # Invariants
//!
//! 1. `display_start <= MINUTES_PER_DAY` and `display_end <= MINUTES_PER_DAY`.
//! 2. `display_end > display_start` for every segment; degenerate, inverted, or
//!    fully out-of-window items become a [`MIN_SLIVER_MINUTES`] sliver.
//! 3. `clipped_start` / `clipped_end` reflect the raw, unclamped interval.
//!
//! # Failure Modes
//!
//! None. Every item produces a valid segment.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemId};
use crate::time::{DayWindow, MINUTES_PER_DAY};

/// Minimum visible height of a segment, in minutes.
pub const MIN_SLIVER_MINUTES: u16 = 15;

const DAY_END: u16 = MINUTES_PER_DAY as u16;

/// A display-ready, day-clamped interval with its assigned lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Item this segment renders.
    pub item_id: ItemId,
    /// Start minute within the day (inclusive).
    pub display_start: u16,
    /// End minute within the day (exclusive).
    pub display_end: u16,
    /// The raw interval begins before the day window.
    pub clipped_start: bool,
    /// The raw interval ends after the day window.
    pub clipped_end: bool,
    /// Assigned lane (0 until a layout pass places the segment).
    pub lane: u16,
}

impl Segment {
    /// Displayed length in minutes.
    #[inline]
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.display_end - self.display_start
    }

    /// Half-open overlap test on the displayed range.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.display_start < other.display_end && other.display_start < self.display_end
    }

    /// Whether `minute` falls inside `[display_start, display_end)`.
    #[inline]
    #[must_use]
    pub const fn contains_minute(&self, minute: u16) -> bool {
        minute >= self.display_start && minute < self.display_end
    }
}

/// End timestamp of `item`, substituting the default duration when open-ended.
#[inline]
#[must_use]
pub fn effective_end(item: &Item, default_duration_minutes: u32) -> NaiveDateTime {
    item.effective_end(default_duration_minutes)
}

/// Normalize an item into a display segment for `day`.
#[must_use]
pub fn normalize(item: &Item, day: &DayWindow, default_duration_minutes: u32) -> Segment {
    let raw_start = day.minutes_until(item.start);
    let raw_end = day.minutes_until(effective_end(item, default_duration_minutes));

    let mut start = clamp_to_day(raw_start);
    let mut end = clamp_to_day(raw_end);

    if end <= start {
        end = start.saturating_add(MIN_SLIVER_MINUTES).min(DAY_END);
        if end <= start {
            // Starts at or after the day end: anchor the sliver to the last
            // visible quarter hour.
            start = DAY_END - MIN_SLIVER_MINUTES;
            end = DAY_END;
        }
    }

    Segment {
        item_id: item.id,
        display_start: start,
        display_end: end,
        clipped_start: raw_start < 0,
        clipped_end: raw_end > MINUTES_PER_DAY,
        lane: 0,
    }
}

fn clamp_to_day(minute: i64) -> u16 {
    // Clamped into 0..=1440, so the narrowing cannot truncate.
    minute.clamp(0, MINUTES_PER_DAY) as u16
}
