#![forbid(unsafe_code)]

//! Day windows and day-relative minute arithmetic.
//!
//! All engine math happens in whole minutes relative to the start of the
//! displayed day. Offsets may be negative (before the day) or exceed
//! [`MINUTES_PER_DAY`] (after it); clamping is the caller's decision.
//! Offsets that leave chrono's representable range saturate at
//! `NaiveDateTime::MIN`/`MAX` instead of panicking.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Number of minutes on the day axis.
pub const MINUTES_PER_DAY: i64 = 1440;

/// `at + minutes`, saturating at the representable range.
#[must_use]
pub fn add_minutes(at: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    let saturated = if minutes < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    };
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(saturated)
}

/// The start of the displayed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayWindow {
    start: NaiveDateTime,
}

impl DayWindow {
    /// Window beginning at `start`.
    #[must_use]
    pub const fn starting_at(start: NaiveDateTime) -> Self {
        Self { start }
    }

    /// Window covering `date` from local midnight.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// First instant of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// First instant after the window.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        add_minutes(self.start, MINUTES_PER_DAY)
    }

    /// Whole minutes from the window start to `at`, truncated toward zero.
    #[must_use]
    pub fn minutes_until(&self, at: NaiveDateTime) -> i64 {
        (at - self.start).num_minutes()
    }

    /// Absolute timestamp for a day-relative minute offset.
    #[must_use]
    pub fn at_minute(&self, minute: i64) -> NaiveDateTime {
        add_minutes(self.start, minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DayWindow {
        DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
    }

    #[test]
    fn minutes_round_trip() {
        let window = day();
        let t = window.at_minute(545);
        assert_eq!(window.minutes_until(t), 545);
    }

    #[test]
    fn minutes_before_window_are_negative() {
        let window = day();
        let yesterday_23h = window.at_minute(-60);
        assert_eq!(window.minutes_until(yesterday_23h), -60);
    }

    #[test]
    fn end_is_one_day_later() {
        let window = day();
        assert_eq!(window.minutes_until(window.end()), MINUTES_PER_DAY);
    }

    #[test]
    fn offsets_past_the_calendar_saturate() {
        let window = day();
        assert_eq!(window.at_minute(i64::MAX), NaiveDateTime::MAX);
        assert_eq!(window.at_minute(i64::MIN), NaiveDateTime::MIN);

        let last = DayWindow::starting_at(NaiveDateTime::MAX);
        assert_eq!(last.end(), NaiveDateTime::MAX);
        assert_eq!(add_minutes(NaiveDateTime::MIN, -1), NaiveDateTime::MIN);
    }

    #[test]
    fn partial_minutes_truncate() {
        let window = day();
        let t = window.start() + TimeDelta::seconds(89);
        assert_eq!(window.minutes_until(t), 1);
        let before = window.start() - TimeDelta::seconds(89);
        assert_eq!(window.minutes_until(before), -1);
    }
}
