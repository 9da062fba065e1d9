//! Property tests for interval normalization and block geometry.
//!
//! Arbitrary items (including ones far outside the displayed day, inverted,
//! or open-ended) must always normalize into a visible segment, and the
//! rectangles drawn for segments must agree with the segments' overlap.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dayplan_core::{
    DayWindow, Item, ItemId, MIN_SLIVER_MINUTES, MINUTES_PER_DAY, TimelineMetrics, normalize,
    snapped_minutes_for_dy,
};
use proptest::prelude::*;

fn day() -> DayWindow {
    DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
}

fn at(minute: i64) -> NaiveDateTime {
    day().start() + Duration::minutes(minute)
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        -3_000i64..4_500,
        prop::option::of(-120i64..3_000),
        0u16..8,
    )
        .prop_map(|(start, len, hint)| {
            let item = match len {
                Some(len) => Item::new(ItemId(1), at(start), at(start + len)),
                None => Item::open_ended(ItemId(1), at(start)),
            };
            item.with_lane_hint(hint)
        })
}

proptest! {
    #[test]
    fn every_item_normalizes_to_a_visible_segment(item in item_strategy(), default in 0u32..240) {
        let seg = normalize(&item, &day(), default);
        prop_assert!(seg.display_start < seg.display_end);
        prop_assert!(i64::from(seg.display_end) <= MINUTES_PER_DAY);
        prop_assert!(seg.duration_minutes() >= 1);

        let raw_start = day().minutes_until(item.start);
        prop_assert_eq!(seg.clipped_start, raw_start < 0);
        if raw_start >= MINUTES_PER_DAY {
            prop_assert_eq!(seg.display_start, (MINUTES_PER_DAY as u16) - MIN_SLIVER_MINUTES);
        }
    }

    #[test]
    fn in_window_items_keep_exact_minutes(start in 0i64..1_380, len in 1i64..60) {
        let item = Item::new(ItemId(7), at(start), at(start + len));
        let seg = normalize(&item, &day(), 30);
        prop_assert_eq!(i64::from(seg.display_start), start);
        prop_assert_eq!(i64::from(seg.display_end), start + len);
        prop_assert!(!seg.clipped_start && !seg.clipped_end);
    }

    #[test]
    fn rects_intersect_iff_segments_overlap(
        a in item_strategy(),
        b in item_strategy(),
        lane_gap in 0.0f64..20.0,
    ) {
        let metrics = TimelineMetrics::new(60.0, 100.0, lane_gap);
        let sa = normalize(&a, &day(), 30);
        let sb = normalize(&b, &day(), 30);
        let ra = metrics.block_rect(&sa);
        let rb = metrics.block_rect(&sb);
        let vertical = ra.y < rb.bottom() && rb.y < ra.bottom();
        prop_assert_eq!(vertical, sa.overlaps(&sb));
    }

    #[test]
    fn snapped_delta_is_on_grid(dy in -2_000.0f64..2_000.0, snap in 1u32..60) {
        let minutes = snapped_minutes_for_dy(dy, &TimelineMetrics::default(), snap);
        prop_assert_eq!(minutes % i64::from(snap), 0);
    }
}
