#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, NaiveDate};
use dayplan_core::{DayWindow, Item, ItemId, MINUTES_PER_DAY};
use dayplan_layout::{layout, max_concurrency};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzItem {
    /// Start offset from the day start, in minutes.
    start: i16,
    /// Duration in minutes; `None` means open-ended.
    duration: Option<u16>,
    lane_hint: u16,
}

#[derive(Debug, Arbitrary)]
struct Input {
    default_duration: u8,
    items: Vec<FuzzItem>,
}

fuzz_target!(|input: Input| {
    let Some(date) = NaiveDate::from_ymd_opt(2024, 3, 4) else {
        return;
    };
    let day = DayWindow::for_date(date);
    let default = u32::from(input.default_duration);

    let items: Vec<Item> = input
        .items
        .iter()
        .take(256)
        .enumerate()
        .map(|(i, f)| {
            let id = ItemId(i as u64);
            let start = day.start() + Duration::minutes(i64::from(f.start));
            let item = match f.duration {
                Some(d) => Item::new(id, start, start + Duration::minutes(i64::from(d))),
                None => Item::open_ended(id, start),
            };
            item.with_lane_hint(f.lane_hint)
        })
        .collect();

    let result = layout(&items, &day, default);

    // Post-conditions that must always hold:
    assert_eq!(result.len(), items.len(), "segment dropped");
    assert!(result.lane_count >= 1, "zero lanes");
    for seg in &result.segments {
        assert!(seg.lane < result.lane_count, "lane OOB");
        assert!(seg.display_start < seg.display_end, "empty segment");
        assert!(i64::from(seg.display_end) <= MINUTES_PER_DAY, "segment past day end");
    }
    assert_eq!(result.first_conflict(), None, "same-lane overlap");
    assert_eq!(
        usize::from(result.lane_count),
        max_concurrency(&result.segments).max(1),
        "lane count not minimal"
    );

    // Same input, same assignment.
    assert_eq!(layout(&items, &day, default), result);
});
