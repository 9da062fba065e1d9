#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, NaiveDate};
use dayplan_core::{DayWindow, Item, ItemId, PreviewDelta};
use dayplan_layout::{LaneResolution, MutationEngine, TimelineConfig, layout};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Move { target: u8, minutes: i16 },
    Resize { target: u8, minutes: i16 },
    Lane { target: u8, lane: u8 },
    Drag { target: u8, minutes: i16, lane_delta: i8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    /// `(start minute, length, lane hint)` per item.
    spans: Vec<(u16, u16, u8)>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Some(date) = NaiveDate::from_ymd_opt(2024, 3, 4) else {
        return;
    };
    let day = DayWindow::for_date(date);
    let config = TimelineConfig::default();
    let engine = MutationEngine::new(config, day);

    let mut items: Vec<Item> = input
        .spans
        .iter()
        .take(64)
        .enumerate()
        .map(|(i, &(start, len, hint))| {
            let start = day.start() + Duration::minutes(i64::from(start % 1440));
            Item::new(ItemId(i as u64), start, start + Duration::minutes(i64::from(len % 600)))
                .with_lane_hint(u16::from(hint))
        })
        .collect();
    if items.is_empty() {
        return;
    }

    for op in input.ops.iter().take(128) {
        let current = layout(&items, &day, config.default_duration_minutes);
        let pick = |t: u8| items[usize::from(t) % items.len()].id;
        let (target, commit) = match *op {
            Op::Move { target, minutes } => {
                let id = pick(target);
                (id, engine.commit_move(&items, id, i64::from(minutes)))
            }
            Op::Resize { target, minutes } => {
                let id = pick(target);
                (id, engine.commit_resize(&items, id, i64::from(minutes)))
            }
            Op::Lane { target, lane } => {
                let id = pick(target);
                (id, engine.commit_lane_change(&items, &current, id, u16::from(lane)))
            }
            Op::Drag { target, minutes, lane_delta } => {
                let id = pick(target);
                let origin = i32::from(current.lane_of(id).unwrap_or(0));
                let last = i32::from(current.lane_count) - 1;
                let target_lane = (origin + i32::from(lane_delta)).clamp(0, last);
                let preview = PreviewDelta {
                    minutes: i64::from(minutes),
                    lane_delta: target_lane - origin,
                    target_lane: target_lane as u16,
                };
                (id, engine.commit_drag(&items, &current, id, preview))
            }
        };

        if let LaneResolution::Swapped { with } = commit.resolution {
            assert_ne!(with, target, "swapped with itself");
        }
        commit.patch.apply(&mut items);

        let moved = items.iter().find(|i| i.id == target).expect("target vanished");
        if commit.patch.get(target).is_some_and(|e| e.start.is_some() || e.end.is_some()) {
            let end = moved.effective_end(config.default_duration_minutes);
            assert!(
                end - moved.start >= Duration::minutes(config.effective_min_duration()),
                "duration below floor"
            );
        }
        let after = layout(&items, &day, config.default_duration_minutes);
        assert_eq!(after.first_conflict(), None, "same-lane overlap after commit");
    }
});
