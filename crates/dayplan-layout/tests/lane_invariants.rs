//! Property invariants for lane layout and commit streams.
//!
//! Random item sets are laid out and checked for lane bounds, no same-lane
//! overlap, and a minimal lane count. Random gesture streams are committed
//! through the mutation engine and the same invariants are asserted after
//! every step.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dayplan_core::{DayWindow, Item, ItemId, MINUTES_PER_DAY, PreviewDelta, Segment, normalize};
use dayplan_layout::{
    LaneResolution, MutationEngine, TimelineConfig, layout, max_concurrency,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 11
    }

    fn range_i64(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max);
        let span = (max - min + 1) as u64;
        min + (self.next_u64() % span) as i64
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }
}

fn day() -> DayWindow {
    DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
}

fn at(minute: i64) -> NaiveDateTime {
    day().start() + Duration::minutes(minute)
}

fn random_items(rng: &mut Lcg, count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let start = rng.range_i64(-120, MINUTES_PER_DAY + 60);
            let id = ItemId(i as u64 + 1);
            let hint = rng.range_i64(0, 6) as u16;
            if rng.choose_index(5) == 0 {
                Item::open_ended(id, at(start)).with_lane_hint(hint)
            } else {
                let duration = rng.range_i64(0, 300);
                Item::new(id, at(start), at(start + duration)).with_lane_hint(hint)
            }
        })
        .collect()
}

/// Peak concurrency by brute force over every minute of the day.
fn naive_peak(segments: &[Segment]) -> usize {
    (0..MINUTES_PER_DAY as u16)
        .map(|minute| segments.iter().filter(|s| s.contains_minute(minute)).count())
        .max()
        .unwrap_or(0)
}

fn assert_layout_invariants(items: &[Item]) {
    let result = layout(items, &day(), 30);
    assert_eq!(result.len(), items.len(), "one segment per item");
    assert!(result.lane_count >= 1);
    for seg in &result.segments {
        assert!(seg.lane < result.lane_count, "lane {} out of range", seg.lane);
        assert!(seg.display_start < seg.display_end, "empty segment {seg:?}");
        assert!(seg.display_end <= MINUTES_PER_DAY as u16);
    }
    assert_eq!(result.first_conflict(), None, "same-lane overlap");
    let expected = naive_peak(&result.segments).max(1);
    assert_eq!(usize::from(result.lane_count), expected, "lane count not minimal");
}

fn random_commit_stream(seed: u64, count: usize, steps: usize) {
    let mut rng = Lcg::new(seed);
    let config = TimelineConfig::default();
    let engine = MutationEngine::new(config, day());
    let mut items = random_items(&mut rng, count);

    for _ in 0..steps {
        let current = layout(&items, &day(), config.default_duration_minutes);
        let target = items[rng.choose_index(items.len())].id;
        let commit = match rng.choose_index(4) {
            0 => engine.commit_move(&items, target, rng.range_i64(-400, 400)),
            1 => engine.commit_resize(&items, target, rng.range_i64(-400, 400)),
            2 => {
                let lane = rng.range_i64(0, i64::from(current.lane_count) + 1) as u16;
                engine.commit_lane_change(&items, &current, target, lane)
            }
            _ => {
                let origin = current.lane_of(target).unwrap_or(0);
                let lane_delta = rng.range_i64(-2, 2) as i32;
                let last = i64::from(current.lane_count) - 1;
                let target_lane = (i64::from(origin) + i64::from(lane_delta)).clamp(0, last) as u16;
                let preview = PreviewDelta {
                    minutes: rng.range_i64(-6, 6) * 5,
                    lane_delta,
                    target_lane,
                };
                engine.commit_drag(&items, &current, target, preview)
            }
        };

        if let LaneResolution::Swapped { with } = commit.resolution {
            assert_ne!(with, target, "item swapped with itself");
            let lane_entries = commit
                .patch
                .entries()
                .iter()
                .filter(|e| e.lane_hint.is_some())
                .count();
            assert_eq!(lane_entries, 2, "swap must touch exactly two hints");
        }
        if let LaneResolution::Repacked { members } = &commit.resolution {
            assert_eq!(members.first(), Some(&target));
            for entry in commit.patch.entries() {
                assert!(members.contains(&entry.id), "repack patched a non-member");
            }
        }

        commit.patch.apply(&mut items);

        if let Some(entry) = commit.patch.get(target) {
            if entry.start.is_some() || entry.end.is_some() {
                let moved = items.iter().find(|i| i.id == target).unwrap();
                let end = moved.effective_end(config.default_duration_minutes);
                assert!(
                    end - moved.start >= Duration::minutes(config.effective_min_duration()),
                    "duration below floor after commit"
                );
            }
        }
        assert_layout_invariants(&items);
    }
}

#[test]
fn dense_day_has_minimal_lanes() {
    let mut rng = Lcg::new(7);
    let items = random_items(&mut rng, 200);
    assert_layout_invariants(&items);
}

#[test]
fn every_item_clamped_out_of_the_day_still_renders() {
    let items: Vec<Item> = (0..10)
        .map(|i| Item::new(ItemId(i), at(MINUTES_PER_DAY + 30), at(MINUTES_PER_DAY + 90)))
        .collect();
    let result = layout(&items, &day(), 30);
    assert_eq!(usize::from(result.lane_count), 10);
    assert!(result.segments.iter().all(|s| s.display_start == 1425));
    assert_eq!(result.first_conflict(), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_days_satisfy_layout_invariants(seed in any::<u64>(), count in 0usize..60) {
        let mut rng = Lcg::new(seed);
        let items = random_items(&mut rng, count);
        assert_layout_invariants(&items);
    }

    #[test]
    fn layout_is_deterministic(seed in any::<u64>(), count in 0usize..40) {
        let mut rng = Lcg::new(seed);
        let items = random_items(&mut rng, count);
        let first = layout(&items, &day(), 30);
        let second = layout(&items, &day(), 30);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lane_count_matches_sweep(seed in any::<u64>(), count in 1usize..40) {
        let mut rng = Lcg::new(seed);
        let items = random_items(&mut rng, count);
        let segments: Vec<Segment> = items.iter().map(|i| normalize(i, &day(), 30)).collect();
        prop_assert_eq!(max_concurrency(&segments), naive_peak(&segments));
    }

    #[test]
    fn commit_streams_preserve_invariants(
        seed in any::<u64>(),
        count in 1usize..24,
        steps in 10usize..60,
    ) {
        random_commit_stream(seed, count, steps);
    }
}
