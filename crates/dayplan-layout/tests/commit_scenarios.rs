//! End-to-end commit scenarios: layout, commit, apply through the store, and
//! lay out again.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dayplan_core::{DayWindow, Item, ItemId, TimelineMetrics};
use dayplan_layout::{
    ItemStore, LaneLayout, LaneResolution, MutationEngine, TimelineConfig, VecStore,
};

fn day() -> DayWindow {
    DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
}

fn hm(h: i64, m: i64) -> NaiveDateTime {
    day().start() + Duration::minutes(h * 60 + m)
}

struct Planner {
    store: VecStore,
    lanes: LaneLayout,
    engine: MutationEngine,
}

impl Planner {
    fn new(items: Vec<Item>) -> Self {
        let config = TimelineConfig::default();
        Self {
            store: VecStore::new(items),
            lanes: LaneLayout::new(config),
            engine: MutationEngine::new(config, day()),
        }
    }

    fn lane_of(&self, id: u64) -> u16 {
        self.lanes
            .compute(self.store.items(), &day())
            .lane_of(ItemId(id))
            .expect("item is laid out")
    }

    fn lane_change(&mut self, id: u64, lane: u16) -> LaneResolution {
        let current = self.lanes.compute(self.store.items(), &day());
        let commit = self
            .engine
            .commit_lane_change(self.store.items(), &current, ItemId(id), lane);
        self.store.apply(&commit.patch);
        commit.resolution
    }
}

#[test]
fn swap_twice_restores_lanes() {
    let mut planner = Planner::new(vec![
        Item::new(ItemId(1), hm(9, 0), hm(10, 0)),
        Item::new(ItemId(2), hm(9, 30), hm(10, 30)).with_lane_hint(1),
    ]);
    assert_eq!((planner.lane_of(1), planner.lane_of(2)), (0, 1));

    assert_eq!(
        planner.lane_change(1, 1),
        LaneResolution::Swapped { with: ItemId(2) }
    );
    assert_eq!((planner.lane_of(1), planner.lane_of(2)), (1, 0));

    assert_eq!(
        planner.lane_change(1, 0),
        LaneResolution::Swapped { with: ItemId(2) }
    );
    assert_eq!((planner.lane_of(1), planner.lane_of(2)), (0, 1));
    assert_eq!(planner.store.revision(), 2);
}

#[test]
fn dragging_into_a_busy_column_repacks_the_cluster() {
    let mut planner = Planner::new(vec![
        Item::new(ItemId(1), hm(9, 0), hm(12, 0)),
        Item::new(ItemId(2), hm(9, 0), hm(10, 0)).with_lane_hint(1),
        Item::new(ItemId(3), hm(10, 0), hm(11, 0)).with_lane_hint(1),
        Item::new(ItemId(4), hm(15, 0), hm(16, 0)).with_lane_hint(1),
    ]);
    let resolution = planner.lane_change(1, 1);
    assert!(matches!(resolution, LaneResolution::Repacked { ref members } if members.len() == 3));
    assert_eq!(planner.lane_of(1), 1);
    assert_eq!(planner.lane_of(2), 0);
    assert_eq!(planner.lane_of(3), 0);
    // Item 4 is outside the cluster and keeps its hint.
    assert_eq!(planner.store.get(ItemId(4)).map(|i| i.lane_hint), Some(1));
}

#[test]
fn pointer_drag_end_to_end() {
    let metrics = TimelineMetrics::new(60.0, 100.0, 0.0);
    let mut planner = Planner::new(vec![
        Item::new(ItemId(1), hm(9, 0), hm(10, 0)),
        Item::new(ItemId(2), hm(9, 30), hm(10, 30)).with_lane_hint(1),
    ]);
    let current = planner.lanes.compute(planner.store.items(), &day());
    let origin = current.lane_of(ItemId(1)).unwrap();

    // 120 px right is one lane over; 31 px down snaps to 30 minutes.
    let preview = planner
        .engine
        .preview_move(120.0, 31.0, &metrics, origin, current.lane_count);
    assert_eq!(preview.minutes, 30);
    assert_eq!(preview.target_lane, 1);

    let commit = planner
        .engine
        .commit_drag(planner.store.items(), &current, ItemId(1), preview);
    planner.store.apply(&commit.patch);

    let moved = planner.store.get(ItemId(1)).unwrap();
    assert_eq!(moved.start, hm(9, 30));
    assert_eq!(moved.end, Some(hm(10, 30)));
    assert_eq!(planner.lane_of(1), 1);
    assert_eq!(planner.lane_of(2), 0);
}

#[test]
fn resize_never_drops_below_minimum() {
    let mut planner = Planner::new(vec![Item::new(ItemId(1), hm(9, 0), hm(10, 0))]);
    for _ in 0..5 {
        let commit = planner
            .engine
            .commit_resize(planner.store.items(), ItemId(1), -50);
        planner.store.apply(&commit.patch);
    }
    assert_eq!(planner.store.get(ItemId(1)).unwrap().end, Some(hm(9, 15)));
}

#[test]
fn moving_away_from_a_cluster_resets_to_lane_zero() {
    let mut planner = Planner::new(vec![
        Item::new(ItemId(1), hm(9, 0), hm(10, 0)),
        Item::new(ItemId(2), hm(9, 30), hm(10, 30)).with_lane_hint(1),
    ]);
    let commit = planner
        .engine
        .commit_move(planner.store.items(), ItemId(2), 180);
    assert_eq!(commit.resolution, LaneResolution::Normalized);
    planner.store.apply(&commit.patch);
    assert_eq!(planner.store.get(ItemId(2)).unwrap().lane_hint, 0);
    assert_eq!(planner.lane_of(2), 0);
}

#[test]
fn commit_serializes_for_persistence() {
    let planner = Planner::new(vec![Item::new(ItemId(5), hm(9, 0), hm(10, 0))]);
    let commit = planner
        .engine
        .commit_move(planner.store.items(), ItemId(5), 60);
    let json = serde_json::to_string(&commit).unwrap();
    let back: dayplan_layout::Commit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, commit);
}
