#![forbid(unsafe_code)]

//! Day-planner lane engine: public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates, offers a [`Planner`]
//! that wires a store, the layout pass, and the commit rules together, and
//! ships a lightweight prelude for day-to-day usage.
//!
//! ```
//! use dayplan::prelude::*;
//! use chrono::NaiveDate;
//!
//! let day = DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
//! let at = |h: i64| day.at_minute(h * 60);
//! let store = VecStore::new(vec![
//!     Item::new(ItemId(1), at(9), at(10)),
//!     Item::new(ItemId(2), at(9), at(11)).with_lane_hint(1),
//! ]);
//! let mut planner = Planner::new(store, PlannerConfig::default(), day);
//! assert_eq!(planner.layout().lane_count, 2);
//!
//! let commit = planner.commit_lane_change(ItemId(1), 1);
//! assert_eq!(commit.resolution, LaneResolution::Swapped { with: ItemId(2) });
//! assert_eq!(planner.layout().lane_of(ItemId(1)), Some(1));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use dayplan_core::{
    BlockRect, DayWindow, FrameClock, Item, ItemId, ManualClock, PreviewDelta, Segment,
    SystemClock, TimelineMetrics,
};

// --- Layout re-exports -----------------------------------------------------

pub use dayplan_layout::{
    Commit, ItemPatch, ItemStore, LaneLayout, LaneResolution, LayoutResult, MutationEngine, Patch,
    TimelineConfig, VecStore,
};

// --- Runtime re-exports ----------------------------------------------------

pub use dayplan_runtime::{
    AutoScrollConfig, AutoScrollDriver, AutoScrollPhase, AutoScroller, ConfigError, DragKind,
    DragSession, FixedViewport, PlannerConfig, ViewportHost,
};

// --- Planner facade --------------------------------------------------------

/// One displayed day over an [`ItemStore`].
///
/// The planner keeps the current [`LayoutResult`] in step with the store:
/// every applied commit re-runs the layout pass on the store's items.
#[derive(Debug)]
pub struct Planner<S: ItemStore> {
    store: S,
    config: PlannerConfig,
    day: DayWindow,
    layout: LayoutResult,
}

impl<S: ItemStore> Planner<S> {
    /// Create a planner for `day` and lay out the store's items.
    #[must_use]
    pub fn new(store: S, config: PlannerConfig, day: DayWindow) -> Self {
        let mut planner = Self {
            store,
            config,
            day,
            layout: LayoutResult::default(),
        };
        planner.relayout();
        planner
    }

    /// Current layout.
    #[must_use]
    pub const fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Underlying item store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Displayed day.
    #[must_use]
    pub const fn day(&self) -> &DayWindow {
        &self.day
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Switch to another day and lay it out.
    pub fn set_day(&mut self, day: DayWindow) {
        self.day = day;
        self.relayout();
    }

    /// Commit engine for the displayed day.
    #[must_use]
    pub fn engine(&self) -> MutationEngine {
        MutationEngine::new(self.config.to_timeline_config(), self.day)
    }

    /// An idle auto-scroller with the configured tunables.
    #[must_use]
    pub fn auto_scroller(&self) -> AutoScroller {
        AutoScroller::new(self.config.to_autoscroll_config())
    }

    /// Start a drag on `id` from its displayed lane.
    ///
    /// Returns `None` when the item is not laid out on this day.
    #[must_use]
    pub fn begin_drag(&self, id: ItemId, kind: DragKind, scroll_offset: f64) -> Option<DragSession> {
        let lane = self.layout.lane_of(id)?;
        Some(DragSession::begin(id, kind, lane, scroll_offset))
    }

    /// Commit a finished drag and apply it.
    pub fn finish_drag(&mut self, session: &DragSession) -> Commit {
        let commit = session.commit(&self.engine(), self.store.items(), &self.layout);
        self.apply(&commit);
        commit
    }

    /// Commit and apply a lane change of `id` to `new_lane`.
    pub fn commit_lane_change(&mut self, id: ItemId, new_lane: u16) -> Commit {
        let commit = self
            .engine()
            .commit_lane_change(self.store.items(), &self.layout, id, new_lane);
        self.apply(&commit);
        commit
    }

    /// Commit and apply a time-only move of `id`.
    pub fn commit_move(&mut self, id: ItemId, delta_minutes: i64) -> Commit {
        let commit = self.engine().commit_move(self.store.items(), id, delta_minutes);
        self.apply(&commit);
        commit
    }

    /// Commit and apply a resize of `id`.
    pub fn commit_resize(&mut self, id: ItemId, delta_minutes: i64) -> Commit {
        let commit = self
            .engine()
            .commit_resize(self.store.items(), id, delta_minutes);
        self.apply(&commit);
        commit
    }

    /// Hand `commit` to the store and re-run the layout pass.
    pub fn apply(&mut self, commit: &Commit) {
        if commit.patch.is_empty() {
            return;
        }
        self.store.apply(&commit.patch);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = LaneLayout::new(self.config.to_timeline_config())
            .compute(self.store.items(), &self.day);
        tracing::debug!(
            target: "dayplan.planner",
            day = %self.day.start().date(),
            items = self.layout.len(),
            lane_count = self.layout.lane_count,
            "relayout"
        );
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AutoScroller, Commit, DayWindow, DragKind, DragSession, Item, ItemId, ItemStore,
        LaneResolution, LayoutResult, MutationEngine, Planner, PlannerConfig, TimelineMetrics,
        VecStore, ViewportHost,
    };

    pub use crate::{core, layout, runtime};
}

pub use dayplan_core as core;
pub use dayplan_layout as layout;
pub use dayplan_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day() -> DayWindow {
        DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
    }

    fn at(h: i64, m: i64) -> NaiveDateTime {
        day().at_minute(h * 60 + m)
    }

    fn planner() -> Planner<VecStore> {
        Planner::new(
            VecStore::new(vec![
                Item::new(ItemId(1), at(9, 0), at(10, 0)),
                Item::new(ItemId(2), at(9, 30), at(10, 30)).with_lane_hint(1),
            ]),
            PlannerConfig::default(),
            day(),
        )
    }

    #[test]
    fn drag_round_trip_updates_layout() {
        let mut planner = planner();
        let metrics = TimelineMetrics::new(60.0, 100.0, 0.0);
        let mut drag = planner.begin_drag(ItemId(2), DragKind::Move, 0.0).unwrap();
        assert_eq!(drag.origin_lane(), 1);
        drag.preview(&planner.engine(), -100.0, 0.0, 0.0, &metrics, planner.layout().lane_count);
        let commit = planner.finish_drag(&drag);
        assert_eq!(commit.resolution, LaneResolution::Swapped { with: ItemId(1) });
        assert_eq!(planner.layout().lane_of(ItemId(2)), Some(0));
        assert_eq!(planner.store().revision(), 1);
    }

    #[test]
    fn unknown_drag_target_has_no_session() {
        assert!(planner().begin_drag(ItemId(9), DragKind::Resize, 0.0).is_none());
    }

    #[test]
    fn empty_commit_skips_store() {
        let mut planner = planner();
        planner.commit_move(ItemId(1), 0);
        planner.commit_resize(ItemId(2), 0);
        assert_eq!(planner.store().revision(), 0);
    }

    #[test]
    fn switching_days_relayouts() {
        let mut planner = planner();
        planner.set_day(DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        // Both items fall before the new day and collapse to slivers at minute 0.
        assert_eq!(planner.layout().lane_count, 2);
        assert!(planner.layout().segments.iter().all(|s| s.display_start == 0));
    }

    #[test]
    fn resize_goes_through_the_store() {
        let mut planner = planner();
        planner.commit_resize(ItemId(1), 60);
        assert_eq!(planner.store().get(ItemId(1)).unwrap().end, Some(at(11, 0)));
    }
}
