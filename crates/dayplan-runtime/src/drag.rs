#![forbid(unsafe_code)]

//! Drag sessions: one gesture from pointer-down to commit.
//!
//! A [`DragSession`] remembers where the gesture started, including the
//! scroll offset at that moment. While the timeline auto-scrolls under a
//! stationary pointer, the content still moves relative to the item, so every
//! preview adds the scroll distance travelled since the drag began to the
//! pointer's vertical translation.

use dayplan_core::{Item, ItemId, PreviewDelta, TimelineMetrics};
use dayplan_layout::{Commit, LayoutResult, MutationEngine};

/// What the gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// The whole block: time and lane.
    Move,
    /// The bottom edge: end time only.
    Resize,
}

/// State of one in-flight drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    item_id: ItemId,
    kind: DragKind,
    origin_lane: u16,
    origin_scroll: f64,
    last_preview: PreviewDelta,
}

impl DragSession {
    /// Start dragging `item_id` from `origin_lane` at `scroll_offset`.
    #[must_use]
    pub fn begin(item_id: ItemId, kind: DragKind, origin_lane: u16, scroll_offset: f64) -> Self {
        Self {
            item_id,
            kind,
            origin_lane,
            origin_scroll: if scroll_offset.is_finite() { scroll_offset } else { 0.0 },
            last_preview: PreviewDelta {
                minutes: 0,
                lane_delta: 0,
                target_lane: origin_lane,
            },
        }
    }

    /// Item being dragged.
    #[must_use]
    pub const fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Gesture kind.
    #[must_use]
    pub const fn kind(&self) -> DragKind {
        self.kind
    }

    /// Lane the item was displayed in at pointer-down.
    #[must_use]
    pub const fn origin_lane(&self) -> u16 {
        self.origin_lane
    }

    /// Most recent preview (a no-op before the first sample).
    #[must_use]
    pub const fn last_preview(&self) -> PreviewDelta {
        self.last_preview
    }

    /// Preview for a pointer translation of `(dx, dy)` px.
    pub fn preview(
        &mut self,
        engine: &MutationEngine,
        dx: f64,
        dy: f64,
        scroll_offset: f64,
        metrics: &TimelineMetrics,
        lane_count: u16,
    ) -> PreviewDelta {
        let scrolled = if scroll_offset.is_finite() {
            scroll_offset - self.origin_scroll
        } else {
            0.0
        };
        let dy = dy + scrolled;
        self.last_preview = match self.kind {
            DragKind::Move => engine.preview_move(dx, dy, metrics, self.origin_lane, lane_count),
            DragKind::Resize => engine.preview_resize(dy, metrics, self.origin_lane),
        };
        self.last_preview
    }

    /// Commit the last preview against the snapshot and layout it was made on.
    #[must_use]
    pub fn commit(&self, engine: &MutationEngine, items: &[Item], layout: &LayoutResult) -> Commit {
        tracing::debug!(
            target: "dayplan.mutation",
            item = %self.item_id,
            kind = ?self.kind,
            minutes = self.last_preview.minutes,
            lane_delta = self.last_preview.lane_delta,
            "drag released"
        );
        match self.kind {
            DragKind::Move => engine.commit_drag(items, layout, self.item_id, self.last_preview),
            DragKind::Resize => {
                if self.last_preview.minutes == 0 {
                    return Commit::unchanged();
                }
                engine.commit_resize(items, self.item_id, self.last_preview.minutes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use dayplan_core::DayWindow;
    use dayplan_layout::{LaneResolution, TimelineConfig, layout};

    fn day() -> DayWindow {
        DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
    }

    fn hm(h: i64, m: i64) -> NaiveDateTime {
        day().start() + Duration::minutes(h * 60 + m)
    }

    fn engine() -> MutationEngine {
        MutationEngine::new(TimelineConfig::default(), day())
    }

    fn metrics() -> TimelineMetrics {
        TimelineMetrics::new(60.0, 100.0, 0.0)
    }

    #[test]
    fn scroll_distance_adds_to_translation() {
        let mut drag = DragSession::begin(ItemId(1), DragKind::Move, 0, 200.0);
        let preview = drag.preview(&engine(), 0.0, 10.0, 250.0, &metrics(), 1);
        assert_eq!(preview.minutes, 60);
        assert_eq!(drag.last_preview(), preview);
    }

    #[test]
    fn upward_scroll_subtracts() {
        let mut drag = DragSession::begin(ItemId(1), DragKind::Move, 0, 300.0);
        let preview = drag.preview(&engine(), 0.0, 0.0, 240.0, &metrics(), 1);
        assert_eq!(preview.minutes, -60);
    }

    #[test]
    fn move_commit_swaps_lanes() {
        let items = vec![
            Item::new(ItemId(1), hm(9, 0), hm(10, 0)),
            Item::new(ItemId(2), hm(9, 30), hm(10, 30)).with_lane_hint(1),
        ];
        let current = layout(&items, &day(), 30);
        let mut drag = DragSession::begin(ItemId(1), DragKind::Move, 0, 0.0);
        drag.preview(&engine(), 100.0, 0.0, 0.0, &metrics(), current.lane_count);
        let commit = drag.commit(&engine(), &items, &current);
        assert_eq!(commit.resolution, LaneResolution::Swapped { with: ItemId(2) });
    }

    #[test]
    fn resize_commit_moves_end_only() {
        let items = vec![Item::new(ItemId(1), hm(9, 0), hm(10, 0))];
        let current = layout(&items, &day(), 30);
        let mut drag = DragSession::begin(ItemId(1), DragKind::Resize, 0, 0.0);
        drag.preview(&engine(), 80.0, 45.0, 0.0, &metrics(), 1);
        let commit = drag.commit(&engine(), &items, &current);
        let entry = commit.patch.get(ItemId(1)).unwrap();
        assert_eq!(entry.start, None);
        assert_eq!(entry.end, Some(hm(10, 45)));
    }

    #[test]
    fn release_without_movement_changes_nothing() {
        let items = vec![Item::new(ItemId(1), hm(9, 0), hm(10, 0))];
        let current = layout(&items, &day(), 30);
        for kind in [DragKind::Move, DragKind::Resize] {
            let drag = DragSession::begin(ItemId(1), kind, 0, 0.0);
            assert_eq!(drag.commit(&engine(), &items, &current), Commit::unchanged());
        }
    }
}
