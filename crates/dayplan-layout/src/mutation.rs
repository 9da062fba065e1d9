#![forbid(unsafe_code)]

//! Commit rules for move, resize, and lane-change gestures.
//!
//! The [`MutationEngine`] turns a finished gesture into a [`Commit`]. It reads
//! an immutable item snapshot and never edits items itself; the item store
//! applies the returned [`Patch`].
//!
//! # Lane rules
//!
//! - **Lane change**: when the dragged item lands on exactly one item of its
//!   overlap cluster, and that item can take the vacated lane without hitting
//!   a third cluster member, the two items swap lanes. Every other case pins
//!   the dragged item to its target lane and packs the rest of the cluster
//!   around it (pin-and-pack).
//! - **Time change** (move or resize without a lane drag): when the item gains
//!   an overlap neighbor it did not have before, its whole cluster is
//!   re-partitioned ignoring stored hints. An item left alone is normalized to
//!   lane 0.
//!
//! # Invariants
//!
//! 1. A commit depends only on the snapshot, the layout it was made against,
//!    and the gesture delta, never on render order.
//! 2. Committed items always satisfy `end >= start + min_duration`.
//! 3. A swap touches exactly two lane hints.
//! 4. Pin-and-pack breaks earliest-end ties toward the lowest lane index.
//!
//! # Failure Modes
//!
//! None surface to the caller. Lane indices, minute offsets, and durations are
//! clamped; an unknown item id yields [`Commit::unchanged`] and a warning.

use chrono::NaiveDateTime;
use dayplan_core::gesture::{self, PreviewDelta};
use dayplan_core::{DayWindow, Item, ItemId, MINUTES_PER_DAY, TimelineMetrics};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::TimelineConfig;
use crate::lanes::LayoutResult;
use crate::overlap::{cluster, neighbors, overlaps};
use crate::patch::{Commit, LaneResolution, Patch};

const TARGET: &str = "dayplan.mutation";

/// Commit engine for one displayed day.
#[derive(Debug, Clone, Copy)]
pub struct MutationEngine {
    config: TimelineConfig,
    day: DayWindow,
}

impl MutationEngine {
    /// Create an engine for `day`.
    #[must_use]
    pub const fn new(config: TimelineConfig, day: DayWindow) -> Self {
        Self { config, day }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Day the engine commits against.
    #[must_use]
    pub const fn day(&self) -> &DayWindow {
        &self.day
    }

    // -----------------------------------------------------------------------
    // Preview
    // -----------------------------------------------------------------------

    /// Snapped preview for a move drag.
    #[must_use]
    pub fn preview_move(
        &self,
        dx: f64,
        dy: f64,
        metrics: &TimelineMetrics,
        origin_lane: u16,
        lane_count: u16,
    ) -> PreviewDelta {
        gesture::preview_move(dx, dy, metrics, origin_lane, lane_count, self.config.snap_minutes)
    }

    /// Snapped preview for a resize drag.
    #[must_use]
    pub fn preview_resize(&self, dy: f64, metrics: &TimelineMetrics, origin_lane: u16) -> PreviewDelta {
        gesture::preview_resize(dy, metrics, origin_lane, self.config.snap_minutes)
    }

    // -----------------------------------------------------------------------
    // Time commits
    // -----------------------------------------------------------------------

    /// Commit a time-only move of `id` by `delta_minutes`.
    ///
    /// The start is clamped into the day, the duration is preserved (floored
    /// at the minimum), and the time-change lane rule is applied.
    #[must_use]
    pub fn commit_move(&self, items: &[Item], id: ItemId, delta_minutes: i64) -> Commit {
        let Some(idx) = index_of(items, id) else {
            return self.unknown(id, "move");
        };
        if delta_minutes == 0 {
            return Commit::unchanged();
        }
        let (start, end) = self.moved_times(&items[idx], delta_minutes);
        let mut after = items.to_vec();
        after[idx].start = start;
        after[idx].end = Some(end);

        let mut patch = Patch::new();
        patch.set_times(id, start, end);
        let resolution = self.settle_time_change(items, &after, idx, &mut patch);
        tracing::debug!(
            target: TARGET,
            item = %id,
            delta_minutes,
            resolution = %resolution,
            "move committed"
        );
        Commit { patch, resolution }
    }

    /// Commit a resize of `id`'s end boundary by `delta_minutes`.
    #[must_use]
    pub fn commit_resize(&self, items: &[Item], id: ItemId, delta_minutes: i64) -> Commit {
        let Some(idx) = index_of(items, id) else {
            return self.unknown(id, "resize");
        };
        if delta_minutes == 0 {
            return Commit::unchanged();
        }
        let end = self.resized_end(&items[idx], delta_minutes);
        let mut after = items.to_vec();
        after[idx].end = Some(end);

        let mut patch = Patch::new();
        patch.set_end(id, end);
        let resolution = self.settle_time_change(items, &after, idx, &mut patch);
        tracing::debug!(
            target: TARGET,
            item = %id,
            delta_minutes,
            resolution = %resolution,
            "resize committed"
        );
        Commit { patch, resolution }
    }

    /// New `(start, end)` for a move, in absolute time.
    #[must_use]
    pub fn moved_times(&self, item: &Item, delta_minutes: i64) -> (NaiveDateTime, NaiveDateTime) {
        let (old_start, old_end) = self.span_minutes(item);
        let start = old_start
            .saturating_add(delta_minutes)
            .clamp(0, MINUTES_PER_DAY - 1);
        let duration = (old_end - old_start).max(self.config.effective_min_duration());
        (self.day.at_minute(start), self.day.at_minute(start + duration))
    }

    /// New end for a resize, in absolute time.
    #[must_use]
    pub fn resized_end(&self, item: &Item, delta_minutes: i64) -> NaiveDateTime {
        let (start, old_end) = self.span_minutes(item);
        let min_duration = self.config.effective_min_duration();
        let mut end = old_end.saturating_add(delta_minutes).clamp(
            start + min_duration,
            start + self.config.max_span_minutes(),
        );
        if end <= start {
            end = start + min_duration;
        }
        self.day.at_minute(end)
    }

    fn span_minutes(&self, item: &Item) -> (i64, i64) {
        (
            self.day.minutes_until(item.start),
            self.day
                .minutes_until(item.effective_end(self.config.default_duration_minutes)),
        )
    }

    /// Lane rule after a time change of `after[idx]`; lane hints go into `patch`.
    fn settle_time_change(
        &self,
        before: &[Item],
        after: &[Item],
        idx: usize,
        patch: &mut Patch,
    ) -> LaneResolution {
        let default = self.config.default_duration_minutes;
        let moved = &after[idx];
        let members = cluster(moved, after, default);

        if members.len() == 1 {
            if moved.lane_hint != 0 {
                patch.set_lane_hint(moved.id, 0);
            }
            return LaneResolution::Normalized;
        }

        let previous: FxHashSet<ItemId> = neighbors(&before[idx], before, default)
            .into_iter()
            .map(|item| item.id)
            .collect();
        let gained = neighbors(moved, after, default)
            .iter()
            .any(|item| !previous.contains(&item.id));
        if !gained {
            return LaneResolution::Kept;
        }

        let (assignment, lane_count) = partition(&members, default);
        for &(member, lane) in &assignment {
            let changed = after
                .iter()
                .find(|item| item.id == member)
                .is_some_and(|item| item.lane_hint != lane);
            if changed {
                patch.set_lane_hint(member, lane);
            }
        }
        LaneResolution::Partitioned {
            members: assignment.iter().map(|&(member, _)| member).collect(),
            lane_count,
        }
    }

    // -----------------------------------------------------------------------
    // Lane commits
    // -----------------------------------------------------------------------

    /// Commit a lane change of `id` to `new_lane`, against the layout the
    /// drag was made on.
    #[must_use]
    pub fn commit_lane_change(
        &self,
        items: &[Item],
        layout: &LayoutResult,
        id: ItemId,
        new_lane: u16,
    ) -> Commit {
        let Some(idx) = index_of(items, id) else {
            return self.unknown(id, "lane change");
        };
        let lanes = layout.lanes_by_id();
        let lane_count = layout.lane_count.max(1);
        let new_lane = new_lane.min(lane_count - 1);
        let commit = self.lane_change(items, &lanes, lane_count, idx, new_lane);
        tracing::debug!(
            target: TARGET,
            item = %id,
            new_lane,
            resolution = %commit.resolution,
            patched = commit.patch.len(),
            "lane change committed"
        );
        commit
    }

    /// Commit a finished move drag: time delta first, then lane delta.
    ///
    /// With a zero lane delta this is [`commit_move`](Self::commit_move).
    #[must_use]
    pub fn commit_drag(
        &self,
        items: &[Item],
        layout: &LayoutResult,
        id: ItemId,
        preview: PreviewDelta,
    ) -> Commit {
        if preview.lane_delta == 0 {
            return self.commit_move(items, id, preview.minutes);
        }
        let Some(idx) = index_of(items, id) else {
            return self.unknown(id, "drag");
        };

        let mut working = items.to_vec();
        let mut time_patch = Patch::new();
        if preview.minutes != 0 {
            let (start, end) = self.moved_times(&items[idx], preview.minutes);
            working[idx].start = start;
            working[idx].end = Some(end);
            time_patch.set_times(working[idx].id, start, end);
        }

        let lanes = layout.lanes_by_id();
        let lane_count = layout.lane_count.max(1);
        let new_lane = preview.target_lane.min(lane_count - 1);
        let mut commit = self.lane_change(&working, &lanes, lane_count, idx, new_lane);
        for entry in time_patch.entries() {
            if let (Some(start), Some(end)) = (entry.start, entry.end) {
                commit.patch.set_times(entry.id, start, end);
            }
        }
        tracing::debug!(
            target: TARGET,
            item = %id,
            delta_minutes = preview.minutes,
            new_lane,
            resolution = %commit.resolution,
            "drag committed"
        );
        commit
    }

    fn lane_change(
        &self,
        items: &[Item],
        lanes: &FxHashMap<ItemId, u16>,
        lane_count: u16,
        idx: usize,
        new_lane: u16,
    ) -> Commit {
        let default = self.config.default_duration_minutes;
        let moved = &items[idx];
        let displayed = |item: &Item| lanes.get(&item.id).copied().unwrap_or(item.lane_hint);
        let old_lane = displayed(moved);

        let mut patch = Patch::new();
        if old_lane == new_lane {
            patch.set_lane_hint(moved.id, new_lane);
            return Commit {
                patch,
                resolution: LaneResolution::Pinned,
            };
        }

        let group = cluster(moved, items, default);
        let conflicts: Vec<&Item> = group
            .iter()
            .copied()
            .filter(|item| item.id != moved.id && displayed(*item) == new_lane)
            .collect();

        if let [other] = conflicts.as_slice() {
            let blocked = group.iter().any(|third| {
                third.id != moved.id
                    && third.id != other.id
                    && displayed(*third) == old_lane
                    && overlaps(third, other, default)
            });
            if !blocked {
                patch.set_lane_hint(moved.id, new_lane);
                patch.set_lane_hint(other.id, old_lane);
                return Commit {
                    patch,
                    resolution: LaneResolution::Swapped { with: other.id },
                };
            }
            tracing::trace!(
                target: TARGET,
                item = %moved.id,
                other = %other.id,
                old_lane,
                "swap blocked by a third item"
            );
        }

        let assignment = pin_and_pack(&group, moved, new_lane, lane_count, default);
        for &(member, lane) in &assignment {
            let hint = items
                .iter()
                .find(|item| item.id == member)
                .map_or(lane, |item| item.lane_hint);
            if member == moved.id || hint != lane {
                patch.set_lane_hint(member, lane);
            }
        }
        Commit {
            patch,
            resolution: LaneResolution::Repacked {
                members: assignment.iter().map(|&(member, _)| member).collect(),
            },
        }
    }

    fn unknown(&self, id: ItemId, op: &str) -> Commit {
        tracing::warn!(target: TARGET, item = %id, op, "commit for unknown item ignored");
        Commit::unchanged()
    }
}

fn index_of(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

fn sorted_by_start<'a>(members: &[&'a Item], default_duration_minutes: u32) -> Vec<&'a Item> {
    let mut sorted = members.to_vec();
    sorted.sort_by_key(|item| (item.start, item.effective_end(default_duration_minutes)));
    sorted
}

/// Pure interval partitioning of `members`, ignoring hints.
///
/// Returns `(id, lane)` in partition order and the number of lanes opened.
#[must_use]
pub fn partition(members: &[&Item], default_duration_minutes: u32) -> (Vec<(ItemId, u16)>, u16) {
    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut assignment = Vec::with_capacity(members.len());
    for item in sorted_by_start(members, default_duration_minutes) {
        let end = item.effective_end(default_duration_minutes);
        let lane = match lane_ends.iter().position(|&lane_end| lane_end <= item.start) {
            Some(free) => {
                lane_ends[free] = end;
                free
            }
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
        assignment.push((item.id, lane_u16(lane)));
    }
    (assignment, lane_u16(lane_ends.len()))
}

/// Pin `moved` to `new_lane` and pack the rest of `group` around it.
///
/// Each remaining member, in start order, keeps its own hint when that lane
/// is free, else takes the first free lane, else the lane that frees up
/// earliest (lowest index on ties). Returns `(id, lane)` with `moved` first.
#[must_use]
pub fn pin_and_pack(
    group: &[&Item],
    moved: &Item,
    new_lane: u16,
    lane_count: u16,
    default_duration_minutes: u32,
) -> Vec<(ItemId, u16)> {
    let pinned = usize::from(new_lane);
    let universe = usize::from(lane_count).max(pinned + 1);
    let mut lane_ends: Vec<Option<NaiveDateTime>> = vec![None; universe];
    lane_ends[pinned] = Some(moved.effective_end(default_duration_minutes));

    let mut assignment = vec![(moved.id, new_lane)];
    let rest: Vec<&Item> = group.iter().copied().filter(|item| item.id != moved.id).collect();
    for item in sorted_by_start(&rest, default_duration_minutes) {
        let is_free = |lane: usize| lane_ends[lane].is_none_or(|end| end <= item.start);
        let hint = usize::from(item.lane_hint);
        let lane = if hint < universe && is_free(hint) {
            hint
        } else if let Some(free) = (0..universe).find(|&lane| is_free(lane)) {
            free
        } else {
            lane_ends
                .iter()
                .enumerate()
                .min_by_key(|&(_, end)| *end)
                .map_or(0, |(lane, _)| lane)
        };
        let end = item.effective_end(default_duration_minutes);
        lane_ends[lane] = Some(lane_ends[lane].map_or(end, |prev| prev.max(end)));
        assignment.push((item.id, lane_u16(lane)));
    }
    assignment
}

fn lane_u16(lane: usize) -> u16 {
    u16::try_from(lane).unwrap_or(u16::MAX)
}
