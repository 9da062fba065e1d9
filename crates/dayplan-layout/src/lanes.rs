#![forbid(unsafe_code)]

//! Lane layout: segments → lane assignment.
//!
//! [`layout`] places every item of a day into a lane so that no two items
//! sharing a lane overlap. It runs in two passes:
//!
//! 1. **Count**: a boundary sweep (`+1` at each start, `-1` at each end, ends
//!    before starts at equal minutes) finds the true peak concurrency, which
//!    becomes the lane count.
//! 2. **Assign**: segments are visited in `(start, end)` order. Each takes its
//!    hinted lane when that lane is free, otherwise the lowest free lane.
//!
//! Sizing the lane count first keeps hint misses from opening extra columns.
//!
//! # Invariants
//!
//! 1. `lane_count >= 1`, and `lane < lane_count` for every segment.
//! 2. No two segments in one lane overlap on `[display_start, display_end)`.
//! 3. `lane_count` equals the peak number of simultaneously open segments.
//! 4. The output depends only on the item list: identical input, identical
//!    assignment.
//!
//! # Failure Modes
//!
//! None. Out-of-range hints are clamped into `[0, lane_count - 1]`.

use dayplan_core::{DayWindow, Item, ItemId, Segment, normalize};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;

/// Output of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Segments in `(display_start, display_end)` order, lanes assigned.
    pub segments: Vec<Segment>,
    /// Number of lanes in use (at least 1).
    pub lane_count: u16,
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            lane_count: 1,
        }
    }
}

impl LayoutResult {
    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the layout holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment rendered for `id`.
    #[must_use]
    pub fn segment(&self, id: ItemId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.item_id == id)
    }

    /// Displayed lane of `id`.
    #[must_use]
    pub fn lane_of(&self, id: ItemId) -> Option<u16> {
        self.segment(id).map(|s| s.lane)
    }

    /// Displayed lane of every item, keyed by id.
    #[must_use]
    pub fn lanes_by_id(&self) -> FxHashMap<ItemId, u16> {
        self.segments.iter().map(|s| (s.item_id, s.lane)).collect()
    }

    /// Segments placed in `lane`, in start order.
    pub fn segments_in_lane(&self, lane: u16) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.lane == lane)
    }

    /// Verify the no-overlap invariant. Returns the first conflicting pair.
    #[must_use]
    pub fn first_conflict(&self) -> Option<(ItemId, ItemId)> {
        for (i, a) in self.segments.iter().enumerate() {
            for b in &self.segments[i + 1..] {
                if a.lane == b.lane && a.overlaps(b) {
                    return Some((a.item_id, b.item_id));
                }
            }
        }
        None
    }
}

/// Peak number of simultaneously open segments (half-open ranges).
#[must_use]
pub fn max_concurrency(segments: &[Segment]) -> usize {
    let mut events: Vec<(u16, i8)> = Vec::with_capacity(segments.len() * 2);
    for seg in segments {
        events.push((seg.display_start, 1));
        events.push((seg.display_end, -1));
    }
    // -1 sorts before +1, so ends at minute T close before starts at T open.
    events.sort_unstable();

    let mut open: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        open += i64::from(delta);
        peak = peak.max(open);
    }
    usize::try_from(peak).unwrap_or(0)
}

/// Lay out `items` for `day`.
#[must_use]
pub fn layout(items: &[Item], day: &DayWindow, default_duration_minutes: u32) -> LayoutResult {
    let span = tracing::debug_span!(
        "lanes.layout",
        items = items.len(),
        lane_count = tracing::field::Empty,
    );
    let _guard = span.enter();

    if items.is_empty() {
        return LayoutResult::default();
    }

    let mut placed: Vec<(Segment, u16)> = items
        .iter()
        .map(|item| (normalize(item, day, default_duration_minutes), item.lane_hint))
        .collect();
    placed.sort_by_key(|(seg, _)| (seg.display_start, seg.display_end));

    let segments: Vec<Segment> = placed.iter().map(|(seg, _)| *seg).collect();
    let lane_count = u16::try_from(max_concurrency(&segments).max(1)).unwrap_or(u16::MAX);
    span.record("lane_count", lane_count);

    let mut lane_ends = vec![0u16; usize::from(lane_count)];
    let mut out = Vec::with_capacity(placed.len());
    for (mut seg, hint) in placed {
        let lane = pick_lane(&lane_ends, hint, seg.display_start);
        lane_ends[usize::from(lane)] = seg.display_end;
        seg.lane = lane;
        out.push(seg);
    }

    LayoutResult {
        segments: out,
        lane_count,
    }
}

fn pick_lane(lane_ends: &[u16], hint: u16, start: u16) -> u16 {
    let last = lane_ends.len().saturating_sub(1);
    let preferred = usize::from(hint).min(last);
    if lane_ends[preferred] <= start {
        return lane_index(preferred);
    }
    if let Some(free) = lane_ends.iter().position(|&end| end <= start) {
        return lane_index(free);
    }
    // Unreachable with an exact lane count; keep the segment visible anyway.
    let earliest = lane_ends
        .iter()
        .enumerate()
        .min_by_key(|&(_, &end)| end)
        .map_or(0, |(i, _)| i);
    lane_index(earliest)
}

fn lane_index(i: usize) -> u16 {
    u16::try_from(i).unwrap_or(u16::MAX)
}

/// Layout pass bound to a [`TimelineConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneLayout {
    config: TimelineConfig,
}

impl LaneLayout {
    /// Create a layout pass with the given configuration.
    #[must_use]
    pub const fn new(config: TimelineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Lay out `items` for `day`.
    #[must_use]
    pub fn compute(&self, items: &[Item], day: &DayWindow) -> LayoutResult {
        layout(items, day, self.config.default_duration_minutes)
    }
}
