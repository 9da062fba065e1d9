#![forbid(unsafe_code)]

//! Patches: the mutation engine's output.
//!
//! The engine never edits items in place. Each commit returns a [`Commit`]:
//! a [`Patch`] listing per-item field changes, plus the [`LaneResolution`]
//! that produced it. The item store applies the patch and re-queries.

use chrono::NaiveDateTime;
use dayplan_core::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Field changes for a single item. `None` means "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// Target item.
    pub id: ItemId,
    /// New start.
    pub start: Option<NaiveDateTime>,
    /// New explicit end.
    pub end: Option<NaiveDateTime>,
    /// New lane hint.
    pub lane_hint: Option<u16>,
}

impl ItemPatch {
    /// Empty patch for `id`.
    #[must_use]
    pub const fn new(id: ItemId) -> Self {
        Self {
            id,
            start: None,
            end: None,
            lane_hint: None,
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.lane_hint.is_none()
    }

    /// Apply the patch to `item`. Ids are not checked.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(start) = self.start {
            item.start = start;
        }
        if let Some(end) = self.end {
            item.end = Some(end);
        }
        if let Some(lane) = self.lane_hint {
            item.lane_hint = lane;
        }
    }
}

/// Ordered set of item patches, at most one per id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    entries: Vec<ItemPatch>,
}

impl Patch {
    /// Empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ItemPatch] {
        &self.entries
    }

    /// Number of patched items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no item is patched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `id`.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemPatch> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Lane hint the patch assigns to `id`, if any.
    #[must_use]
    pub fn lane_hint(&self, id: ItemId) -> Option<u16> {
        self.get(id).and_then(|e| e.lane_hint)
    }

    fn entry(&mut self, id: ItemId) -> &mut ItemPatch {
        let idx = match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => idx,
            None => {
                self.entries.push(ItemPatch::new(id));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Record a time change for `id`.
    pub fn set_times(&mut self, id: ItemId, start: NaiveDateTime, end: NaiveDateTime) {
        let entry = self.entry(id);
        entry.start = Some(start);
        entry.end = Some(end);
    }

    /// Record a new end for `id`.
    pub fn set_end(&mut self, id: ItemId, end: NaiveDateTime) {
        self.entry(id).end = Some(end);
    }

    /// Record a lane hint for `id`.
    pub fn set_lane_hint(&mut self, id: ItemId, lane: u16) {
        self.entry(id).lane_hint = Some(lane);
    }

    /// Apply every entry to matching items in `items`. Unknown ids are skipped.
    pub fn apply(&self, items: &mut [Item]) {
        for entry in &self.entries {
            if let Some(item) = items.iter_mut().find(|item| item.id == entry.id) {
                entry.apply_to(item);
            }
        }
    }

    /// Copy of `items` with the patch applied.
    #[must_use]
    pub fn applied(&self, items: &[Item]) -> Vec<Item> {
        let mut out = items.to_vec();
        self.apply(&mut out);
        out
    }
}

/// How a commit resolved lane assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneResolution {
    /// Lanes were left as they were.
    Kept,
    /// The moved item was pinned to its (unchanged) lane.
    Pinned,
    /// The moved item traded lanes with exactly one other item.
    Swapped {
        /// The item that took the moved item's old lane.
        with: ItemId,
    },
    /// Pin-and-pack over the overlap cluster.
    Repacked {
        /// Cluster members, moved item first.
        members: Vec<ItemId>,
    },
    /// Pure interval partitioning of the cluster after a time change.
    Partitioned {
        /// Cluster members in partition order.
        members: Vec<ItemId>,
        /// Lanes used by the partition.
        lane_count: u16,
    },
    /// The item ended up alone; its hint was reset to lane 0.
    Normalized,
}

impl LaneResolution {
    /// Short name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kept => "kept",
            Self::Pinned => "pinned",
            Self::Swapped { .. } => "swapped",
            Self::Repacked { .. } => "repacked",
            Self::Partitioned { .. } => "partitioned",
            Self::Normalized => "normalized",
        }
    }
}

impl std::fmt::Display for LaneResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a commit: the patch plus the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Changes for the item store to apply.
    pub patch: Patch,
    /// Lane rule applied.
    pub resolution: LaneResolution,
}

impl Commit {
    /// A commit that changes nothing.
    #[must_use]
    pub const fn unchanged() -> Self {
        Self {
            patch: Patch::new(),
            resolution: LaneResolution::Kept,
        }
    }
}
