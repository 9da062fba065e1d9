#![forbid(unsafe_code)]

//! The item store seam.
//!
//! The store owns item persistence. The engine only reads snapshots from it
//! and hands back patches; the store decides when and how they are saved.

use dayplan_core::{Item, ItemId};

use crate::patch::Patch;

/// Source of item snapshots and sink for committed patches.
pub trait ItemStore {
    /// Current items for the displayed day.
    fn items(&self) -> &[Item];

    /// Apply a committed patch.
    fn apply(&mut self, patch: &Patch);

    /// Look up a single item.
    fn get(&self, id: ItemId) -> Option<&Item> {
        self.items().iter().find(|item| item.id == id)
    }
}

/// In-memory store backed by a `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecStore {
    items: Vec<Item>,
    revision: u64,
}

impl VecStore {
    /// Create a store holding `items`.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, revision: 0 }
    }

    /// Number of patches applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Consume the store, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl ItemStore for VecStore {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn apply(&mut self, patch: &Patch) {
        if patch.is_empty() {
            return;
        }
        patch.apply(&mut self.items);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn apply_bumps_revision_only_for_real_changes() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut store = VecStore::new(vec![Item::open_ended(ItemId(1), start)]);
        store.apply(&Patch::new());
        assert_eq!(store.revision(), 0);

        let mut patch = Patch::new();
        patch.set_lane_hint(ItemId(1), 2);
        store.apply(&patch);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.get(ItemId(1)).map(|i| i.lane_hint), Some(2));
    }
}
