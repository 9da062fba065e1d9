#![forbid(unsafe_code)]

//! Item snapshots supplied by the item store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::add_minutes;

/// Stable identifier for an item.
///
/// Identity is owned by the item store; the engine never mints or re-uses ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create an id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// A time-ranged activity as seen by the lane engine.
///
/// `kind` is an opaque tag for collaborators (rendering, editors). The engine
/// carries it through untouched and never branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity.
    pub id: ItemId,
    /// Start timestamp.
    pub start: NaiveDateTime,
    /// Explicit end timestamp, if any.
    pub end: Option<NaiveDateTime>,
    /// Advisory preferred lane.
    #[serde(default)]
    pub lane_hint: u16,
    /// Opaque collaborator tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    /// Create an item with an explicit end.
    #[must_use]
    pub fn new(id: ItemId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id,
            start,
            end: Some(end),
            lane_hint: 0,
            kind: None,
        }
    }

    /// Create an open-ended item (end falls back to the default duration).
    #[must_use]
    pub fn open_ended(id: ItemId, start: NaiveDateTime) -> Self {
        Self {
            id,
            start,
            end: None,
            lane_hint: 0,
            kind: None,
        }
    }

    /// Set the lane hint (builder pattern).
    #[must_use]
    pub fn with_lane_hint(mut self, lane: u16) -> Self {
        self.lane_hint = lane;
        self
    }

    /// Set the opaque kind tag (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// End timestamp, substituting `start + default_duration_minutes` when
    /// no explicit end is set. Saturates at `NaiveDateTime::MAX`.
    #[must_use]
    pub fn effective_end(&self, default_duration_minutes: u32) -> NaiveDateTime {
        self.end
            .unwrap_or_else(|| add_minutes(self.start, i64::from(default_duration_minutes)))
    }
}
