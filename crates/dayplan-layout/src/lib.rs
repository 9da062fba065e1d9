#![forbid(unsafe_code)]

//! Lane layout and commit rules for a single-day timeline.
//!
//! - [`lanes`]: assign every item of a day to a non-overlapping lane.
//! - [`overlap`]: overlap neighbors and transitive clusters on raw intervals.
//! - [`mutation`]: turn finished move, resize, and lane drags into patches.
//! - [`store`]: the seam to whoever owns item persistence.
//!
//! The typical loop is: query items, [`layout`] them, preview a drag with
//! [`MutationEngine::preview_move`], commit it, hand the [`Patch`] to the
//! [`ItemStore`], and lay out again.

pub mod config;
pub mod lanes;
pub mod mutation;
pub mod overlap;
pub mod patch;
pub mod store;

pub use config::{
    DEFAULT_DURATION_MINUTES, DEFAULT_MAX_SPAN_DAYS, DEFAULT_MIN_DURATION_MINUTES,
    DEFAULT_SNAP_MINUTES, TimelineConfig,
};
pub use lanes::{LaneLayout, LayoutResult, layout, max_concurrency};
pub use mutation::{MutationEngine, partition, pin_and_pack};
pub use overlap::{cluster, cluster_ids, neighbors, overlaps};
pub use patch::{Commit, ItemPatch, LaneResolution, Patch};
pub use store::{ItemStore, VecStore};
