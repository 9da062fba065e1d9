#![forbid(unsafe_code)]

//! Core: items, day windows, interval normalization, and gesture math.
//!
//! # Role in dayplan
//! `dayplan-core` is the input layer of the lane engine. It owns the item
//! snapshot types the rest of the workspace consumes, the conversion from
//! absolute timestamps into day-relative minute segments, the pixel metrics
//! of the timeline axis, and the snapping math that turns raw drag
//! translations into minute/lane deltas.
//!
//! # Primary responsibilities
//! - **Item / ItemId**: the caller-owned activity snapshot.
//! - **DayWindow**: absolute time ↔ day-relative minutes.
//! - **Segment**: clamped, clipped, display-ready interval (see [`interval`]).
//! - **TimelineMetrics**: minute ↔ pixel mapping and block rectangles.
//! - **Gesture math**: snapped preview deltas (see [`gesture`]).
//! - **FrameClock**: injectable time source for frame-driven controllers.
//!
//! # How it fits in the system
//! `dayplan-layout` consumes segments and items to assign lanes and commit
//! mutations; `dayplan-runtime` drives auto-scroll from a [`clock::FrameClock`]
//! and folds scroll offsets into the gesture math defined here. Nothing in
//! this crate performs I/O or logging.

pub mod clock;
pub mod geometry;
pub mod gesture;
pub mod interval;
pub mod item;
pub mod time;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use geometry::{BlockRect, TimelineMetrics};
pub use gesture::{PreviewDelta, lane_delta, snap_minutes, snapped_minutes_for_dy};
pub use interval::{MIN_SLIVER_MINUTES, Segment, effective_end, normalize};
pub use item::{Item, ItemId};
pub use time::{DayWindow, MINUTES_PER_DAY, add_minutes};
