#![forbid(unsafe_code)]

//! Day-planner runtime.
//!
//! This crate drives the interactive side of a timeline drag on top of the
//! pure layout and commit rules in `dayplan-layout`.
//!
//! # Key Components
//!
//! - [`AutoScroller`] - Idle/Active edge auto-scroll state machine
//! - [`AutoScrollDriver`] - Ticks an [`AutoScroller`] from a [`FrameClock`](dayplan_core::FrameClock)
//!   and writes offsets to a [`ViewportHost`]
//! - [`DragSession`] - One move or resize gesture from pointer-down to commit
//! - [`PlannerConfig`] - Policy-as-data configuration, loadable from TOML/JSON
//!
//! # How it fits in the system
//! `dayplan-core` owns the data model and pure gesture math,
//! `dayplan-layout` owns lane assignment and commit rules, and this crate
//! owns everything that depends on frame time or a scroll container.

pub mod autoscroll;
pub mod config;
pub mod drag;
pub mod viewport;

pub use autoscroll::{
    AutoScrollConfig, AutoScrollDriver, AutoScrollPhase, AutoScroller, ScrollDirection,
};
pub use config::{AutoScrollPolicyConfig, ConfigError, PlannerConfig};
pub use drag::{DragKind, DragSession};
pub use viewport::{FixedViewport, ViewportHost};
