#![forbid(unsafe_code)]

//! Overlap queries on effective (unclamped) item intervals.
//!
//! Unlike the display segments produced by a layout pass, these queries use
//! each item's raw start and effective end, so cluster membership does not
//! depend on which day window is displayed.
//!
//! # Invariants
//!
//! 1. `overlaps` is symmetric and uses half-open ranges: touching endpoints
//!    do not overlap.
//! 2. `cluster` returns a closed set: every item overlapping a member is a
//!    member. The anchor is always included.
//! 3. `cluster` terminates on any finite input (each item is visited once).

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use dayplan_core::{Item, ItemId};

/// Half-open overlap test on effective intervals.
#[must_use]
pub fn overlaps(a: &Item, b: &Item, default_duration_minutes: u32) -> bool {
    a.start < b.effective_end(default_duration_minutes)
        && b.start < a.effective_end(default_duration_minutes)
}

/// Items directly overlapping `anchor`, in input order. The anchor itself
/// (matched by id) is excluded.
#[must_use]
pub fn neighbors<'a>(
    anchor: &Item,
    items: &'a [Item],
    default_duration_minutes: u32,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|other| other.id != anchor.id && overlaps(anchor, other, default_duration_minutes))
        .collect()
}

/// The overlap cluster containing `anchor`: every item transitively
/// connected to it by pairwise overlap.
///
/// Members are returned in input order. If `anchor` is not part of `items`
/// it is prepended.
#[must_use]
pub fn cluster<'a>(
    anchor: &'a Item,
    items: &'a [Item],
    default_duration_minutes: u32,
) -> Vec<&'a Item> {
    let spans: Vec<(NaiveDateTime, NaiveDateTime)> = items
        .iter()
        .map(|item| (item.start, item.effective_end(default_duration_minutes)))
        .collect();

    let mut visited = vec![false; items.len()];
    let mut queue: VecDeque<(NaiveDateTime, NaiveDateTime)> = VecDeque::new();

    let anchor_index = items.iter().position(|item| item.id == anchor.id);
    if let Some(i) = anchor_index {
        visited[i] = true;
    }
    queue.push_back((anchor.start, anchor.effective_end(default_duration_minutes)));

    while let Some((start, end)) = queue.pop_front() {
        for (i, &(other_start, other_end)) in spans.iter().enumerate() {
            if visited[i] {
                continue;
            }
            if start < other_end && other_start < end {
                visited[i] = true;
                queue.push_back((other_start, other_end));
            }
        }
    }

    let mut members: Vec<&Item> = Vec::new();
    if anchor_index.is_none() {
        members.push(anchor);
    }
    members.extend(
        items
            .iter()
            .zip(&visited)
            .filter_map(|(item, &seen)| seen.then_some(item)),
    );
    members
}

/// Ids of the overlap cluster containing `anchor`, in input order.
#[must_use]
pub fn cluster_ids(anchor: &Item, items: &[Item], default_duration_minutes: u32) -> Vec<ItemId> {
    cluster(anchor, items, default_duration_minutes)
        .into_iter()
        .map(|item| item.id)
        .collect()
}
