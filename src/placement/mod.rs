//! Placement planner (spec.md §4.B): ordering, direct placement, and
//! rearrangement when direct placement fails.
//!
//! Generalizes the teacher's `algorithms::est::engine::schedule_segment`
//! loop — recompute candidates, commit the best one, advance, repeat — from
//! a single scheduling cursor to a batch of items against a set of 3D
//! spatial indices.

mod engine;
mod ordering;
mod rearrange;

pub use engine::{Assignment, PlaceBatchReport, PlacementPlanner};
pub use rearrange::MoveStep;
