//! Retrieval planner (spec.md §4.C): blocker detection and the ordered
//! remove/retrieve/place step list for a target item.

mod planner;

pub use planner::{RetrievalPlanner, RetrievalStep, StepAction};
