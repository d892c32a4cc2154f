//! Axis-aligned 3D geometry: points, poses, and the per-container spatial
//! index (spec.md §4.A).
//!
//! Generalizes the teacher crate's 1-D `Interval`/`IntervalSet` pair (a
//! single scheduling axis) to three axes at once. The overlap test for two
//! axis-aligned boxes is itself separable — two boxes overlap iff their
//! projections overlap on *every* axis — so each axis reuses exactly the
//! teacher's `Interval::overlaps` logic (`self.start <= other.end && other.start
//! <= self.end`), just evaluated three times instead of once.

mod pose;
mod spatial_index;

pub use pose::{Dimensions, Length, Point3, Pose};
pub use spatial_index::SpatialIndex;
