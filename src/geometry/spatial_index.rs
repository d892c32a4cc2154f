use std::collections::HashMap;

use crate::geometry::{Dimensions, Point3, Pose};
use crate::Id;

/// Per-container occupied-box tracker (spec.md §4.A).
///
/// Keyed by item id rather than holding a bare `Vec<Pose>` like the teacher's
/// `IntervalSet<U>`, because `insert`/`remove` here must be addressable by
/// the item that owns the box — two items can (legitimately, if briefly
/// during rearrangement) occupy geometrically distinct but numerically
/// identical-looking boxes, and the planner always knows which item it is
/// moving.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    container_dims: Dimensions,
    occupied: HashMap<Id, Pose>,
}

/// Lattice step of spec.md §4.A ("anchors are enumerated on integer lattice
/// points spaced by 1 unit").
const LATTICE_STEP: f64 = 1.0;

impl SpatialIndex {
    pub fn new(container_dims: Dimensions) -> Self {
        Self {
            container_dims,
            occupied: HashMap::new(),
        }
    }

    pub fn container_dims(&self) -> Dimensions {
        self.container_dims
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn occupied_poses(&self) -> impl Iterator<Item = (&Id, &Pose)> {
        self.occupied.iter()
    }

    pub fn pose_of(&self, item_id: &str) -> Option<Pose> {
        self.occupied.get(item_id).copied()
    }

    /// `fits(item_dims, container_dims) -> bool` of spec.md §4.A.
    pub fn fits(&self, item_dims: &Dimensions) -> bool {
        item_dims.fits_within(&self.container_dims)
    }

    /// Sum of occupied box volumes over the container's volume, ∈ [0, 1]
    /// (GLOSSARY: Utilization).
    pub fn utilization(&self) -> f64 {
        let container_volume = self.container_dims.volume();
        if container_volume <= 0.0 {
            return 0.0;
        }
        let occupied_volume: f64 = self.occupied.values().map(Pose::volume).sum();
        occupied_volume / container_volume
    }

    fn overlaps_any(&self, candidate: &Pose, excluding: Option<&str>) -> bool {
        self.occupied.iter().any(|(id, pose)| {
            if excluding == Some(id.as_str()) {
                return false;
            }
            candidate.overlaps(pose)
        })
    }

    /// True iff `pose` lies within the container and overlaps no other
    /// occupied box. `excluding` lets a caller re-check an item's own
    /// current pose (e.g. during compaction) without self-collision.
    pub fn can_place_at(&self, pose: &Pose, excluding: Option<&str>) -> bool {
        pose.within_bounds(&self.container_dims) && !self.overlaps_any(pose, excluding)
    }

    /// `first_free_pose(container, item_dims) -> Option<Pose>` of spec.md
    /// §4.A: the lexicographically smallest (h, d, w) anchor such that the
    /// candidate pose fits and overlaps nothing, scanning h outermost, then
    /// d, then w innermost.
    ///
    /// Grounded on `original_source/app/services/placement.py`'s
    /// `_find_position_in_container`, which nests the same three loops in
    /// the same order (z outer, y middle, x inner).
    pub fn first_free_pose(&self, item_dims: &Dimensions) -> Option<Pose> {
        self.first_free_pose_excluding(item_dims, None)
    }

    /// Same as [`Self::first_free_pose`], but ignores the named item's own
    /// current box — used by the compaction strategy to find a pose for an
    /// item that is itself already occupying space in this index.
    pub fn first_free_pose_excluding(&self, item_dims: &Dimensions, excluding: Option<&str>) -> Option<Pose> {
        if !self.fits(item_dims) {
            return None;
        }
        let max_w = self.container_dims.w.value() - item_dims.w.value();
        let max_d = self.container_dims.d.value() - item_dims.d.value();
        let max_h = self.container_dims.h.value() - item_dims.h.value();

        let mut h = 0.0;
        while h <= max_h + f64::EPSILON {
            let mut d = 0.0;
            while d <= max_d + f64::EPSILON {
                let mut w = 0.0;
                while w <= max_w + f64::EPSILON {
                    let start = Point3::from_f64(w, d, h);
                    let candidate = Pose::from_anchor(start, *item_dims);
                    if self.can_place_at(&candidate, excluding) {
                        return Some(candidate);
                    }
                    w += LATTICE_STEP;
                }
                d += LATTICE_STEP;
            }
            h += LATTICE_STEP;
        }
        None
    }

    /// `insert(pose)` of spec.md §4.A. Callers are expected to have already
    /// validated the pose via [`Self::can_place_at`] or
    /// [`Self::first_free_pose`]; this method does not re-check.
    pub fn insert(&mut self, item_id: Id, pose: Pose) {
        self.occupied.insert(item_id, pose);
    }

    /// `remove(pose)` of spec.md §4.A, addressed by item id.
    pub fn remove(&mut self, item_id: &str) -> Option<Pose> {
        self.occupied.remove(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: f64, d: f64, h: f64) -> Dimensions {
        Dimensions::from_f64(w, d, h)
    }

    #[test]
    fn first_free_pose_on_empty_container_is_the_origin() {
        let index = SpatialIndex::new(dims(10.0, 10.0, 10.0));
        let pose = index.first_free_pose(&dims(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(pose.start(), Point3::from_f64(0.0, 0.0, 0.0));
        assert_eq!(pose.end(), Point3::from_f64(2.0, 2.0, 2.0));
    }

    #[test]
    fn first_free_pose_skips_occupied_space() {
        let mut index = SpatialIndex::new(dims(4.0, 4.0, 4.0));
        index.insert(
            "i1".into(),
            Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), dims(3.0, 3.0, 3.0)),
        );
        let pose = index.first_free_pose(&dims(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(pose.start(), Point3::from_f64(3.0, 0.0, 0.0));
    }

    #[test]
    fn first_free_pose_returns_none_when_too_large() {
        let index = SpatialIndex::new(dims(2.0, 2.0, 2.0));
        assert!(index.first_free_pose(&dims(3.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn scan_order_is_h_outer_d_middle_w_inner() {
        let mut index = SpatialIndex::new(dims(4.0, 4.0, 4.0));
        index.insert(
            "i1".into(),
            Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), dims(4.0, 4.0, 1.0)),
        );
        let pose = index.first_free_pose(&dims(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(pose.start().h.value(), 1.0);
        assert_eq!(pose.start().d.value(), 0.0);
        assert_eq!(pose.start().w.value(), 0.0);
    }

    #[test]
    fn insert_then_remove_frees_the_box() {
        let mut index = SpatialIndex::new(dims(2.0, 2.0, 2.0));
        let pose = Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), dims(2.0, 2.0, 2.0));
        index.insert("i1".into(), pose);
        assert!(index.first_free_pose(&dims(1.0, 1.0, 1.0)).is_none());
        index.remove("i1");
        assert!(index.first_free_pose(&dims(1.0, 1.0, 1.0)).is_some());
    }

    #[test]
    fn utilization_is_occupied_over_total_volume() {
        let mut index = SpatialIndex::new(dims(10.0, 10.0, 10.0));
        index.insert(
            "i1".into(),
            Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), dims(2.0, 2.0, 2.0)),
        );
        assert!((index.utilization() - 0.008).abs() < 1e-9);
    }

    #[test]
    fn can_place_at_excludes_named_item() {
        let mut index = SpatialIndex::new(dims(4.0, 4.0, 4.0));
        let pose = Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), dims(2.0, 2.0, 2.0));
        index.insert("i1".into(), pose);
        assert!(!index.can_place_at(&pose, None));
        assert!(index.can_place_at(&pose, Some("i1")));
    }
}
