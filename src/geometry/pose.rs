use std::fmt::Display;

use qtty::{Meter, Quantity};

/// A length on the station's single consistent length axis unit.
///
/// Reuses the teacher crate's typed-quantity idiom (`solution_space::Interval<U>`)
/// rather than bare `f64`, so a coordinate can never be silently mixed with a
/// mass or a duration.
pub type Length = Quantity<Meter>;

/// A point in the three axes of a container: width, depth, height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub w: Length,
    pub d: Length,
    pub h: Length,
}

impl Point3 {
    pub const fn new(w: Length, d: Length, h: Length) -> Self {
        Self { w, d, h }
    }

    pub fn from_f64(w: f64, d: f64, h: f64) -> Self {
        Self::new(Length::new(w), Length::new(d), Length::new(h))
    }

    fn componentwise_le(&self, other: &Point3) -> bool {
        self.w.value() <= other.w.value()
            && self.d.value() <= other.d.value()
            && self.h.value() <= other.h.value()
    }
}

impl Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.w.value(), self.d.value(), self.h.value())
    }
}

/// An item's or container's extent along the three axes (spec.md §3: "three
/// positive dimensions W, D, H").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub w: Length,
    pub d: Length,
    pub h: Length,
}

impl Dimensions {
    pub const fn new(w: Length, d: Length, h: Length) -> Self {
        Self { w, d, h }
    }

    pub fn from_f64(w: f64, d: f64, h: f64) -> Self {
        Self::new(Length::new(w), Length::new(d), Length::new(h))
    }

    /// `fits(item_dims, container_dims) -> bool` of spec.md §4.A: componentwise ≤.
    pub fn fits_within(&self, container: &Dimensions) -> bool {
        self.w.value() <= container.w.value()
            && self.d.value() <= container.d.value()
            && self.h.value() <= container.h.value()
    }

    pub fn volume(&self) -> f64 {
        self.w.value() * self.d.value() * self.h.value()
    }

    /// The six axis-aligned rotations of spec.md §9 ("rotation as
    /// enumeration"): every permutation of `(W, D, H)`, identity first.
    pub fn rotations(&self) -> [Dimensions; 6] {
        let (w, d, h) = (self.w, self.d, self.h);
        [
            Dimensions::new(w, d, h),
            Dimensions::new(w, h, d),
            Dimensions::new(d, w, h),
            Dimensions::new(d, h, w),
            Dimensions::new(h, w, d),
            Dimensions::new(h, d, w),
        ]
    }
}

/// An axis-aligned box `(start, end)` within a container (spec.md §3).
///
/// `start < end` componentwise is enforced at construction time, mirroring
/// the teacher's `Interval::new` panic-on-inversion contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    start: Point3,
    end: Point3,
}

impl Pose {
    /// Creates a pose `(start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not strictly less than `end` on every axis.
    pub fn new(start: Point3, end: Point3) -> Self {
        assert!(
            start.w.value() < end.w.value()
                && start.d.value() < end.d.value()
                && start.h.value() < end.h.value(),
            "Pose start must be strictly less than end on every axis"
        );
        Self { start, end }
    }

    /// Builds the pose anchored at `start` with the given extent.
    pub fn from_anchor(start: Point3, dims: Dimensions) -> Self {
        let end = Point3::new(start.w + dims.w, start.d + dims.d, start.h + dims.h);
        Self::new(start, end)
    }

    pub const fn start(&self) -> Point3 {
        self.start
    }

    pub const fn end(&self) -> Point3 {
        self.end
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.end.w - self.start.w,
            self.end.d - self.start.d,
            self.end.h - self.start.h,
        )
    }

    pub fn volume(&self) -> f64 {
        self.dimensions().volume()
    }

    /// True iff this pose lies entirely within a container of the given
    /// dimensions, anchored at the container's origin.
    pub fn within_bounds(&self, container: &Dimensions) -> bool {
        self.start.w.value() >= 0.0
            && self.start.d.value() >= 0.0
            && self.start.h.value() >= 0.0
            && self.end.w.value() <= container.w.value()
            && self.end.d.value() <= container.d.value()
            && self.end.h.value() <= container.h.value()
    }

    /// `overlaps(a, b) -> bool` of spec.md §4.A: the two open boxes share
    /// interior volume iff none of the six separating-plane conditions
    /// holds. Generalizes the teacher's `Interval::overlaps` to three axes,
    /// evaluated once per axis.
    pub fn overlaps(&self, other: &Pose) -> bool {
        axis_overlaps(self.start.w.value(), self.end.w.value(), other.start.w.value(), other.end.w.value())
            && axis_overlaps(self.start.d.value(), self.end.d.value(), other.start.d.value(), other.end.d.value())
            && axis_overlaps(self.start.h.value(), self.end.h.value(), other.start.h.value(), other.end.h.value())
    }

    /// The projection of this pose onto the (w, h) plane overlaps `other`'s —
    /// used by the retrieval planner's blocker test (spec.md §4.C).
    pub fn wh_projection_overlaps(&self, other: &Pose) -> bool {
        axis_overlaps(self.start.w.value(), self.end.w.value(), other.start.w.value(), other.end.w.value())
            && axis_overlaps(self.start.h.value(), self.end.h.value(), other.start.h.value(), other.end.h.value())
    }
}

fn axis_overlaps(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && b_start < a_end
}

impl Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
