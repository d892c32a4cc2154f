use chrono::{DateTime, Utc};

use crate::error::{InventoryError, Result};
use crate::geometry::{Dimensions, Pose};
use crate::Id;

/// A stowed item (spec.md §3).
///
/// Constructed only through [`Item::new`], which enforces the invariants
/// spec.md pins: positive dimensions and mass, a priority in `0..=100`, and
/// `uses_remaining <= usage_limit` whenever a usage limit is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: Id,
    name: String,
    dims: Dimensions,
    mass: f64,
    priority: u8,
    expiry: Option<DateTime<Utc>>,
    usage_limit: Option<u32>,
    uses_remaining: Option<u32>,
    preferred_zone: String,
    placement: Option<(Id, Pose)>,
    is_waste: bool,
}

impl Item {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        dims: Dimensions,
        mass: f64,
        priority: u8,
        expiry: Option<DateTime<Utc>>,
        usage_limit: Option<u32>,
        preferred_zone: impl Into<String>,
    ) -> Result<Self> {
        if dims.w.value() <= 0.0 || dims.d.value() <= 0.0 || dims.h.value() <= 0.0 {
            return Err(InventoryError::invalid_input("item dimensions must be positive"));
        }
        if mass <= 0.0 {
            return Err(InventoryError::invalid_input("item mass must be positive"));
        }
        if priority > 100 {
            return Err(InventoryError::invalid_input("priority must be in 0..=100"));
        }
        let uses_remaining = usage_limit;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            dims,
            mass,
            priority,
            expiry,
            usage_limit,
            uses_remaining,
            preferred_zone: preferred_zone.into(),
            placement: None,
            is_waste: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    pub fn usage_limit(&self) -> Option<u32> {
        self.usage_limit
    }

    pub fn uses_remaining(&self) -> Option<u32> {
        self.uses_remaining
    }

    pub fn preferred_zone(&self) -> &str {
        &self.preferred_zone
    }

    pub fn placement(&self) -> Option<&(Id, Pose)> {
        self.placement.as_ref()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.placement.as_ref().map(|(cid, _)| cid.as_str())
    }

    pub fn pose(&self) -> Option<Pose> {
        self.placement.as_ref().map(|(_, pose)| *pose)
    }

    pub fn is_waste(&self) -> bool {
        self.is_waste
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn volume(&self) -> f64 {
        self.dims.volume()
    }

    /// Sets (or replaces) this item's container and pose. Callers must have
    /// already validated non-overlap via the container's `SpatialIndex`
    /// (spec.md §3: "the item's axis-aligned bounding box ... does not
    /// overlap any other non-waste item's box").
    pub fn set_placement(&mut self, container_id: impl Into<Id>, pose: Pose) {
        self.placement = Some((container_id.into(), pose));
    }

    pub fn clear_placement(&mut self) {
        self.placement = None;
    }

    /// Marks this item waste, unless it already is (spec.md §4.D: "items
    /// already flagged waste are skipped"). Returns whether the flag
    /// actually changed.
    pub fn mark_waste(&mut self) -> bool {
        if self.is_waste {
            return false;
        }
        self.is_waste = true;
        true
    }

    /// Decrements `uses_remaining` by `min(n, uses_remaining)` (spec.md
    /// §4.E), returning the number of uses actually consumed and whether the
    /// item just became depleted. No-op if the item has no usage limit.
    pub fn consume_uses(&mut self, n: u32) -> (u32, bool) {
        let Some(remaining) = self.uses_remaining else {
            return (0, false);
        };
        let consumed = n.min(remaining);
        let new_remaining = remaining - consumed;
        self.uses_remaining = Some(new_remaining);
        (consumed, new_remaining == 0)
    }

    pub fn is_expired_by(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }

    pub fn is_depleted(&self) -> bool {
        self.usage_limit.is_some() && self.uses_remaining == Some(0)
    }
}
