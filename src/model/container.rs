use crate::error::{InventoryError, Result};
use crate::geometry::{Dimensions, SpatialIndex};
use crate::Id;

/// A rectangular stowage container (spec.md §3).
///
/// Owns its [`SpatialIndex`] directly rather than through a side table: the
/// index's occupied-item keys already *are* the "container_id → set of
/// item_ids" back-reference spec.md §9 asks for, so no parallel structure is
/// needed.
#[derive(Debug, Clone)]
pub struct Container {
    id: Id,
    zone: String,
    dims: Dimensions,
    index: SpatialIndex,
}

impl Container {
    pub fn new(id: impl Into<Id>, zone: impl Into<String>, dims: Dimensions) -> Result<Self> {
        if dims.w.value() <= 0.0 || dims.d.value() <= 0.0 || dims.h.value() <= 0.0 {
            return Err(InventoryError::invalid_input("container dimensions must be positive"));
        }
        Ok(Self {
            id: id.into(),
            zone: zone.into(),
            index: SpatialIndex::new(dims),
            dims,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut SpatialIndex {
        &mut self.index
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &Id> {
        self.index.occupied_poses().map(|(id, _)| id)
    }

    pub fn utilization(&self) -> f64 {
        self.index.utilization()
    }
}
