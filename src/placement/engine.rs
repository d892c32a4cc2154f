use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::geometry::Pose;
use crate::model::{ContainerStore, ItemStore};
use crate::placement::ordering::compare_for_placement;
use crate::placement::rearrange::{self, MoveStep};
use crate::Id;

/// A committed `(item_id, container_id, pose)` assignment (spec.md §4.B).
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub item_id: Id,
    pub container_id: Id,
    pub pose: Pose,
}

/// Result of a [`PlacementPlanner::place_batch`] call.
#[derive(Debug, Clone, Default)]
pub struct PlaceBatchReport {
    pub placements: Vec<Assignment>,
    pub rearrangements: Vec<MoveStep>,
    pub unplaced: Vec<Id>,
    pub utilization: HashMap<Id, f64>,
}

/// The 3D bin-packing engine of spec.md §4.B.
///
/// Generalizes the teacher's `algorithms::est::engine::schedule_segment`
/// cursor loop (recompute candidates, commit the best, advance) from a
/// single 1-D timeline to a batch of items against many 3-D container
/// indices: ordering happens once up front (items don't become "more or
/// less placeable" as others are placed, unlike EST's shifting candidate
/// windows), then each item is committed or deferred to rearrangement in
/// turn.
pub struct PlacementPlanner;

impl PlacementPlanner {
    /// Places `item_ids` (already present in `items`) into `container_ids`
    /// (already present in `containers`), in the input container order
    /// spec.md §4.B requires ("iterate containers in their input order").
    ///
    /// Waste items in the batch are skipped (spec.md §3: waste is "excluded
    /// from placement"). Already-placed items are re-placed from scratch:
    /// callers that want to keep an existing placement should simply not
    /// include that item id in the batch.
    pub fn place_batch(
        containers: &mut ContainerStore,
        items: &mut ItemStore,
        item_ids: &[Id],
        container_ids: &[Id],
    ) -> Result<PlaceBatchReport> {
        for id in item_ids {
            items.require(id)?;
        }
        for id in container_ids {
            containers.require(id)?;
        }

        let mut ordered: Vec<Id> = {
            let mut refs: Vec<&crate::model::Item> =
                item_ids.iter().map(|id| items.get(id).expect("validated above")).collect();
            refs.sort_by(|a, b| compare_for_placement(a, b));
            refs.into_iter().map(|i| i.id().to_string()).collect()
        };
        ordered.retain(|id| !items.get(id).expect("validated above").is_waste());

        let mut report = PlaceBatchReport::default();
        let mut next_step_index: u32 = 1;

        for item_id in ordered {
            let dims = items.get(&item_id).expect("validated above").dims();
            let preferred_zone = items.get(&item_id).expect("validated above").preferred_zone().to_string();

            let (preferred, other): (Vec<Id>, Vec<Id>) = container_ids
                .iter()
                .cloned()
                .partition(|cid| containers.get(cid).map(|c| c.zone() == preferred_zone).unwrap_or(false));

            let direct = Self::first_direct_pose(containers, &dims, &preferred)
                .or_else(|| Self::first_direct_pose(containers, &dims, &other));

            if let Some((container_id, pose)) = direct {
                debug!(item = %item_id, container = %container_id, "direct placement found");
                containers
                    .get_mut(&container_id)
                    .expect("validated above")
                    .index_mut()
                    .insert(item_id.clone(), pose);
                items.get_mut(&item_id).expect("validated above").set_placement(container_id.clone(), pose);
                report.placements.push(Assignment { item_id, container_id, pose });
                continue;
            }

            let item_priority = items.get(&item_id).expect("validated above").priority();
            match rearrange::attempt(containers, items, dims, item_priority, container_ids, &mut next_step_index) {
                Some((container_id, pose, mut steps)) => {
                    info!(item = %item_id, container = %container_id, moves = steps.len(), "placed via rearrangement");
                    containers
                        .get_mut(&container_id)
                        .expect("validated above")
                        .index_mut()
                        .insert(item_id.clone(), pose);
                    items.get_mut(&item_id).expect("validated above").set_placement(container_id.clone(), pose);
                    report.rearrangements.append(&mut steps);
                    report.placements.push(Assignment { item_id, container_id, pose });
                }
                None => {
                    debug!(item = %item_id, "unplaced");
                    report.unplaced.push(item_id);
                }
            }
        }

        for container_id in container_ids {
            let utilization = containers.get(container_id).expect("validated above").utilization();
            report.utilization.insert(container_id.clone(), utilization);
        }

        Ok(report)
    }

    fn first_direct_pose(containers: &ContainerStore, dims: &crate::geometry::Dimensions, candidates: &[Id]) -> Option<(Id, Pose)> {
        for container_id in candidates {
            let container = containers.get(container_id)?;
            for rotation in dims.rotations() {
                if let Some(pose) = container.index().first_free_pose(&rotation) {
                    return Some((container_id.clone(), pose));
                }
            }
        }
        None
    }
}
