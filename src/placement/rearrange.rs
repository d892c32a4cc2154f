use crate::geometry::{Dimensions, Point3, Pose};
use crate::model::{ContainerStore, ItemStore};
use crate::Id;

/// A single rearrangement move (spec.md §4.B: "a numbered sequence; each
/// step records (step_index, action = \"move\", item_id, from_container,
/// from_pose, to_container, to_pose)").
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStep {
    pub step_index: u32,
    pub item_id: Id,
    pub from_container: Id,
    pub from_pose: Pose,
    pub to_container: Id,
    pub to_pose: Pose,
}

/// A planned but not-yet-committed move: same fields as [`MoveStep`] minus
/// the step index, which is only assigned once a strategy is chosen.
type PlannedMove = (Id, Id, Pose, Id, Pose);

fn anchor_key(p: Point3) -> (u64, u64, u64) {
    (p.h.value().to_bits(), p.d.value().to_bits(), p.w.value().to_bits())
}

fn is_smaller_anchor(candidate: Point3, current: Point3) -> bool {
    anchor_key(candidate) < anchor_key(current)
}

/// *Compact*: re-anchor each placed item (lowest priority first) to its own
/// `first_free_pose`, then retry the target (spec.md §4.B).
fn try_compact(
    containers: &ContainerStore,
    items: &ItemStore,
    container_id: &str,
    target_dims: Dimensions,
) -> Option<(Pose, Vec<PlannedMove>)> {
    let container = containers.get(container_id)?;
    let mut sandbox = container.index().clone();

    let mut occupant_ids: Vec<Id> = sandbox.occupied_poses().map(|(id, _)| id.clone()).collect();
    occupant_ids.sort_by(|a, b| {
        let pa = items.get(a).map(|i| i.priority()).unwrap_or(0);
        let pb = items.get(b).map(|i| i.priority()).unwrap_or(0);
        pa.cmp(&pb).then(a.cmp(b))
    });

    let mut moves = Vec::new();
    for item_id in occupant_ids {
        let item_dims = items.get(&item_id)?.dims();
        let current_pose = sandbox.pose_of(&item_id)?;
        if let Some(candidate) = sandbox.first_free_pose_excluding(&item_dims, Some(&item_id)) {
            if is_smaller_anchor(candidate.start(), current_pose.start()) {
                sandbox.remove(&item_id);
                sandbox.insert(item_id.clone(), candidate);
                moves.push((
                    item_id,
                    container_id.to_string(),
                    current_pose,
                    container_id.to_string(),
                    candidate,
                ));
            }
        }
    }

    for rotation in target_dims.rotations() {
        if let Some(pose) = sandbox.first_free_pose(&rotation) {
            return Some((pose, moves));
        }
    }
    None
}

/// *Stack similar*: group items sharing a footprint (equal W×D) onto a
/// common (w₀, d₀) column, stacked along h, then retry the target.
fn try_stack_similar(
    containers: &ContainerStore,
    items: &ItemStore,
    container_id: &str,
    target_dims: Dimensions,
) -> Option<(Pose, Vec<PlannedMove>)> {
    let container = containers.get(container_id)?;
    let original = container.index().clone();

    let mut groups: std::collections::HashMap<(u64, u64), Vec<Id>> = std::collections::HashMap::new();
    for (item_id, _) in original.occupied_poses() {
        let dims = items.get(item_id)?.dims();
        groups
            .entry((dims.w.value().to_bits(), dims.d.value().to_bits()))
            .or_default()
            .push(item_id.clone());
    }

    let mut sandbox = original.clone();
    let mut moves = Vec::new();
    let mut group_keys: Vec<_> = groups.keys().cloned().collect();
    group_keys.sort();
    for key in group_keys {
        let mut group = groups.remove(&key).unwrap();
        if group.len() < 2 {
            continue;
        }
        group.sort_by(|a, b| {
            let pa = original.pose_of(a).unwrap().start();
            let pb = original.pose_of(b).unwrap().start();
            pa.h.value().total_cmp(&pb.h.value()).then(a.cmp(b))
        });
        let anchor = original.pose_of(&group[0]).unwrap().start();
        let mut h = anchor.h.value();
        for item_id in &group {
            let dims = items.get(item_id)?.dims();
            let current_pose = sandbox.pose_of(item_id)?;
            let candidate_start = Point3::new(anchor.w, anchor.d, qtty::Quantity::new(h));
            let candidate = Pose::from_anchor(candidate_start, dims);
            if candidate.start() != current_pose.start() && sandbox.can_place_at(&candidate, Some(item_id)) {
                sandbox.remove(item_id);
                sandbox.insert(item_id.clone(), candidate);
                moves.push((
                    item_id.clone(),
                    container_id.to_string(),
                    current_pose,
                    container_id.to_string(),
                    candidate,
                ));
            }
            h += dims.h.value();
        }
    }

    for rotation in target_dims.rotations() {
        if let Some(pose) = sandbox.first_free_pose(&rotation) {
            return Some((pose, moves));
        }
    }
    None
}

/// *Demote low priority*: evict items of strictly lower priority than the
/// target (ascending priority order) into any other container with room,
/// stopping as soon as the target fits.
fn try_demote_low_priority(
    containers: &ContainerStore,
    items: &ItemStore,
    container_id: &str,
    target_dims: Dimensions,
    target_priority: u8,
    all_container_ids: &[Id],
) -> Option<(Pose, Vec<PlannedMove>)> {
    let container = containers.get(container_id)?;
    let mut sandbox = container.index().clone();
    let mut elsewhere: Vec<(Id, crate::geometry::SpatialIndex)> = all_container_ids
        .iter()
        .filter(|id| id.as_str() != container_id)
        .filter_map(|id| containers.get(id).map(|c| (id.clone(), c.index().clone())))
        .collect();

    let mut candidates: Vec<Id> = sandbox
        .occupied_poses()
        .map(|(id, _)| id.clone())
        .filter(|id| items.get(id).map(|i| i.priority() < target_priority).unwrap_or(false))
        .collect();
    candidates.sort_by(|a, b| {
        let pa = items.get(a).map(|i| i.priority()).unwrap_or(0);
        let pb = items.get(b).map(|i| i.priority()).unwrap_or(0);
        pa.cmp(&pb).then(a.cmp(b))
    });

    let mut moves = Vec::new();
    for item_id in candidates {
        if target_dims
            .rotations()
            .iter()
            .any(|r| sandbox.first_free_pose(r).is_some())
        {
            break;
        }
        let item_dims = items.get(&item_id)?.dims();
        let from_pose = sandbox.pose_of(&item_id)?;
        let placed_elsewhere = elsewhere.iter_mut().find_map(|(cid, idx)| {
            item_dims
                .rotations()
                .iter()
                .find_map(|r| idx.first_free_pose(r))
                .map(|pose| (cid.clone(), pose))
        });
        let Some((to_container, to_pose)) = placed_elsewhere else {
            continue;
        };
        sandbox.remove(&item_id);
        let dest_slot = elsewhere.iter().position(|(cid, _)| *cid == to_container)?;
        elsewhere[dest_slot].1.insert(item_id.clone(), to_pose);
        moves.push((item_id, container_id.to_string(), from_pose, to_container, to_pose));
    }

    for rotation in target_dims.rotations() {
        if let Some(pose) = sandbox.first_free_pose(&rotation) {
            return Some((pose, moves));
        }
    }
    None
}

fn projected_utilization(containers: &ContainerStore, items: &ItemStore, container_id: &str, moves: &[PlannedMove], target_dims: Dimensions) -> f64 {
    let container = containers.get(container_id).expect("container exists");
    let volume = container.dims().volume();
    if volume <= 0.0 {
        return 0.0;
    }
    let mut occupied: f64 = container
        .index()
        .occupied_poses()
        .map(|(_, pose)| pose.volume())
        .sum();
    for (item_id, from_container, _, to_container, _) in moves {
        let item_volume = items.get(item_id).map(|i| i.volume()).unwrap_or(0.0);
        if from_container == container_id && to_container != container_id {
            occupied -= item_volume;
        } else if from_container != container_id && to_container == container_id {
            occupied += item_volume;
        }
    }
    occupied += target_dims.volume();
    occupied / volume
}

/// Attempts rearrangement for `target` across every container in
/// `container_ids`, keeping the strategy (of the three) and the container
/// that yields the smallest post-placement utilization overall (spec.md
/// §4.B). Returns `None` if no strategy in any container succeeds, in which
/// case the item is reported unplaced and nothing is mutated.
pub fn attempt(
    containers: &mut ContainerStore,
    items: &mut ItemStore,
    target_dims: Dimensions,
    target_priority: u8,
    container_ids: &[Id],
    next_step_index: &mut u32,
) -> Option<(Id, Pose, Vec<MoveStep>)> {
    let mut best: Option<(Id, Pose, Vec<PlannedMove>, f64)> = None;

    for container_id in container_ids {
        let strategies = [
            try_compact(containers, items, container_id, target_dims),
            try_stack_similar(containers, items, container_id, target_dims),
            try_demote_low_priority(containers, items, container_id, target_dims, target_priority, container_ids),
        ];
        for outcome in strategies.into_iter().flatten() {
            let (pose, moves) = outcome;
            let utilization = projected_utilization(containers, items, container_id, &moves, target_dims);
            let is_better = best.as_ref().map_or(true, |(_, _, _, best_util)| utilization < *best_util);
            if is_better {
                best = Some((container_id.clone(), pose, moves, utilization));
            }
        }
    }

    let (container_id, pose, planned_moves, _) = best?;
    let mut steps = Vec::with_capacity(planned_moves.len());
    for (item_id, from_container, from_pose, to_container, to_pose) in planned_moves {
        containers
            .get_mut(&from_container)
            .expect("source container exists")
            .index_mut()
            .remove(&item_id);
        containers
            .get_mut(&to_container)
            .expect("destination container exists")
            .index_mut()
            .insert(item_id.clone(), to_pose);
        items
            .get_mut(&item_id)
            .expect("moved item exists")
            .set_placement(to_container.clone(), to_pose);
        steps.push(MoveStep {
            step_index: *next_step_index,
            item_id,
            from_container,
            from_pose,
            to_container,
            to_pose,
        });
        *next_step_index += 1;
    }

    Some((container_id, pose, steps))
}
