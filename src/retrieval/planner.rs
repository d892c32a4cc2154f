use crate::error::Result;
use crate::model::{Item, ItemStore};
use crate::Id;

/// The three retrieval-step actions of spec.md §4.C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Remove,
    Retrieve,
    Place,
}

/// One step of a retrieval plan (spec.md §4.C: "(step_index starting at 1,
/// action, item_id, item_name)").
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalStep {
    pub step_index: u32,
    pub action: StepAction,
    pub item_id: Id,
    pub item_name: String,
}

/// Computes the ordered remove/retrieve/place step list to extract a target
/// item through its container's open face (spec.md §4.C).
///
/// Grounded on `original_source/app/services/search.py`'s
/// `_find_blocking_items`/`_calculate_retrieval_steps`, with the spec's two
/// redesigns applied: the original's separate "remove" and "setAside" steps
/// collapse into one `Remove` step, and blocker ties break by ascending
/// priority (the original breaks ties only by insertion order).
pub struct RetrievalPlanner;

impl RetrievalPlanner {
    pub fn plan(items: &ItemStore, target_id: &str) -> Result<Vec<RetrievalStep>> {
        let target = items.require(target_id)?;
        let Some((container_id, target_pose)) = target.placement().map(|(c, p)| (c.clone(), *p)) else {
            return Ok(Vec::new());
        };
        let target_name = target.name().to_string();

        let mut blockers: Vec<&Item> = items
            .iter()
            .filter(|candidate| is_blocker(candidate, target_id, &container_id, &target_pose))
            .collect();
        blockers.sort_by(|a, b| {
            let da = a.pose().expect("blocker is placed").start().d.value();
            let db = b.pose().expect("blocker is placed").start().d.value();
            da.total_cmp(&db).then(a.priority().cmp(&b.priority())).then(a.id().cmp(b.id()))
        });

        let mut steps = Vec::with_capacity(blockers.len() * 2 + 1);
        let mut step_index = 1;
        for blocker in &blockers {
            steps.push(RetrievalStep {
                step_index,
                action: StepAction::Remove,
                item_id: blocker.id().to_string(),
                item_name: blocker.name().to_string(),
            });
            step_index += 1;
        }
        steps.push(RetrievalStep {
            step_index,
            action: StepAction::Retrieve,
            item_id: target_id.to_string(),
            item_name: target_name,
        });
        step_index += 1;
        for blocker in blockers.iter().rev() {
            steps.push(RetrievalStep {
                step_index,
                action: StepAction::Place,
                item_id: blocker.id().to_string(),
                item_name: blocker.name().to_string(),
            });
            step_index += 1;
        }

        Ok(steps)
    }
}

fn is_blocker(candidate: &Item, target_id: &str, container_id: &str, target_pose: &crate::geometry::Pose) -> bool {
    if candidate.id() == target_id || candidate.is_waste() {
        return false;
    }
    let Some(candidate_container) = candidate.container_id() else {
        return false;
    };
    if candidate_container != container_id {
        return false;
    }
    let Some(candidate_pose) = candidate.pose() else {
        return false;
    };
    candidate_pose.start().d.value() < target_pose.start().d.value() && candidate_pose.wh_projection_overlaps(target_pose)
}
