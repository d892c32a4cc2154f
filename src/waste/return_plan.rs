use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::model::ItemStore;
use crate::waste::identify::WasteReason;
use crate::Id;

/// One `(fromContainer, toContainer)` move into the undocking container
/// (spec.md §4.D).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStep {
    pub step_index: u32,
    pub item_id: Id,
    pub item_name: String,
    pub from_container: Id,
    pub to_container: Id,
}

/// One `retrieve` step accompanying a [`ReturnStep`] (spec.md §4.D: "a
/// retrieval step").
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalStep {
    pub step_index: u32,
    pub item_id: Id,
    pub item_name: String,
}

/// One manifest line: the item and why it was selected for return.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub item_id: Id,
    pub item_name: String,
    pub reason: WasteReason,
}

/// Full report of a [`plan_return`] call.
#[derive(Debug, Clone, Default)]
pub struct ReturnPlanReport {
    pub return_plan: Vec<ReturnStep>,
    pub retrieval_steps: Vec<RetrievalStep>,
    pub manifest: Vec<ManifestEntry>,
    pub total_volume: f64,
    pub total_mass: f64,
}

/// Greedily selects waste items for undocking under a weight cap (spec.md
/// §4.D).
///
/// Waste items are ordered by `(start.d ascending, start.h ascending)` —
/// nearest the opening and lowest in the stack first (spec.md §9(b) pins
/// this as the *sole* return-plan ordering, never expiry) — then
/// accumulated while `Σ mass <= max_weight`, stopping at the first item
/// that would exceed the cap with no backtracking. Grounded on
/// `original_source/app/services/waste.py`'s `plan_waste_return`, with the
/// depth/height sort substituted for its ambiguous variant-dependent key.
pub fn plan_return(
    items: &ItemStore,
    undocking_container_id: &str,
    undocking_date: DateTime<Utc>,
    max_weight: f64,
) -> Result<ReturnPlanReport> {
    if max_weight < 0.0 {
        return Err(InventoryError::invalid_input("maxWeight must be non-negative"));
    }

    let mut waste: Vec<&crate::model::Item> = items.iter().filter(|item| item.is_waste()).collect();
    waste.sort_by(|a, b| {
        let pa = a.pose().expect("waste items considered here are placed").start();
        let pb = b.pose().expect("waste items considered here are placed").start();
        pa.d.value()
            .total_cmp(&pb.d.value())
            .then(pa.h.value().total_cmp(&pb.h.value()))
            .then(a.id().cmp(b.id()))
    });

    let mut report = ReturnPlanReport::default();
    let mut accumulated_mass = 0.0;
    let mut step_index: u32 = 1;

    for item in waste {
        if accumulated_mass + item.mass() > max_weight {
            debug!(item = item.id(), "return plan stops: next item would exceed max weight");
            break;
        }
        let Some(container_id) = item.container_id() else {
            continue;
        };
        let reason = if item.is_expired_by(undocking_date) {
            WasteReason::Expired
        } else {
            WasteReason::OutOfUses
        };

        report.return_plan.push(ReturnStep {
            step_index,
            item_id: item.id().to_string(),
            item_name: item.name().to_string(),
            from_container: container_id.to_string(),
            to_container: undocking_container_id.to_string(),
        });
        report.retrieval_steps.push(RetrievalStep {
            step_index,
            item_id: item.id().to_string(),
            item_name: item.name().to_string(),
        });
        report.manifest.push(ManifestEntry {
            item_id: item.id().to_string(),
            item_name: item.name().to_string(),
            reason,
        });

        accumulated_mass += item.mass();
        report.total_volume += item.volume();
        report.total_mass += item.mass();
        step_index += 1;
    }

    Ok(report)
}
