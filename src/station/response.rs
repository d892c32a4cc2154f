use chrono::{DateTime, Utc};

use crate::geometry::Pose;
use crate::model::ActionKind;
use crate::placement::{Assignment, MoveStep};
use crate::retrieval::RetrievalStep;
use crate::simulation::{ExpiredChange, UsageChange};
use crate::waste::{ManifestEntry, ReturnStep};
use crate::Id;
use std::collections::HashMap;

/// Response of [`crate::Station::place_batch`] (spec.md §6: "PlaceBatch(...)
/// -> { placements, rearrangements, unplaced, utilization[container] }").
#[derive(Debug, Clone, Default)]
pub struct PlaceBatchResponse {
    pub placements: Vec<Assignment>,
    pub rearrangements: Vec<MoveStep>,
    pub unplaced: Vec<Id>,
    pub utilization: HashMap<Id, f64>,
}

/// A trimmed item projection returned by [`crate::Station::search`]
/// (spec.md §6: "Search(...) -> { found, item, retrieval_steps, totals }").
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub item_id: Id,
    pub name: String,
    pub container_id: Option<Id>,
    pub zone: Option<String>,
    pub pose: Option<Pose>,
    pub priority: u8,
    pub usage_limit: Option<u32>,
    pub uses_remaining: Option<u32>,
    pub is_waste: bool,
}

/// Response of [`crate::Station::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub found: bool,
    pub item: Option<ItemSummary>,
    pub retrieval_steps: Vec<RetrievalStep>,
    pub total_items: usize,
    pub active_items: usize,
}

/// Response of [`crate::Station::waste_identify`] (spec.md §6:
/// "WasteIdentify() -> list of waste items with reason and pose").
#[derive(Debug, Clone, PartialEq)]
pub struct WasteItemSummary {
    pub item_id: Id,
    pub name: String,
    pub reason: &'static str,
    pub container_id: Option<Id>,
    pub pose: Option<Pose>,
}

/// Response of [`crate::Station::return_plan`] (spec.md §6: "ReturnPlan(...)
/// -> { returnPlan, retrievalSteps, manifest }").
#[derive(Debug, Clone, Default)]
pub struct ReturnPlanResponse {
    pub return_plan: Vec<ReturnStep>,
    pub retrieval_steps: Vec<crate::waste::RetrievalStep>,
    pub manifest: Vec<ManifestEntry>,
    pub total_volume: f64,
    pub total_mass: f64,
}

/// Response of [`crate::Station::simulate`] (spec.md §6: "Simulate(...) ->
/// { newDate, changes }").
#[derive(Debug, Clone, Default)]
pub struct SimulateResponse {
    pub new_date: Option<DateTime<Utc>>,
    pub items_used: Vec<UsageChange>,
    pub items_depleted: Vec<UsageChange>,
    pub items_expired: Vec<ExpiredChange>,
}

/// One entry of [`crate::Station::logs`]'s result (spec.md §6: "Logs(...)
/// -> ordered log entries").
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntrySummary {
    pub timestamp: DateTime<Utc>,
    pub user_id: Id,
    pub action: ActionKind,
    pub item_id: Id,
    pub detail: String,
}
