//! The transport-agnostic request-surface facade (spec.md §6,
//! SPEC_FULL.md §4.H).
//!
//! `Station` owns the item store, container store, and event log behind the
//! single writer lock of spec.md §5: placement, retrieval planning, waste
//! identification, and simulation acquire it exclusively for the duration
//! of their call; item lookup and log queries acquire it shared. Grounded
//! on the teacher's "global services" design note (spec.md §9) and on
//! `original_source/app/main.py`'s endpoint-to-service dispatch, with the
//! web framework stripped away.

mod response;

use std::sync::RwLock;

use chrono::{DateTime, Utc};

pub use response::{
    ItemSummary, LogEntrySummary, PlaceBatchResponse, ReturnPlanResponse, SearchResponse, SimulateResponse,
    WasteItemSummary,
};

use crate::error::{InventoryError, Result};
use crate::geometry::Pose;
use crate::model::{ActionKind, ContainerStore, EventLog, Item, ItemStore, LogEntry};
use crate::placement::PlacementPlanner;
use crate::retrieval::RetrievalPlanner;
use crate::simulation::{self, TimeMode};
use crate::waste;
use crate::Id;

struct StationState {
    items: ItemStore,
    containers: ContainerStore,
    log: EventLog,
}

/// The process-wide inventory core (spec.md §9: "constructed once at
/// startup and torn down together on shutdown"). `Station` itself holds no
/// global state — a caller constructs exactly one and shares it, typically
/// behind an `Arc`, which is what satisfies spec.md's "process-wide
/// singleton" language without this crate reaching for real statics
/// (SPEC_FULL.md §9's Open Question resolution).
pub struct Station {
    state: RwLock<StationState>,
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}

impl Station {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StationState {
                items: ItemStore::new(),
                containers: ContainerStore::new(),
                log: EventLog::new(),
            }),
        }
    }

    /// Full replace of the item store (spec.md §6: "Ingestion ... is a full
    /// replace of the corresponding store").
    pub fn replace_items(&self, items: Vec<Item>) {
        let mut state = self.state.write().expect("station lock poisoned");
        state.items = ItemStore::new();
        for item in items {
            state.items.insert(item);
        }
    }

    /// Full replace of the container store.
    pub fn replace_containers(&self, containers: Vec<crate::model::Container>) {
        let mut state = self.state.write().expect("station lock poisoned");
        state.containers = ContainerStore::new();
        for container in containers {
            state.containers.insert(container);
        }
    }

    /// `PlaceBatch(items, containers)` of spec.md §6. `item_ids` and
    /// `container_ids` must already be present in the store (via
    /// [`Self::replace_items`]/[`Self::replace_containers`]); the placement
    /// planner itself never partially commits (spec.md §4.B/§7).
    pub fn place_batch(&self, item_ids: &[Id], container_ids: &[Id]) -> Result<PlaceBatchResponse> {
        let mut state = self.state.write().expect("station lock poisoned");
        let report = PlacementPlanner::place_batch(&mut state.containers, &mut state.items, item_ids, container_ids)?;

        let now = Utc::now();
        for assignment in &report.placements {
            state.log.append(LogEntry::new(
                now,
                "system",
                ActionKind::Placement,
                assignment.item_id.clone(),
                format!("container={}", assignment.container_id),
            ));
        }
        for mv in &report.rearrangements {
            state.log.append(LogEntry::new(
                now,
                "system",
                ActionKind::Rearrangement,
                mv.item_id.clone(),
                format!("from={} to={}", mv.from_container, mv.to_container),
            ));
        }

        Ok(PlaceBatchResponse {
            placements: report.placements,
            rearrangements: report.rearrangements,
            unplaced: report.unplaced,
            utilization: report.utilization,
        })
    }

    /// `Search(itemId | itemName)` of spec.md §6. "item not found" is a
    /// normal result (`found: false`), not an error (spec.md §7).
    ///
    /// Classified as retrieval planning (spec.md §5), so it acquires the
    /// exclusive writer lock even though it mutates nothing.
    pub fn search(&self, item_id: Option<&str>, item_name: Option<&str>) -> Result<SearchResponse> {
        let state = self.state.write().expect("station lock poisoned");
        let total_items = state.items.len();
        let active_items = state.items.iter().filter(|i| !i.is_waste()).count();

        let found_id = if let Some(id) = item_id {
            state.items.get(id).map(|item| item.id().to_string())
        } else if let Some(name) = item_name {
            state.items.find_by_name(name).map(|item| item.id().to_string())
        } else {
            None
        };

        let Some(found_id) = found_id else {
            return Ok(SearchResponse {
                found: false,
                total_items,
                active_items,
                ..Default::default()
            });
        };

        let item = state.items.require(&found_id)?;
        let zone = item.container_id().and_then(|cid| state.containers.get(cid)).map(|c| c.zone().to_string());
        let summary = ItemSummary {
            item_id: item.id().to_string(),
            name: item.name().to_string(),
            container_id: item.container_id().map(|s| s.to_string()),
            zone,
            pose: item.pose(),
            priority: item.priority(),
            usage_limit: item.usage_limit(),
            uses_remaining: item.uses_remaining(),
            is_waste: item.is_waste(),
        };
        let retrieval_steps = RetrievalPlanner::plan(&state.items, &found_id)?;

        Ok(SearchResponse {
            found: true,
            item: Some(summary),
            retrieval_steps,
            total_items,
            active_items,
        })
    }

    /// `Retrieve(itemId, userId, timestamp)` of spec.md §6: consumes one use
    /// and flags waste if depleted. Grounded on
    /// `original_source/app/services/search.py`'s `log_retrieval`: items
    /// without a usage limit have nothing to consume, so no log entry is
    /// written for them.
    pub fn retrieve(&self, item_id: &str, user_id: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write().expect("station lock poisoned");
        let item = state.items.require_mut(item_id)?;
        if item.is_waste() {
            return Err(InventoryError::conflicting_state(format!("item {item_id} is already waste")));
        }
        if item.usage_limit().is_none() {
            return Ok(());
        }
        let before = item.uses_remaining().unwrap_or(0);
        let (_, depleted) = item.consume_uses(1);
        let after = item.uses_remaining().unwrap_or(0);

        state.log.append(LogEntry::new(
            timestamp,
            user_id,
            ActionKind::Retrieval,
            item_id,
            format!("oldUsesRemaining={before} newUsesRemaining={after}"),
        ));

        if depleted {
            let item = state.items.get_mut(item_id).expect("looked up above");
            item.mark_waste();
            state.log.append(LogEntry::new(
                timestamp,
                user_id,
                ActionKind::Disposal,
                item_id,
                "reason=Out of Uses".to_string(),
            ));
        }
        Ok(())
    }

    /// `Place(itemId, userId, containerId, pose, timestamp)` of spec.md §6:
    /// a manual (re)placement, validated against the same invariants the
    /// placement planner enforces (spec.md §3).
    pub fn place(&self, item_id: &str, user_id: &str, container_id: &str, pose: Pose, timestamp: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write().expect("station lock poisoned");
        let item = state.items.require(item_id)?;
        if item.is_waste() {
            return Err(InventoryError::conflicting_state(format!("item {item_id} is waste and cannot be placed")));
        }
        let old_placement = item.placement().cloned();
        let container = state.containers.require(container_id)?;

        let excluding = match &old_placement {
            Some((cid, _)) if cid == container_id => Some(item_id),
            _ => None,
        };
        if !container.index().can_place_at(&pose, excluding) {
            return Err(InventoryError::invariant_violation(format!(
                "pose for item {item_id} is out of bounds or overlaps another item in container {container_id}"
            )));
        }

        if let Some((old_container_id, _)) = &old_placement {
            if old_container_id != container_id {
                if let Some(old_container) = state.containers.get_mut(old_container_id) {
                    old_container.index_mut().remove(item_id);
                }
            }
        }
        state.containers.get_mut(container_id).expect("validated above").index_mut().insert(item_id.to_string(), pose);
        state.items.get_mut(item_id).expect("validated above").set_placement(container_id, pose);
        state.log.append(LogEntry::new(
            timestamp,
            user_id,
            ActionKind::Placement,
            item_id,
            format!("container={container_id} pose={pose}"),
        ));
        Ok(())
    }

    /// `WasteIdentify()` of spec.md §6.
    pub fn waste_identify(&self) -> Vec<WasteItemSummary> {
        let mut state = self.state.write().expect("station lock poisoned");
        let now = Utc::now();
        let StationState { items, log, .. } = &mut *state;
        let flagged = waste::identify_waste(items, log, now);

        flagged
            .into_iter()
            .map(|(item_id, reason)| {
                let item = items.get(&item_id).expect("just flagged");
                WasteItemSummary {
                    item_id: item_id.clone(),
                    name: item.name().to_string(),
                    reason: reason.as_str(),
                    container_id: item.container_id().map(|s| s.to_string()),
                    pose: item.pose(),
                }
            })
            .collect()
    }

    /// `ReturnPlan(undockingContainerId, undockingDate, maxWeight)` of
    /// spec.md §6.
    pub fn return_plan(&self, undocking_container_id: &str, undocking_date: DateTime<Utc>, max_weight: f64) -> Result<ReturnPlanResponse> {
        let state = self.state.write().expect("station lock poisoned");
        state.containers.require(undocking_container_id)?;
        let report = waste::plan_return(&state.items, undocking_container_id, undocking_date, max_weight)?;
        Ok(ReturnPlanResponse {
            return_plan: report.return_plan,
            retrieval_steps: report.retrieval_steps,
            manifest: report.manifest,
            total_volume: report.total_volume,
            total_mass: report.total_mass,
        })
    }

    /// `CompleteUndocking(undockingContainerId, timestamp)` of spec.md §6.
    pub fn complete_undocking(&self, undocking_container_id: &str, timestamp: DateTime<Utc>) -> Result<usize> {
        let mut state = self.state.write().expect("station lock poisoned");
        let StationState { items, log, containers } = &mut *state;
        waste::complete_undocking(containers, items, log, undocking_container_id, timestamp)
    }

    /// `Simulate(num_of_days | to_timestamp, usage_records)` of spec.md §6.
    pub fn simulate(&self, mode: TimeMode, usage_item_ids: &[Id]) -> Result<SimulateResponse> {
        let mut state = self.state.write().expect("station lock poisoned");
        let now = Utc::now();
        let report = simulation::simulate(&mut state.items, &mut state.log, now, mode, usage_item_ids)?;
        Ok(SimulateResponse {
            new_date: report.target_time,
            items_used: report.items_used,
            items_depleted: report.items_depleted,
            items_expired: report.items_expired,
        })
    }

    /// `Logs(start, end, itemId?, userId?, actionType?)` of spec.md §6:
    /// read-only, so it acquires the shared lock.
    pub fn logs(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        item_id: Option<&str>,
        user_id: Option<&str>,
        action: Option<ActionKind>,
    ) -> Vec<LogEntrySummary> {
        let state = self.state.read().expect("station lock poisoned");
        state
            .log
            .query(start, end, item_id, user_id, action)
            .into_iter()
            .map(|entry| LogEntrySummary {
                timestamp: entry.timestamp(),
                user_id: entry.user_id().to_string(),
                action: entry.action(),
                item_id: entry.item_id().to_string(),
                detail: entry.detail().to_string(),
            })
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.state.read().expect("station lock poisoned").items.len()
    }

    pub fn container_count(&self) -> usize {
        self.state.read().expect("station lock poisoned").containers.len()
    }
}
