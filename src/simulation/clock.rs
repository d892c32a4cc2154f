use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::{InventoryError, Result};
use crate::model::{ActionKind, EventLog, ItemStore, LogEntry};
use crate::Id;

const SECONDS_PER_DAY: i64 = 86_400;

/// Exactly one of the two time modes of spec.md §4.E must be set.
#[derive(Debug, Clone, Copy)]
pub enum TimeMode {
    NumOfDays(u32),
    ToTimestamp(DateTime<Utc>),
}

/// One entry of `items_to_be_used_per_day` (spec.md §4.E).
#[derive(Debug, Clone)]
pub struct UsageChange {
    pub item_id: Id,
    pub item_name: String,
    pub uses_consumed: u32,
    pub uses_remaining: u32,
}

/// An item expired by the simulated advance.
#[derive(Debug, Clone)]
pub struct ExpiredChange {
    pub item_id: Id,
    pub item_name: String,
}

/// Report of a [`simulate`] call (spec.md §4.E: "(target_time, items_used,
/// items_depleted, items_expired)").
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub target_time: Option<DateTime<Utc>>,
    pub items_used: Vec<UsageChange>,
    pub items_depleted: Vec<UsageChange>,
    pub items_expired: Vec<ExpiredChange>,
}

fn resolve_target(now: DateTime<Utc>, mode: TimeMode) -> Result<(u32, DateTime<Utc>)> {
    match mode {
        TimeMode::NumOfDays(n) => {
            if n == 0 {
                return Err(InventoryError::invalid_input("numOfDays must be positive"));
            }
            Ok((n, now + Duration::days(n as i64)))
        }
        TimeMode::ToTimestamp(to_timestamp) => {
            if to_timestamp <= now {
                return Err(InventoryError::invalid_input("toTimestamp must be strictly after now"));
            }
            let elapsed_seconds = (to_timestamp - now).num_seconds();
            let n = ((elapsed_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY) as u32;
            Ok((n, now + Duration::days(n as i64)))
        }
    }
}

/// Advances the virtual clock (spec.md §4.E).
///
/// `mode` selects `num_of_days` xor `to_timestamp`; validation happens
/// before any mutation, so a rejected call leaves `items`/`log` untouched
/// ("the clock mutation is effectively atomic" — spec.md §4.E). Grounded on
/// `original_source/app/services/simulation.py`'s `simulate_time`, with the
/// two redesigns spec.md §9(c) pins: retrieval log entries and reported
/// `uses_consumed` are both capped at `min(N, uses_remaining)`, never `N`
/// unconditionally.
pub fn simulate(
    items: &mut ItemStore,
    log: &mut EventLog,
    now: DateTime<Utc>,
    mode: TimeMode,
    usage_item_ids: &[Id],
) -> Result<SimulationReport> {
    let (n, target_time) = resolve_target(now, mode)?;

    let mut report = SimulationReport {
        target_time: Some(target_time),
        ..Default::default()
    };

    for item_id in usage_item_ids {
        let Some(item) = items.get_mut(item_id) else {
            continue;
        };
        if item.is_waste() || item.usage_limit().is_none() {
            continue;
        }
        let item_name = item.name().to_string();
        let before = item.uses_remaining().unwrap_or(0);
        let (consumed, depleted) = item.consume_uses(n);
        let after = item.uses_remaining().unwrap_or(0);

        for day in 0..consumed {
            log.append(LogEntry::new(
                now + Duration::days(day as i64),
                "simulation",
                ActionKind::Retrieval,
                item_id.clone(),
                format!("simulatedUse day={day} before={} after={}", before - day, before - day - 1),
            ));
        }

        let change = UsageChange {
            item_id: item_id.clone(),
            item_name,
            uses_consumed: consumed,
            uses_remaining: after,
        };

        if depleted {
            let item = items.get_mut(item_id).expect("looked up above");
            item.mark_waste();
            info!(item = %item_id, "item depleted during simulation");
            log.append(LogEntry::new(
                target_time,
                "simulation",
                ActionKind::Disposal,
                item_id.clone(),
                "reason=Out of Uses".to_string(),
            ));
            report.items_depleted.push(change.clone());
        }
        report.items_used.push(change);
    }

    let expiring: Vec<Id> = items
        .iter()
        .filter(|item| !item.is_waste() && item.is_expired_by(target_time))
        .map(|item| item.id().to_string())
        .collect();

    for item_id in expiring {
        let item = items.get_mut(&item_id).expect("collected from live store");
        let item_name = item.name().to_string();
        item.mark_waste();
        info!(item = %item_id, "item expired during simulation");
        log.append(LogEntry::new(
            target_time,
            "simulation",
            ActionKind::Disposal,
            item_id.clone(),
            "reason=Expired".to_string(),
        ));
        report.items_expired.push(ExpiredChange { item_id, item_name });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::model::Item;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn rejects_zero_days() {
        let mut items = ItemStore::new();
        let mut log = EventLog::new();
        let err = simulate(&mut items, &mut log, ts(0), TimeMode::NumOfDays(0), &[]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_to_timestamp_not_after_now() {
        let mut items = ItemStore::new();
        let mut log = EventLog::new();
        let err = simulate(&mut items, &mut log, ts(100), TimeMode::ToTimestamp(ts(100)), &[]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn consumes_uses_capped_at_remaining() {
        let mut items = ItemStore::new();
        items.insert(
            Item::new("i1", "Oxygen Tank", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, None, Some(2), "Lab")
                .unwrap(),
        );
        let mut log = EventLog::new();

        let report = simulate(&mut items, &mut log, ts(0), TimeMode::NumOfDays(5), &["i1".to_string()]).unwrap();
        assert_eq!(report.items_used.len(), 1);
        assert_eq!(report.items_used[0].uses_consumed, 2);
        assert_eq!(report.items_used[0].uses_remaining, 0);
        assert_eq!(report.items_depleted.len(), 1);
        assert!(items.get("i1").unwrap().is_waste());
    }

    #[test]
    fn expires_items_past_target_time() {
        let mut items = ItemStore::new();
        items.insert(
            Item::new("i1", "Food Pack", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, Some(ts(3 * 86_400)), None, "Lab")
                .unwrap(),
        );
        let mut log = EventLog::new();

        let report = simulate(&mut items, &mut log, ts(0), TimeMode::NumOfDays(5), &[]).unwrap();
        assert_eq!(report.items_expired.len(), 1);
        assert!(items.get("i1").unwrap().is_waste());
    }

    #[test]
    fn waste_items_are_ignored_for_usage() {
        let mut items = ItemStore::new();
        let mut item =
            Item::new("i1", "i1", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, None, Some(5), "Lab").unwrap();
        item.mark_waste();
        items.insert(item);
        let mut log = EventLog::new();

        let report = simulate(&mut items, &mut log, ts(0), TimeMode::NumOfDays(1), &["i1".to_string()]).unwrap();
        assert!(report.items_used.is_empty());
    }

    #[test]
    fn to_timestamp_rounds_up_to_whole_days() {
        let mut items = ItemStore::new();
        let mut log = EventLog::new();
        let report = simulate(&mut items, &mut log, ts(0), TimeMode::ToTimestamp(ts(86_400 + 1)), &[]).unwrap();
        assert_eq!(report.target_time, Some(ts(2 * 86_400)));
    }
}
