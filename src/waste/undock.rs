use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{InventoryError, Result};
use crate::model::{ActionKind, ContainerStore, EventLog, ItemStore, LogEntry};
use crate::Id;

/// Deletes every waste item currently in `undocking_container_id`, logging a
/// disposal entry for each (spec.md §4.D: "Complete undocking"). The
/// container itself is never destroyed.
///
/// Idempotent by construction ("CompleteUndocking then CompleteUndocking on
/// the same container is idempotent" — spec.md §8): once its waste is
/// deleted, a second call finds nothing left in the container and is a
/// no-op. Grounded on `original_source/app/services/waste.py`'s
/// `complete_undocking`.
pub fn complete_undocking(
    containers: &mut ContainerStore,
    items: &mut ItemStore,
    log: &mut EventLog,
    undocking_container_id: &str,
    timestamp: DateTime<Utc>,
) -> Result<usize> {
    let container = containers
        .get(undocking_container_id)
        .ok_or_else(|| InventoryError::entity_not_found("container", undocking_container_id))?;

    let waste_ids: Vec<Id> = container
        .item_ids()
        .filter(|id| items.get(id).map(|i| i.is_waste()).unwrap_or(false))
        .cloned()
        .collect();

    let container = containers.get_mut(undocking_container_id).expect("validated above");
    for item_id in &waste_ids {
        container.index_mut().remove(item_id);
        items.remove(item_id);
        log.append(LogEntry::new(
            timestamp,
            "system",
            ActionKind::Disposal,
            item_id.clone(),
            format!("undockingContainerId={undocking_container_id}"),
        ));
        info!(item = %item_id, container = %undocking_container_id, "disposed at undocking");
    }

    Ok(waste_ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::model::{Container, Item};
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn setup() -> (ContainerStore, ItemStore) {
        let mut containers = ContainerStore::new();
        containers.insert(Container::new("undock", "Disposal", Dimensions::from_f64(10.0, 10.0, 10.0)).unwrap());
        let mut items = ItemStore::new();
        let mut item =
            Item::new("i1", "i1", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, None, None, "Lab").unwrap();
        item.set_placement("undock", crate::geometry::Pose::from_anchor(
            crate::geometry::Point3::from_f64(0.0, 0.0, 0.0),
            Dimensions::from_f64(1.0, 1.0, 1.0),
        ));
        item.mark_waste();
        items.insert(item);
        containers
            .get_mut("undock")
            .unwrap()
            .index_mut()
            .insert("i1".into(), items.get("i1").unwrap().pose().unwrap());
        (containers, items)
    }

    #[test]
    fn deletes_waste_and_logs_disposal() {
        let (mut containers, mut items) = setup();
        let mut log = EventLog::new();

        let deleted = complete_undocking(&mut containers, &mut items, &mut log, "undock", ts(0)).unwrap();
        assert_eq!(deleted, 1);
        assert!(items.get("i1").is_none());
        assert_eq!(log.len(), 1);
        assert!(containers.get("undock").is_some());
    }

    #[test]
    fn is_idempotent() {
        let (mut containers, mut items) = setup();
        let mut log = EventLog::new();

        complete_undocking(&mut containers, &mut items, &mut log, "undock", ts(0)).unwrap();
        let second = complete_undocking(&mut containers, &mut items, &mut log, "undock", ts(1)).unwrap();
        assert_eq!(second, 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn unknown_container_is_entity_not_found() {
        let mut containers = ContainerStore::new();
        let mut items = ItemStore::new();
        let mut log = EventLog::new();
        let err = complete_undocking(&mut containers, &mut items, &mut log, "missing", ts(0)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EntityNotFound);
    }
}
