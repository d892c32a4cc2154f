//! Integration tests for the six literal end-to-end scenarios of spec.md §8,
//! driven entirely through the [`stowage_core::Station`] facade.

use chrono::{TimeZone, Utc};
use stowage_core::geometry::{Dimensions, Point3};
use stowage_core::model::{Container, Item};
use stowage_core::Station;

fn ts(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Scenario 1: single item, single container, trivial fit.
#[test]
fn single_item_single_container_trivial_fit() {
    let station = Station::new();
    station.replace_containers(vec![Container::new("cA", "Lab", Dimensions::from_f64(10.0, 10.0, 10.0)).unwrap()]);
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(2.0, 2.0, 2.0), 1.0, 50, None, None, "Lab").unwrap(),
    ]);

    let report = station.place_batch(&["i1".to_string()], &["cA".to_string()]).unwrap();

    assert_eq!(report.placements.len(), 1);
    let assignment = &report.placements[0];
    assert_eq!(assignment.container_id, "cA");
    assert_eq!(assignment.pose.start(), Point3::from_f64(0.0, 0.0, 0.0));
    assert_eq!(assignment.pose.end(), Point3::from_f64(2.0, 2.0, 2.0));
    assert!((report.utilization["cA"] - 0.008).abs() < 1e-9);
}

/// Scenario 2: preferred zone is respected over input container order.
#[test]
fn preferred_zone_respected() {
    let station = Station::new();
    station.replace_containers(vec![
        Container::new("cA", "Lab", Dimensions::from_f64(5.0, 5.0, 5.0)).unwrap(),
        Container::new("cB", "Storage", Dimensions::from_f64(5.0, 5.0, 5.0)).unwrap(),
    ]);
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(2.0, 2.0, 2.0), 1.0, 50, None, None, "Storage").unwrap(),
    ]);

    let report = station
        .place_batch(&["i1".to_string()], &["cA".to_string(), "cB".to_string()])
        .unwrap();

    assert_eq!(report.placements[0].container_id, "cB");
}

/// Scenario 3: priority ordering — the higher-priority item claims the only
/// space and the lower-priority item is reported unplaced, not errored.
#[test]
fn priority_ordering_leaves_lower_priority_item_unplaced() {
    let station = Station::new();
    station.replace_containers(vec![Container::new("cA", "Lab", Dimensions::from_f64(4.0, 4.0, 4.0)).unwrap()]);
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(3.0, 3.0, 3.0), 1.0, 10, None, None, "Lab").unwrap(),
        Item::new("i2", "i2", Dimensions::from_f64(3.0, 3.0, 3.0), 1.0, 90, None, None, "Lab").unwrap(),
    ]);

    let report = station
        .place_batch(&["i1".to_string(), "i2".to_string()], &["cA".to_string()])
        .unwrap();

    assert_eq!(report.placements.len(), 1);
    assert_eq!(report.placements[0].item_id, "i2");
    assert_eq!(report.placements[0].pose.start(), Point3::from_f64(0.0, 0.0, 0.0));
    assert_eq!(report.unplaced, vec!["i1".to_string()]);
}

/// Scenario 4: blocking retrieval — the item at the opening blocks the item
/// behind it, so searching for the one behind emits remove/retrieve/place.
#[test]
fn blocking_retrieval_emits_remove_retrieve_place() {
    let station = Station::new();
    station.replace_containers(vec![Container::new("cA", "Lab", Dimensions::from_f64(5.0, 5.0, 5.0)).unwrap()]);
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(2.0, 2.0, 2.0), 1.0, 50, None, None, "Lab").unwrap(),
        Item::new("i2", "i2", Dimensions::from_f64(2.0, 2.0, 2.0), 1.0, 50, None, None, "Lab").unwrap(),
    ]);

    let front = stowage_core::geometry::Pose::from_anchor(Point3::from_f64(0.0, 0.0, 0.0), Dimensions::from_f64(2.0, 2.0, 2.0));
    let behind = stowage_core::geometry::Pose::from_anchor(Point3::from_f64(0.0, 2.0, 0.0), Dimensions::from_f64(2.0, 2.0, 2.0));
    station.place("i1", "system", "cA", front, ts(0)).unwrap();
    station.place("i2", "system", "cA", behind, ts(0)).unwrap();

    let result = station.search(Some("i2"), None).unwrap();
    let steps = result.retrieval_steps;
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].item_id, "i1");
    assert_eq!(steps[1].item_id, "i2");
    assert_eq!(steps[2].item_id, "i1");
}

/// Scenario 5: waste identification flags an expired item, logs disposal,
/// and a second call is a no-op.
#[test]
fn waste_identification_is_idempotent_after_first_call() {
    let station = Station::new();
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, Some(ts(1)), None, "Lab").unwrap(),
    ]);

    let flagged = station.waste_identify();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].reason, "Expired");

    let second = station.waste_identify();
    assert!(second.is_empty());

    let logs = station.logs(ts(0), ts(i64::MAX / 2), None, None, None);
    assert_eq!(logs.len(), 1);
}

/// Scenario 6: the return plan stops at the first item that would exceed
/// the weight cap.
#[test]
fn return_plan_respects_weight_cap() {
    let station = Station::new();
    station.replace_containers(vec![
        Container::new("cA", "Lab", Dimensions::from_f64(10.0, 10.0, 10.0)).unwrap(),
        Container::new("undock", "Disposal", Dimensions::from_f64(10.0, 10.0, 10.0)).unwrap(),
    ]);
    station.replace_items(vec![
        Item::new("w1", "w1", Dimensions::from_f64(1.0, 1.0, 1.0), 5.0, 50, Some(ts(1)), None, "Lab").unwrap(),
        Item::new("w2", "w2", Dimensions::from_f64(1.0, 1.0, 1.0), 4.0, 50, Some(ts(1)), None, "Lab").unwrap(),
        Item::new("w3", "w3", Dimensions::from_f64(1.0, 1.0, 1.0), 2.0, 50, Some(ts(1)), None, "Lab").unwrap(),
    ]);
    station
        .place_batch(&["w1".to_string(), "w2".to_string(), "w3".to_string()], &["cA".to_string()])
        .unwrap();
    station.waste_identify();

    let plan = station.return_plan("undock", ts(10), 8.0).unwrap();

    assert_eq!(plan.manifest.len(), 1);
    assert_eq!(plan.manifest[0].item_id, "w1");
    assert_eq!(plan.total_mass, 5.0);
}

#[test]
fn complete_undocking_is_idempotent() {
    let station = Station::new();
    station.replace_containers(vec![Container::new("undock", "Disposal", Dimensions::from_f64(10.0, 10.0, 10.0)).unwrap()]);
    station.replace_items(vec![
        Item::new("w1", "w1", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, Some(ts(1)), None, "Lab").unwrap(),
    ]);
    station.place_batch(&["w1".to_string()], &["undock".to_string()]).unwrap();
    station.waste_identify();

    let first = station.complete_undocking("undock", ts(10)).unwrap();
    assert_eq!(first, 1);
    let second = station.complete_undocking("undock", ts(11)).unwrap();
    assert_eq!(second, 0);
}

#[test]
fn retrieve_then_retrieve_to_depletion_flags_waste() {
    let station = Station::new();
    station.replace_items(vec![
        Item::new("i1", "i1", Dimensions::from_f64(1.0, 1.0, 1.0), 1.0, 50, None, Some(2), "Lab").unwrap(),
    ]);

    station.retrieve("i1", "astro", ts(0)).unwrap();
    let mid = station.search(Some("i1"), None).unwrap().item.unwrap();
    assert_eq!(mid.uses_remaining, Some(1));
    assert!(!mid.is_waste);

    station.retrieve("i1", "astro", ts(1)).unwrap();
    let after = station.search(Some("i1"), None).unwrap().item.unwrap();
    assert_eq!(after.uses_remaining, Some(0));
    assert!(after.is_waste);
}
