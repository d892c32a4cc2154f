use chrono::{DateTime, Utc};
use tracing::info;

use crate::model::{ActionKind, EventLog, Item, ItemStore, LogEntry};

/// Why an item was flagged waste (spec.md §4.D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteReason {
    Expired,
    OutOfUses,
}

impl WasteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Expired => "Expired",
            WasteReason::OutOfUses => "Out of Uses",
        }
    }
}

fn reason_for(item: &Item, now: DateTime<Utc>) -> Option<WasteReason> {
    if item.is_expired_by(now) {
        return Some(WasteReason::Expired);
    }
    if item.is_depleted() {
        return Some(WasteReason::OutOfUses);
    }
    None
}

/// Scans all non-waste items for expiry or use-depletion (spec.md §4.D).
///
/// Items already flagged waste are skipped ("Running WasteIdentify twice in
/// succession is a no-op after the first" — spec.md §8): the second call
/// finds nothing left to flag and returns an empty list. Grounded on
/// `original_source/app/services/waste.py`'s `identify_waste_items`, which
/// scans the same two conditions over `is_waste == False` rows.
pub fn identify_waste(items: &mut ItemStore, log: &mut EventLog, now: DateTime<Utc>) -> Vec<(String, WasteReason)> {
    let candidates: Vec<String> = items
        .iter()
        .filter(|item| !item.is_waste())
        .filter_map(|item| reason_for(item, now).map(|reason| (item.id().to_string(), reason)))
        .collect();

    let mut flagged = Vec::with_capacity(candidates.len());
    for (item_id, reason) in candidates {
        let item = items.get_mut(&item_id).expect("collected from live store");
        if !item.mark_waste() {
            continue;
        }
        info!(item = %item_id, reason = reason.as_str(), "item flagged waste");
        log.append(LogEntry::new(
            now,
            "system",
            ActionKind::Disposal,
            item_id.clone(),
            format!("reason={}", reason.as_str()),
        ));
        flagged.push((item_id, reason));
    }
    flagged
}
