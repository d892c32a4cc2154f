use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::geometry::Dimensions;
use crate::model::Item;

/// One row of the items ingestion file (spec.md §6: "Item ID, Name, Width,
/// Depth, Height, Mass, Priority, Expiry Date, Usage Limit, Preferred
/// Zone"). Every field is a loosely typed string/number as it arrives over
/// CSV; [`TryFrom<ItemRow>`] performs the one-time conversion into a typed,
/// validated [`Item`] (spec.md §9: "no ambient dynamic dispatch" downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Depth")]
    pub depth: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Mass")]
    pub mass: f64,
    #[serde(rename = "Priority")]
    pub priority: u8,
    #[serde(rename = "Expiry Date", default)]
    pub expiry_date: String,
    #[serde(rename = "Usage Limit", default)]
    pub usage_limit: String,
    #[serde(rename = "Preferred Zone")]
    pub preferred_zone: String,
}

/// Parses an ISO-8601 date or date-time string, promoting a naive date to
/// midnight UTC (spec.md §6: "naive timestamps are promoted to UTC on
/// input"). An empty string means "no expiry".
fn parse_expiry(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc()));
    }
    Err(InventoryError::invalid_input(format!("unparseable Expiry Date: {raw:?}")))
}

fn parse_usage_limit(raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| InventoryError::invalid_input(format!("unparseable Usage Limit: {raw:?}")))
}

impl TryFrom<ItemRow> for Item {
    type Error = InventoryError;

    fn try_from(row: ItemRow) -> Result<Item> {
        let expiry = parse_expiry(&row.expiry_date)?;
        let usage_limit = parse_usage_limit(&row.usage_limit)?;
        Item::new(
            row.item_id,
            row.name,
            Dimensions::from_f64(row.width, row.depth, row.height),
            row.mass,
            row.priority,
            expiry,
            usage_limit,
            row.preferred_zone,
        )
    }
}
