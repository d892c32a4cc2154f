use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::geometry::{Point3, Pose};
use crate::Id;

/// One row of the exported arrangement CSV (spec.md §6: "(Item ID,
/// Container ID, \"(w0,d0,h0),(w1,d1,h1)\")"), for every placed item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrangementRow {
    #[serde(rename = "Item ID")]
    pub item_id: Id,
    #[serde(rename = "Container ID")]
    pub container_id: Id,
    #[serde(rename = "Position")]
    pub position: String,
}

impl ArrangementRow {
    pub fn from_pose(item_id: impl Into<Id>, container_id: impl Into<Id>, pose: Pose) -> Self {
        Self {
            item_id: item_id.into(),
            container_id: container_id.into(),
            position: format_position(&pose),
        }
    }

    pub fn pose(&self) -> Result<Pose> {
        parse_position(&self.position)
    }
}

fn format_point(p: Point3) -> String {
    format!("({},{},{})", p.w.value(), p.d.value(), p.h.value())
}

fn format_position(pose: &Pose) -> String {
    format!("{},{}", format_point(pose.start()), format_point(pose.end()))
}

/// Parses `"(w0,d0,h0),(w1,d1,h1)"` back into a [`Pose`], the inverse of
/// [`format_position`]. Used by the §8 export→re-import round-trip property.
fn parse_position(raw: &str) -> Result<Pose> {
    let bad = || InventoryError::invalid_input(format!("unparseable position: {raw:?}"));

    let raw = raw.trim();
    let inner = raw.strip_prefix('(').ok_or_else(bad)?;
    let inner = inner.strip_suffix(')').ok_or_else(bad)?;
    let mid = "),(";
    let split_at = inner.find(mid).ok_or_else(bad)?;
    let (start_str, end_str) = (&inner[..split_at], &inner[split_at + mid.len()..]);

    let parse_triple = |s: &str| -> Result<Point3> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(bad());
        }
        let w: f64 = parts[0].trim().parse().map_err(|_| bad())?;
        let d: f64 = parts[1].trim().parse().map_err(|_| bad())?;
        let h: f64 = parts[2].trim().parse().map_err(|_| bad())?;
        Ok(Point3::from_f64(w, d, h))
    };

    Ok(Pose::new(parse_triple(start_str)?, parse_triple(end_str)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;

    #[test]
    fn round_trips_through_format_and_parse() {
        let pose = Pose::from_anchor(Point3::from_f64(1.0, 2.0, 3.0), Dimensions::from_f64(2.0, 2.0, 2.0));
        let row = ArrangementRow::from_pose("i1", "cA", pose);
        assert_eq!(row.position, "(1,2,3),(3,4,5)");
        assert_eq!(row.pose().unwrap(), pose);
    }

    #[test]
    fn rejects_malformed_position() {
        let row = ArrangementRow {
            item_id: "i1".into(),
            container_id: "cA".into(),
            position: "garbage".into(),
        };
        assert!(row.pose().is_err());
    }
}
