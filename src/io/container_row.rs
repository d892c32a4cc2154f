use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::geometry::Dimensions;
use crate::model::Container;

/// One row of the containers ingestion file (spec.md §6: "Container ID,
/// Zone, Width, Depth, Height").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRow {
    #[serde(rename = "Container ID")]
    pub container_id: String,
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Depth")]
    pub depth: f64,
    #[serde(rename = "Height")]
    pub height: f64,
}

impl TryFrom<ContainerRow> for Container {
    type Error = InventoryError;

    fn try_from(row: ContainerRow) -> Result<Container, InventoryError> {
        Container::new(row.container_id, row.zone, Dimensions::from_f64(row.width, row.depth, row.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_a_valid_row() {
        let row = ContainerRow {
            container_id: "cA".into(),
            zone: "Lab".into(),
            width: 5.0,
            depth: 5.0,
            height: 5.0,
        };
        let container: Container = row.try_into().unwrap();
        assert_eq!(container.id(), "cA");
        assert_eq!(container.zone(), "Lab");
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let row = ContainerRow {
            container_id: "cA".into(),
            zone: "Lab".into(),
            width: 0.0,
            depth: 5.0,
            height: 5.0,
        };
        let err = Container::try_from(row).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }
}
