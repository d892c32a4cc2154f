use std::collections::HashMap;

use crate::error::{InventoryError, Result};
use crate::model::{Container, Item};
use crate::Id;

/// Id-indexed collection of [`Item`]s.
///
/// A full replace on ingestion (spec.md §6: "Ingestion ... is a full replace
/// of the corresponding store") is just `*store = ItemStore::new()` followed
/// by re-inserting the validated rows, so no separate "clear" API is needed
/// beyond `Default`.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: HashMap<Id, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id().to_string(), item);
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    pub fn require(&self, id: &str) -> Result<&Item> {
        self.get(id)
            .ok_or_else(|| InventoryError::entity_not_found("item", id))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut Item> {
        self.get_mut(id)
            .ok_or_else(|| InventoryError::entity_not_found("item", id))
    }

    pub fn remove(&mut self, id: &str) -> Option<Item> {
        self.items.remove(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.values().find(|item| item.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }
}

/// Id-indexed collection of [`Container`]s.
#[derive(Debug, Clone, Default)]
pub struct ContainerStore {
    containers: HashMap<Id, Container>,
}

impl ContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn insert(&mut self, container: Container) {
        self.containers.insert(container.id().to_string(), container);
    }

    pub fn get(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    pub fn require(&self, id: &str) -> Result<&Container> {
        self.get(id)
            .ok_or_else(|| InventoryError::entity_not_found("container", id))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut Container> {
        self.get_mut(id)
            .ok_or_else(|| InventoryError::entity_not_found("container", id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.containers.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;

    #[test]
    fn require_reports_entity_not_found() {
        let store = ItemStore::new();
        let err = store.require("missing").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EntityNotFound);
    }

    #[test]
    fn find_by_name_scans_values() {
        let mut store = ItemStore::new();
        let item = Item::new(
            "i1",
            "Oxygen Tank",
            Dimensions::from_f64(1.0, 1.0, 1.0),
            2.0,
            50,
            None,
            None,
            "Lab",
        )
        .unwrap();
        store.insert(item);
        assert!(store.find_by_name("Oxygen Tank").is_some());
        assert!(store.find_by_name("missing").is_none());
    }

    #[test]
    fn container_store_require_reports_entity_not_found() {
        let store = ContainerStore::new();
        let err = store.require("missing").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EntityNotFound);
    }
}
