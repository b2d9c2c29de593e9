//! In-memory item store

use async_trait::async_trait;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::ItemStore;
use crate::types::{Item, ItemId};
use crate::{Error, Result};

/// Item store backed by a `BTreeMap` behind an async `RwLock`
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the two starter items
    pub fn seeded() -> Self {
        let mut items = BTreeMap::new();
        items.insert(1, Item::new("사과", 1000));
        items.insert(2, Item::new("바나나", 2000));
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<BTreeMap<ItemId, Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: ItemId) -> Result<Item> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::ItemNotFound(id))
    }

    async fn create(&self, id: ItemId, item: Item) -> Result<Item> {
        match self.items.write().await.entry(id) {
            Entry::Occupied(_) => Err(Error::ItemExists(id)),
            Entry::Vacant(slot) => Ok(slot.insert(item).clone()),
        }
    }

    async fn update(&self, id: ItemId, item: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        let slot = items.get_mut(&id).ok_or(Error::ItemNotFound(id))?;
        *slot = item;
        Ok(slot.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_items() {
        let store = InMemoryItemStore::seeded();
        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[&1], Item::new("사과", 1000));
        assert_eq!(items[&2], Item::new("바나나", 2000));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate() {
        let store = InMemoryItemStore::new();
        store.create(7, Item::new("포도", 3000)).await.unwrap();

        let err = store.create(7, Item::new("포도", 3500)).await.unwrap_err();
        assert!(matches!(err, Error::ItemExists(7)));
        assert_eq!(store.get(7).await.unwrap().price, 3000);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_item() {
        let store = InMemoryItemStore::seeded();
        let updated = store.update(1, Item::new("청사과", 1200)).await.unwrap();
        assert_eq!(updated, Item::new("청사과", 1200));
        assert_eq!(store.get(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_item_operations() {
        let store = InMemoryItemStore::seeded();
        assert!(matches!(store.get(42).await.unwrap_err(), Error::ItemNotFound(42)));
        assert!(matches!(
            store.update(42, Item::new("x", 1)).await.unwrap_err(),
            Error::ItemNotFound(42)
        ));
        assert!(matches!(store.delete(42).await.unwrap_err(), Error::ItemNotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let store = InMemoryItemStore::seeded();
        store.delete(2).await.unwrap();
        assert!(store.get(2).await.is_err());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
