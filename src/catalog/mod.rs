//! Item catalog
//!
//! Backs the `/items` CRUD routes. Handlers only see the [`ItemStore`]
//! trait; the in-memory implementation lives in [`memory`].

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::types::{Item, ItemId};
use crate::{Error, Result};

pub mod memory;

pub use memory::InMemoryItemStore;

/// Item repository
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, ordered by id
    async fn list(&self) -> Result<BTreeMap<ItemId, Item>>;

    /// Fetch a single item
    async fn get(&self, id: ItemId) -> Result<Item>;

    /// Insert a new item; fails if `id` is taken
    async fn create(&self, id: ItemId, item: Item) -> Result<Item>;

    /// Replace an existing item
    async fn update(&self, id: ItemId, item: Item) -> Result<Item>;

    /// Remove an item
    async fn delete(&self, id: ItemId) -> Result<()>;
}

/// Boundary validation for incoming items
pub fn validate_item(item: &Item) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(Error::invalid_request("item name must not be empty"));
    }
    if item.price < 0 {
        return Err(Error::invalid_request(format!(
            "item price must not be negative (got {})",
            item.price
        )));
    }
    Ok(())
}
