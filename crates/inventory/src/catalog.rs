//! Arena of catalog items, addressed by [`ItemId`].

use std::collections::HashMap;

use storefront_core::{AggregateRoot, DomainError, DomainResult};

use crate::item::{CreateItem, Item, ItemId};

/// Owns every item that orders may reference.
///
/// Items are never removed, so a handle handed out by [`Catalog::register`]
/// stays valid for the catalog's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<ItemId, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item from `cmd` and store it.
    pub fn register(&mut self, cmd: CreateItem) -> DomainResult<ItemId> {
        let item = Item::create(cmd)?;
        self.insert(item)
    }

    /// Store an already-created item.
    pub fn insert(&mut self, item: Item) -> DomainResult<ItemId> {
        let id = *item.id();
        if self.items.contains_key(&id) {
            return Err(DomainError::validation(format!("Item {id} already registered")));
        }
        tracing::debug!(item_id = %id, name = item.name(), stock = item.stock(), "item registered");
        self.items.insert(id, item);
        Ok(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Like [`Catalog::get`], failing with `NotFound` for unknown handles.
    pub fn item(&self, id: ItemId) -> DomainResult<&Item> {
        self.items
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("Item {id}")))
    }

    pub fn item_mut(&mut self, id: ItemId) -> DomainResult<&mut Item> {
        self.items
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Item {id}")))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
