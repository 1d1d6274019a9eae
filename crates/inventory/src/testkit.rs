//! Test builders for catalog items.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature (other
//! crates' tests and benches).

use storefront_core::DomainResult;

use crate::catalog::Catalog;
use crate::item::{CreateItem, Item, ItemId};

/// Fluent builder over [`CreateItem`].
///
/// `ItemBuilder::new()` starts with every field missing; `standard()` starts from
/// a valid "Test Product" priced 100 with 10 units in stock.
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    name: String,
    original_price: Option<f64>,
    stock: Option<i64>,
    discount: Option<f64>,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self {
            name: "Test Product".to_string(),
            original_price: Some(100.0),
            stock: Some(10),
            discount: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = Some(price);
        self
    }

    pub fn without_price(mut self) -> Self {
        self.original_price = None;
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn without_stock(mut self) -> Self {
        self.stock = None;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }

    /// The creation command this builder describes, addressed to `item_id`.
    pub fn command_for(&self, item_id: ItemId) -> CreateItem {
        CreateItem {
            item_id,
            name: self.name.clone(),
            original_price: self.original_price,
            stock: self.stock,
            discount: self.discount,
        }
    }

    pub fn build(self) -> DomainResult<Item> {
        Item::create(self.command_for(ItemId::generate()))
    }

    /// Build and store in `catalog`, returning the new handle.
    pub fn register(self, catalog: &mut Catalog) -> DomainResult<ItemId> {
        catalog.register(self.command_for(ItemId::generate()))
    }
}
