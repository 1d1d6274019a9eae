//! Inventory domain module.
//!
//! This crate contains business rules for catalog items (pricing, discounts and
//! stock), implemented purely as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod item;
pub mod pricing;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use catalog::Catalog;
pub use item::{
    ChangeDiscount, CreateItem, DiscountChanged, IncreaseStock, Item, ItemCommand, ItemCreated,
    ItemEvent, ItemId, ReduceStock, StockIncreased, StockReduced,
};
pub use pricing::{Discount, apply_discount};
