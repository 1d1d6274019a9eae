//! Sales orders domain module.
//!
//! This crate contains business rules for orders: stock reservation against the
//! catalog, line management and the one-way finalization lifecycle. Pure
//! in-memory domain logic (no IO, no storage).

pub mod order;

pub use order::{
    AddLine, FinalizeOrder, LineAdded, LineReduced, MarkFinalized, Order, OrderCommand, OrderEvent,
    OrderFinalized, OrderLine, OrderStatus, ReduceLine,
};
