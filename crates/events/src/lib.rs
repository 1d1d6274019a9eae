//! Domain events.
//!
//! Aggregates describe every state change as an event before applying it.

pub mod event;

pub use event::Event;
