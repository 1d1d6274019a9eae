//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are immutable: to "modify" one, build a new
/// one. A discount policy is a value object; an item is an entity.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: they are compared by their attribute values
/// - **Debug**: they show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
