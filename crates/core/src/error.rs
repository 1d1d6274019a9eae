//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The `Display` output of every variant is the bare message: callers match on
/// these strings verbatim, so no category prefix is added.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An argument or construction precondition failed.
    #[error("{0}")]
    Validation(String),

    /// A stock mutation could not be satisfied.
    #[error("{0}")]
    Stock(String),

    /// The aggregate's lifecycle state forbids the operation.
    #[error("{0}")]
    OrderState(String),

    /// The aggregate's contents forbid the operation.
    #[error("{0}")]
    OrderContent(String),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn stock(msg: impl Into<String>) -> Self {
        Self::Stock(msg.into())
    }

    pub fn order_state(msg: impl Into<String>) -> Self {
        Self::OrderState(msg.into())
    }

    pub fn order_content(msg: impl Into<String>) -> Self {
        Self::OrderContent(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// The message carried by the error, without formatting.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(m)
            | DomainError::Stock(m)
            | DomainError::OrderState(m)
            | DomainError::OrderContent(m)
            | DomainError::NotFound(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = DomainError::validation("Price must be positive");
        assert_eq!(err.to_string(), "Price must be positive");

        let err = DomainError::stock("Insufficient stock");
        assert_eq!(err.to_string(), "Insufficient stock");
    }

    #[test]
    fn not_found_names_the_missing_entity() {
        let err = DomainError::not_found("Item 42");
        assert_eq!(err.to_string(), "Item 42 not found");
        assert_eq!(err.message(), "Item 42");
    }
}
