//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("{0} not found")]
    NotFound(String),

    /// A conflict occurred (duplicate key, state already reached).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Not enough units on hand to cover a sale line.
    #[error("insufficient stock for product {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u64,
        requested: u64,
    },

    /// Authorization failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_product_and_quantities() {
        let err = DomainError::insufficient_stock("Camisa Roja", 2, 5);
        assert_eq!(
            err.to_string(),
            "insufficient stock for product Camisa Roja: available 2, requested 5"
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(DomainError::not_found("client 7").to_string(), "client 7 not found");
    }
}
