//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (bad input,
/// unknown identifiers, stock invariants). Storage failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or missing input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced identifier is not present.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation would drive quantity on hand below zero.
    #[error("insufficient stock for {product_id} (available: {available}, requested: {requested})")]
    InsufficientStock {
        product_id: String,
        available: u64,
        requested: u64,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(product_id: impl Into<String>, available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            product_id: product_id.into(),
            available,
            requested,
        }
    }
}
