//! Customer subsystem errors.

use pos_types::CustomerId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Everything that can go wrong in customer account management.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// No customer with the given id, code or email.
    #[error("Customer not found")]
    NotFound,

    /// Customer code already taken.
    #[error("Customer code already exists: {0}")]
    DuplicateCode(String),

    /// Email already belongs to another customer.
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Point amounts for add/redeem must be strictly positive.
    #[error("Points must be positive, got {0}")]
    InvalidPoints(i64),

    /// Redemption exceeds the customer's point balance.
    #[error("Insufficient points: requested {requested}, available {available}")]
    InsufficientPoints { requested: i64, available: i64 },

    /// Credit limits cannot be negative.
    #[error("Credit limit cannot be negative: {0}")]
    NegativeCreditLimit(Decimal),

    /// Customers with orders on file cannot be deleted.
    #[error("Customer {id} has {count} orders and cannot be deleted")]
    HasOrders { id: CustomerId, count: u64 },

    /// Customer code generation kept colliding.
    #[error("Could not generate a unique customer code after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Backing store failure.
    #[error("Customer store error: {0}")]
    Store(String),
}
