//! Order subsystem errors.

use thiserror::Error;

use crate::domain::entities::OrderStatus;

/// Everything that can go wrong in the order lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No order with the given id or number.
    #[error("Order not found")]
    NotFound,

    /// Order number already taken by another order.
    #[error("Order number already exists: {0}")]
    DuplicateOrderNumber(String),

    /// The transition table does not allow this status change.
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Payment is only accepted while the order is Pending.
    #[error("Order is not in PENDING status, current status: {0}")]
    PaymentNotPending(OrderStatus),

    /// Payment amount must equal the order total exactly.
    #[error("Payment amount {actual} does not match order total {expected}")]
    AmountMismatch {
        expected: rust_decimal::Decimal,
        actual: rust_decimal::Decimal,
    },

    /// Delivered and already-cancelled orders cannot be cancelled.
    #[error("Cannot cancel order in {0} status")]
    CancelForbidden(OrderStatus),

    /// Only Pending orders may be deleted.
    #[error("Cannot delete order in {0} status, only PENDING orders can be deleted")]
    DeleteForbidden(OrderStatus),

    /// Every line item must have a strictly positive quantity.
    #[error("Order item quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// An order needs at least one line item.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Order number generation kept colliding.
    #[error("Could not generate a unique order number after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Backing store failure.
    #[error("Order store error: {0}")]
    Store(String),
}
