//! Error types for the inventory ledger.

use pos_types::ProductId;
use thiserror::Error;

use super::entities::TransactionKind;

/// All errors that can occur in ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Referenced product id does not resolve.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Movement quantity must be positive.
    #[error("{kind} quantity must be positive, got {quantity}")]
    InvalidQuantity {
        kind: TransactionKind,
        quantity: i64,
    },

    /// Requested stock-out exceeds derived stock at call time.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Entity store failure.
    #[error("Store error: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InventoryError::InsufficientStock {
            product_id: 7,
            requested: 100,
            available: 70,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: requested 100, available 70"
        );
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = InventoryError::InvalidQuantity {
            kind: TransactionKind::Out,
            quantity: 0,
        };
        assert_eq!(err.to_string(), "OUT quantity must be positive, got 0");
    }
}
