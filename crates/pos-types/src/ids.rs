//! Identifier aliases for the persisted entities.
//!
//! Ids are store-assigned surrogate keys. A value of `0` means "not yet
//! persisted"; the store assigns a fresh positive id on insert.

/// Category record id.
pub type CategoryId = i64;

/// Product record id.
pub type ProductId = i64;

/// Customer record id.
pub type CustomerId = i64;

/// Order record id.
pub type OrderId = i64;

/// Order line item record id.
pub type OrderItemId = i64;

/// Inventory movement record id.
pub type TransactionId = i64;

/// Sentinel id for records that have not been persisted yet.
pub const UNSAVED: i64 = 0;
