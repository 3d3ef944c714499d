//! # Domain Layer - Inventory Ledger
//!
//! ## Components
//!
//! - `entities`: TransactionKind, InventoryTransaction
//! - `errors`: InventoryError enumeration
//! - `ledger`: InventoryLedger and the pure `derived_stock` fold

pub mod entities;
pub mod errors;
pub mod ledger;

pub use entities::*;
pub use errors::*;
pub use ledger::*;
