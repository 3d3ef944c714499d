//! # Inventory Ledger Subsystem
//!
//! Single source of truth for stock level and inventory valuation. Stock is
//! never stored as a mutable counter: it is derived by folding the product's
//! full movement history, recomputed fresh on every query.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Movements carry positive magnitudes | `record_in` / `record_out` / `record_return` |
//! | Stock-out never exceeds derived stock at call time | `record_out` read-then-check |
//! | `total_cost` is always `unit_cost × quantity` | recomputed on every append |
//! | Derived stock equals the signed fold of the history | [`domain::ledger::derived_stock`] |
//!
//! The stock-sufficiency check in `record_out` is read-then-act: two
//! concurrent outs can both pass before either commits, so derived stock can
//! go negative under race. The read path treats negative stock as a valid
//! (if alarming) data state, not an error. Closing the race needs a
//! transaction boundary spanning the balance read and the append, which
//! belongs to the store implementation.
//!
//! ## Module Structure
//!
//! - `domain` — movement entities, errors, the ledger and its pure fold
//! - `ports` — outbound traits: movement store and product directory
//! - `adapters` — in-memory movement store

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{
    derived_stock, InventoryError, InventoryLedger, InventoryTransaction, TransactionKind,
};
pub use ports::{ProductDirectory, StockThreshold, TransactionStore};
