//! Adapters for the inventory ledger.

pub mod memory;

pub use memory::*;
