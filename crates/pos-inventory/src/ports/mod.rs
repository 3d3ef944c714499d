//! Ports for the inventory ledger.

pub mod outbound;

pub use outbound::*;
