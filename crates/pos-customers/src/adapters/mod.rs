//! # Adapters Layer - Customer Accounts
//!
//! In-memory implementation of the customer store port.

pub mod memory;

pub use memory::*;
