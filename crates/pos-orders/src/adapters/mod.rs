//! # Adapters Layer - Order Lifecycle
//!
//! In-memory implementation of the order store port.

pub mod memory;

pub use memory::*;
