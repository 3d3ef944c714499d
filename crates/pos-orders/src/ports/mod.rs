//! # Ports Layer - Order Lifecycle
//!
//! Outbound trait the order service requires from its persistence
//! collaborator.

pub mod outbound;

pub use outbound::*;
