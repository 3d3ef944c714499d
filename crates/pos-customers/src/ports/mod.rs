//! # Ports Layer - Customer Accounts
//!
//! Outbound traits the customer service requires from its collaborators.

pub mod outbound;

pub use outbound::*;
