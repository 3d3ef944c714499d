//! Ports for the catalog subsystem.

pub mod outbound;

pub use outbound::*;
