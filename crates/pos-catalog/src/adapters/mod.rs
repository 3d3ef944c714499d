//! Adapters for the catalog subsystem.

pub mod memory;

pub use memory::*;
