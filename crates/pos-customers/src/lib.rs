//! # Customer Account Subsystem
//!
//! Customer records with generated business codes, a loyalty-point balance
//! and a credit line. Deleting a customer is refused while orders reference
//! them; the order count comes in through the `OrderDirectory` port so this
//! crate stays ignorant of the order model.
//!
//! ## Module Structure
//!
//! - `domain` — Customer entity, CustomerManager
//! - `ports` — outbound traits (customer store, order directory)
//! - `adapters` — in-memory customer store

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{Customer, CustomerError, CustomerManager, CustomerUpdate};
pub use ports::{CustomerStore, OrderDirectory};
