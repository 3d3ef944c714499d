//! # Domain Layer - Customer Accounts
//!
//! ## Components
//!
//! - `entities`: Customer record
//! - `errors`: CustomerError enumeration
//! - `accounts`: CustomerManager (codes, loyalty points, credit)

pub mod accounts;
pub mod entities;
pub mod errors;

pub use accounts::*;
pub use entities::*;
pub use errors::*;
