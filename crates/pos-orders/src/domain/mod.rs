//! # Domain Layer - Order Lifecycle
//!
//! ## Components
//!
//! - `entities`: Order, OrderItem, OrderStatus state machine
//! - `errors`: OrderError enumeration
//! - `lifecycle`: OrderManager (creation, totals, transitions, payment)

pub mod entities;
pub mod errors;
pub mod lifecycle;

pub use entities::*;
pub use errors::*;
pub use lifecycle::*;
