//! # Order Lifecycle Subsystem
//!
//! Order creation, total computation, and status-transition enforcement.
//!
//! ## Status State Machine
//!
//! ```text
//! Pending ──→ Confirmed ──→ Processing ──→ Shipped ──→ Delivered
//!    │            │              │
//!    └────────────┴──────────────┴──→ Cancelled
//! ```
//!
//! | From       | Allowed to            |
//! |------------|-----------------------|
//! | Pending    | Confirmed, Cancelled  |
//! | Confirmed  | Processing, Cancelled |
//! | Processing | Shipped, Cancelled    |
//! | Shipped    | Delivered             |
//! | Delivered  | (terminal)            |
//! | Cancelled  | (terminal)            |
//!
//! A same-state "transition" is always a no-op success. `cancel` is an
//! intentional override of the table: it also cancels Shipped orders, which
//! `update_status` would reject. The two paths are kept separate on purpose;
//! do not unify them.
//!
//! ## Module Structure
//!
//! - `domain` — Order/OrderItem entities, OrderStatus machine, OrderManager
//! - `ports` — outbound trait describing the order store collaborator
//! - `adapters` — in-memory order store

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{Order, OrderError, OrderItem, OrderManager, OrderStatus, OrderUpdate};
pub use ports::OrderStore;
