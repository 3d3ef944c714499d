//! # Shared Types
//!
//! Identifier aliases and the common timestamp type used across all
//! back-office subsystems. Every persisted record carries an `i64` id
//! assigned by the entity store on first save; `0` marks a record that has
//! not been persisted yet.

pub mod ids;

pub use ids::*;

/// Timestamp type used for all business dates (order date, movement date).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
