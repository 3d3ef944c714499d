//! # Integration Tests
//!
//! Cross-subsystem flows over a fully wired [`crate::Backoffice`].

pub mod flows;
