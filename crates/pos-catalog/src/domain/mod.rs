//! # Domain Layer - Catalog Subsystem
//!
//! ## Components
//!
//! - `entities`: Category, CategoryNode, Product, ProductStatus
//! - `errors`: CatalogError enumeration
//! - `hierarchy`: CategoryManager (tree invariants, ordering, guarded deletes)
//! - `products`: ProductManager (unique SKU/barcode, pricing, bulk updates)

pub mod entities;
pub mod errors;
pub mod hierarchy;
pub mod products;

pub use entities::*;
pub use errors::*;
pub use hierarchy::*;
pub use products::*;
