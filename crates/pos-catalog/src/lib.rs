//! # Catalog Subsystem
//!
//! Maintains the product catalog: a forest of categories with stable sibling
//! ordering, and the products filed under them.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Category names are unique | `CategoryManager::create` / `update` |
//! | The parent graph is acyclic | self-parent and descendant guards on `update` / `move_to` |
//! | Categories with children or products cannot be deleted | `CategoryManager::delete` |
//! | SKU and barcode are unique | `ProductManager::create` / `update` |
//! | Prices are non-negative, tax rate within 0–100 | `ProductManager::create` / `update` |
//!
//! Products carry no stock-quantity field. On-hand stock is derived by the
//! inventory ledger from the movement history; the catalog only holds the
//! min/max thresholds the ledger compares against.
//!
//! ## Module Structure
//!
//! - `domain` — entities, errors, and the two managers
//! - `ports` — outbound traits describing the entity-store collaborator
//! - `adapters` — in-memory store implementations

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::{
    CatalogError, Category, CategoryManager, CategoryNode, CategoryUpdate, Product,
    ProductManager, ProductStatus,
};
pub use ports::{CategoryStore, ProductStore};
