//! Error types for the catalog subsystem.

use pos_types::{CategoryId, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// All errors that can occur in catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Referenced category id does not resolve.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Proposed parent category id does not resolve.
    #[error("Parent category not found: {0}")]
    ParentNotFound(CategoryId),

    /// Category name collides with an existing category.
    #[error("Category name already exists: {0}")]
    DuplicateName(String),

    /// A category may not be its own parent.
    #[error("Category {0} cannot be its own parent")]
    SelfParent(CategoryId),

    /// Reparenting would introduce a cycle.
    #[error("Cannot move category {id} under its own descendant {parent}")]
    DescendantParent { id: CategoryId, parent: CategoryId },

    /// Category still has subcategories.
    #[error("Cannot delete category {0} with subcategories")]
    HasSubcategories(CategoryId),

    /// Category still has products filed under it.
    #[error("Cannot delete category {id} with {count} products")]
    HasProducts { id: CategoryId, count: u64 },

    /// Referenced product id does not resolve.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// SKU collides with an existing product.
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// Barcode collides with an existing product.
    #[error("Barcode already exists: {0}")]
    DuplicateBarcode(String),

    /// A price field is negative.
    #[error("{field} cannot be negative: {value}")]
    NegativePrice { field: &'static str, value: Decimal },

    /// Tax rate outside the 0–100 range.
    #[error("Tax rate must be within 0–100: {0}")]
    InvalidTaxRate(Decimal),

    /// Could not produce a unique code within the attempt cap.
    #[error("Unable to generate a unique SKU after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Entity store failure.
    #[error("Store error: {0}")]
    Store(String),
}
