//! Outbound (driven) ports for the catalog subsystem.
//!
//! These traits describe the entity-store collaborator: durable keyed
//! storage with filtered queries, keyword search, existence checks, and
//! insert-or-update saves. Storage internals (SQL, pagination, transport)
//! live behind these traits and are out of scope here.

use pos_types::{CategoryId, ProductId};
use rust_decimal::Decimal;

use crate::domain::{CatalogError, Category, Product, ProductStatus};

/// Entity store surface for category records.
///
/// `save` is insert-or-update: records with id `0` are inserted and handed
/// back with a fresh store-assigned id.
pub trait CategoryStore: Send + Sync {
    fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CatalogError>;

    fn find_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError>;

    fn find_all(&self) -> Result<Vec<Category>, CatalogError>;

    /// Categories with no parent.
    fn find_roots(&self) -> Result<Vec<Category>, CatalogError>;

    /// Direct children of `parent_id`.
    fn find_children(&self, parent_id: CategoryId) -> Result<Vec<Category>, CatalogError>;

    fn find_active(&self) -> Result<Vec<Category>, CatalogError>;

    fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError>;

    /// Keyword substring search across name and description.
    fn search(&self, keyword: &str) -> Result<Vec<Category>, CatalogError>;

    /// Existence check by unique name (case-sensitive exact match).
    fn exists_by_name(&self, name: &str) -> Result<bool, CatalogError>;

    fn save(&self, category: Category) -> Result<Category, CatalogError>;

    fn save_all(&self, categories: Vec<Category>) -> Result<Vec<Category>, CatalogError>;

    fn delete(&self, id: CategoryId) -> Result<(), CatalogError>;
}

/// Entity store surface for product records.
pub trait ProductStore: Send + Sync {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;

    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CatalogError>;

    fn find_all(&self) -> Result<Vec<Product>, CatalogError>;

    fn find_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, CatalogError>;

    fn find_by_status(&self, status: ProductStatus) -> Result<Vec<Product>, CatalogError>;

    /// Products whose price lies within `[min, max]`.
    fn find_by_price_range(&self, min: Decimal, max: Decimal)
        -> Result<Vec<Product>, CatalogError>;

    fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogError>;

    /// Keyword substring search across name, SKU, and description.
    fn search(&self, keyword: &str) -> Result<Vec<Product>, CatalogError>;

    fn exists_by_sku(&self, sku: &str) -> Result<bool, CatalogError>;

    fn exists_by_barcode(&self, barcode: &str) -> Result<bool, CatalogError>;

    fn count_by_category(&self, category_id: CategoryId) -> Result<u64, CatalogError>;

    fn save(&self, product: Product) -> Result<Product, CatalogError>;

    fn save_all(&self, products: Vec<Product>) -> Result<Vec<Product>, CatalogError>;

    fn delete(&self, id: ProductId) -> Result<(), CatalogError>;
}
