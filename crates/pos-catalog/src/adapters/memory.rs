//! In-memory entity stores for the catalog subsystem.
//!
//! Keyed storage over `RwLock<BTreeMap>` with sequential id assignment.
//! Used by the unit tests and by the unified test suite as the composition
//! root's store; a persistent deployment supplies its own implementation of
//! the same ports.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pos_types::{CategoryId, ProductId, UNSAVED};
use rust_decimal::Decimal;

use crate::domain::{CatalogError, Category, Product, ProductStatus};
use crate::ports::{CategoryStore, ProductStore};

fn contains_keyword(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// In-memory `CategoryStore`.
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    inner: RwLock<CategoryTable>,
}

#[derive(Debug, Default)]
struct CategoryTable {
    next_id: CategoryId,
    rows: BTreeMap<CategoryId, Category>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CategoryTable>, CatalogError> {
        self.inner
            .read()
            .map_err(|_| CatalogError::Store("category store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CategoryTable>, CatalogError> {
        self.inner
            .write()
            .map_err(|_| CatalogError::Store("category store lock poisoned".into()))
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError> {
        Ok(self.read()?.rows.values().find(|c| c.name == name).cloned())
    }

    fn find_all(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn find_roots(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect())
    }

    fn find_children(&self, parent_id: CategoryId) -> Result<Vec<Category>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    fn find_active(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError> {
        let table = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    fn search(&self, keyword: &str) -> Result<Vec<Category>, CatalogError> {
        let needle = keyword.to_lowercase();
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|c| {
                contains_keyword(Some(&c.name), &needle)
                    || contains_keyword(c.description.as_deref(), &needle)
            })
            .cloned()
            .collect())
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, CatalogError> {
        Ok(self.read()?.rows.values().any(|c| c.name == name))
    }

    fn save(&self, mut category: Category) -> Result<Category, CatalogError> {
        let mut table = self.write()?;
        if category.id == UNSAVED {
            table.next_id += 1;
            category.id = table.next_id;
        }
        table.rows.insert(category.id, category.clone());
        Ok(category)
    }

    fn save_all(&self, categories: Vec<Category>) -> Result<Vec<Category>, CatalogError> {
        categories.into_iter().map(|c| self.save(c)).collect()
    }

    fn delete(&self, id: CategoryId) -> Result<(), CatalogError> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}

/// In-memory `ProductStore`.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    inner: RwLock<ProductTable>,
}

#[derive(Debug, Default)]
struct ProductTable {
    next_id: ProductId,
    rows: BTreeMap<ProductId, Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ProductTable>, CatalogError> {
        self.inner
            .read()
            .map_err(|_| CatalogError::Store("product store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ProductTable>, CatalogError> {
        self.inner
            .write()
            .map_err(|_| CatalogError::Store("product store lock poisoned".into()))
    }
}

impl ProductStore for MemoryProductStore {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.read()?.rows.values().find(|p| p.sku == sku).cloned())
    }

    fn find_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn find_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    fn find_by_status(&self, status: ProductStatus) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect())
    }

    fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect())
    }

    fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogError> {
        let table = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    fn search(&self, keyword: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = keyword.to_lowercase();
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| {
                contains_keyword(Some(&p.name), &needle)
                    || contains_keyword(Some(&p.sku), &needle)
                    || contains_keyword(p.description.as_deref(), &needle)
            })
            .cloned()
            .collect())
    }

    fn exists_by_sku(&self, sku: &str) -> Result<bool, CatalogError> {
        Ok(self.read()?.rows.values().any(|p| p.sku == sku))
    }

    fn exists_by_barcode(&self, barcode: &str) -> Result<bool, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .any(|p| p.barcode.as_deref() == Some(barcode)))
    }

    fn count_by_category(&self, category_id: CategoryId) -> Result<u64, CatalogError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .count() as u64)
    }

    fn save(&self, mut product: Product) -> Result<Product, CatalogError> {
        let mut table = self.write()?;
        if product.id == UNSAVED {
            table.next_id += 1;
            product.id = table.next_id;
        }
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    fn save_all(&self, products: Vec<Product>) -> Result<Vec<Product>, CatalogError> {
        products.into_iter().map(|p| self.save(p)).collect()
    }

    fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_assigns_sequential_ids() {
        let store = MemoryCategoryStore::new();
        let a = store.save(Category::new("A")).unwrap();
        let b = store.save(Category::new("B")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_save_updates_existing_row() {
        let store = MemoryCategoryStore::new();
        let mut a = store.save(Category::new("A")).unwrap();
        a.name = "A2".into();
        let a = store.save(a).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(store.find_by_id(1).unwrap().unwrap().name, "A2");
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = MemoryProductStore::new();
        let mut p = Product::new("Blue Widget");
        p.sku = "SKU-1".into();
        store.save(p).unwrap();

        assert_eq!(store.search("widget").unwrap().len(), 1);
        assert_eq!(store.search("sku-1").unwrap().len(), 1);
        assert!(store.search("gadget").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_ids_skips_missing() {
        let store = MemoryCategoryStore::new();
        let a = store.save(Category::new("A")).unwrap();
        let found = store.find_by_ids(&[a.id, 99]).unwrap();
        assert_eq!(found.len(), 1);
    }
}
