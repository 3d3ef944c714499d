//! Product manager.
//!
//! Unique SKU/barcode enforcement, price validation, and pricing helpers.
//! Stock is out of scope here: the inventory ledger derives it from the
//! movement history.

use std::sync::Arc;

use pos_idgen::{CodeGenerator, MAX_GENERATION_ATTEMPTS};
use pos_types::{CategoryId, ProductId};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use super::entities::{Product, ProductStatus};
use super::errors::CatalogError;
use crate::ports::ProductStore;

/// Manager for product records.
pub struct ProductManager<P> {
    products: Arc<P>,
    codes: Arc<CodeGenerator>,
}

impl<P: ProductStore> ProductManager<P> {
    pub fn new(products: Arc<P>) -> Self {
        Self::with_generator(products, Arc::new(CodeGenerator::new()))
    }

    /// Shares a code generator with other managers in the same process.
    pub fn with_generator(products: Arc<P>, codes: Arc<CodeGenerator>) -> Self {
        Self { products, codes }
    }

    /// Creates a product. An empty SKU on the draft means "generate one".
    ///
    /// # Errors
    /// - `DuplicateSku` / `DuplicateBarcode` on unique-field collisions
    /// - `NegativePrice` / `InvalidTaxRate` on out-of-range numeric fields
    /// - `ExhaustedRetries` if no unique SKU was found within the attempt cap
    pub fn create(&self, mut product: Product) -> Result<Product, CatalogError> {
        validate_pricing(&product)?;

        if product.sku.is_empty() {
            product.sku = self.unique_sku()?;
        } else if self.products.exists_by_sku(&product.sku)? {
            return Err(CatalogError::DuplicateSku(product.sku));
        }

        if let Some(barcode) = &product.barcode {
            if self.products.exists_by_barcode(barcode)? {
                return Err(CatalogError::DuplicateBarcode(barcode.clone()));
            }
        }

        let saved = self.products.save(product)?;
        info!(product_id = saved.id, sku = %saved.sku, "product created");
        Ok(saved)
    }

    /// Replaces a product's fields.
    ///
    /// # Errors
    /// - `ProductNotFound` if the id does not resolve
    /// - `DuplicateSku` / `DuplicateBarcode` when the changed value collides
    /// - `NegativePrice` / `InvalidTaxRate` on out-of-range numeric fields
    pub fn update(&self, id: ProductId, product: Product) -> Result<Product, CatalogError> {
        let mut existing = self.require(id)?;

        validate_pricing(&product)?;

        if existing.sku != product.sku && self.products.exists_by_sku(&product.sku)? {
            return Err(CatalogError::DuplicateSku(product.sku));
        }

        if let Some(barcode) = &product.barcode {
            if existing.barcode.as_deref() != Some(barcode)
                && self.products.exists_by_barcode(barcode)?
            {
                return Err(CatalogError::DuplicateBarcode(barcode.clone()));
            }
        }

        existing.name = product.name;
        existing.sku = product.sku;
        existing.barcode = product.barcode;
        existing.description = product.description;
        existing.category_id = product.category_id;
        existing.price = product.price;
        existing.cost_price = product.cost_price;
        existing.sale_price = product.sale_price;
        existing.tax_rate = product.tax_rate;
        existing.min_stock_level = product.min_stock_level;
        existing.max_stock_level = product.max_stock_level;
        existing.status = product.status;

        let saved = self.products.save(existing)?;
        info!(product_id = id, "product updated");
        Ok(saved)
    }

    pub fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.require(id)?;
        self.products.delete(id)?;
        info!(product_id = id, "product deleted");
        Ok(())
    }

    pub fn set_status(&self, id: ProductId, status: ProductStatus) -> Result<Product, CatalogError> {
        let mut product = self.require(id)?;
        product.status = status;
        let saved = self.products.save(product)?;
        info!(product_id = id, status = %status, "product status updated");
        Ok(saved)
    }

    /// Sale price plus tax, half-up rounded to 2 decimal places.
    pub fn price_with_tax(&self, id: ProductId) -> Result<Decimal, CatalogError> {
        let product = self.require(id)?;

        if product.tax_rate.is_zero() {
            return Ok(product.sale_price);
        }

        let rate = (product.tax_rate / Decimal::from(100))
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
        let tax = product.sale_price * rate;
        Ok((product.sale_price + tax)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Applies `delta` to the sale price of every resolved product.
    /// Validates the whole batch before saving anything: one negative result
    /// rejects the call with no writes.
    pub fn bulk_update_prices(
        &self,
        ids: &[ProductId],
        delta: Decimal,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.products.find_by_ids(ids)?;

        for product in &mut products {
            let new_price = product.sale_price + delta;
            if new_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    field: "sale_price",
                    value: new_price,
                });
            }
            product.sale_price = new_price;
        }

        let saved = self.products.save_all(products)?;
        info!(count = saved.len(), %delta, "bulk price update applied");
        Ok(saved)
    }

    // ---- queries -----------------------------------------------------------

    pub fn find(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        self.products.find_by_id(id)
    }

    pub fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, CatalogError> {
        self.products.find_by_sku(sku)
    }

    pub fn all(&self) -> Result<Vec<Product>, CatalogError> {
        self.products.find_all()
    }

    pub fn by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, CatalogError> {
        self.products.find_by_category(category_id)
    }

    pub fn by_status(&self, status: ProductStatus) -> Result<Vec<Product>, CatalogError> {
        self.products.find_by_status(status)
    }

    pub fn active(&self) -> Result<Vec<Product>, CatalogError> {
        self.products.find_by_status(ProductStatus::Active)
    }

    pub fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Product>, CatalogError> {
        self.products.find_by_price_range(min, max)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Product>, CatalogError> {
        self.products.search(keyword)
    }

    pub fn exists_by_sku(&self, sku: &str) -> Result<bool, CatalogError> {
        self.products.exists_by_sku(sku)
    }

    pub fn exists_by_barcode(&self, barcode: &str) -> Result<bool, CatalogError> {
        self.products.exists_by_barcode(barcode)
    }

    pub fn count_by_category(&self, category_id: CategoryId) -> Result<u64, CatalogError> {
        self.products.count_by_category(category_id)
    }

    // ---- internals ---------------------------------------------------------

    fn require(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .find_by_id(id)?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Bounded generate-and-check loop against the store.
    fn unique_sku(&self) -> Result<String, CatalogError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.codes.sku();
            if !self.products.exists_by_sku(&candidate)? {
                return Ok(candidate);
            }
        }
        Err(CatalogError::ExhaustedRetries {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

fn validate_pricing(product: &Product) -> Result<(), CatalogError> {
    for (field, value) in [
        ("price", product.price),
        ("cost_price", product.cost_price),
        ("sale_price", product.sale_price),
    ] {
        if value < Decimal::ZERO {
            return Err(CatalogError::NegativePrice { field, value });
        }
    }

    if product.tax_rate < Decimal::ZERO || product.tax_rate > Decimal::from(100) {
        return Err(CatalogError::InvalidTaxRate(product.tax_rate));
    }

    Ok(())
}
