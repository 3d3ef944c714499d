//! Outbound (driven) ports for the inventory ledger.
//!
//! `TransactionStore` is the entity-store surface for movement records.
//! `ProductDirectory` is the narrow view of the catalog the ledger needs:
//! existence checks and min-stock thresholds. The composition root bridges
//! it to the catalog subsystem's product store.

use pos_types::{ProductId, Timestamp};

use crate::domain::{InventoryError, InventoryTransaction, TransactionKind};

/// Entity store surface for movement records.
///
/// `save` is insert-or-update: records with id `0` are inserted and handed
/// back with a fresh store-assigned id.
pub trait TransactionStore: Send + Sync {
    fn find_by_product(&self, product_id: ProductId)
        -> Result<Vec<InventoryTransaction>, InventoryError>;

    fn find_by_kind(&self, kind: TransactionKind)
        -> Result<Vec<InventoryTransaction>, InventoryError>;

    fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<InventoryTransaction>, InventoryError>;

    fn find_by_reference(
        &self,
        reference_type: &str,
        reference_id: Option<i64>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError>;

    /// Keyword substring search across movement notes.
    fn search_notes(&self, keyword: &str) -> Result<Vec<InventoryTransaction>, InventoryError>;

    fn save(&self, tx: InventoryTransaction) -> Result<InventoryTransaction, InventoryError>;

    fn save_all(
        &self,
        txs: Vec<InventoryTransaction>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError>;
}

/// A product's low-stock threshold, as exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockThreshold {
    pub product_id: ProductId,
    pub min_stock_level: i64,
}

/// Catalog surface the ledger depends on.
pub trait ProductDirectory: Send + Sync {
    /// Whether the product id resolves.
    fn exists(&self, product_id: ProductId) -> Result<bool, InventoryError>;

    /// Ids of all known products.
    fn product_ids(&self) -> Result<Vec<ProductId>, InventoryError>;

    /// Min-stock thresholds of all known products.
    fn stock_thresholds(&self) -> Result<Vec<StockThreshold>, InventoryError>;
}

/// Mock product directory for testing.
#[cfg(test)]
pub struct MockProductDirectory {
    thresholds: Vec<StockThreshold>,
}

#[cfg(test)]
impl MockProductDirectory {
    pub fn new() -> Self {
        Self {
            thresholds: Vec::new(),
        }
    }

    pub fn with_product(mut self, product_id: ProductId, min_stock_level: i64) -> Self {
        self.thresholds.push(StockThreshold {
            product_id,
            min_stock_level,
        });
        self
    }
}

#[cfg(test)]
impl ProductDirectory for MockProductDirectory {
    fn exists(&self, product_id: ProductId) -> Result<bool, InventoryError> {
        Ok(self.thresholds.iter().any(|t| t.product_id == product_id))
    }

    fn product_ids(&self) -> Result<Vec<ProductId>, InventoryError> {
        Ok(self.thresholds.iter().map(|t| t.product_id).collect())
    }

    fn stock_thresholds(&self) -> Result<Vec<StockThreshold>, InventoryError> {
        Ok(self.thresholds.clone())
    }
}
