//! The inventory ledger.
//!
//! Append-only movement recording plus the pure fold that derives current
//! stock from a product's history. The fold lives behind one function so it
//! can be tested independently of storage.

use std::sync::Arc;

use pos_types::{ProductId, Timestamp};
use rust_decimal::Decimal;
use tracing::info;

use super::entities::{
    InventoryTransaction, TransactionKind, REFERENCE_ADJUSTMENT, REFERENCE_PURCHASE,
    REFERENCE_RETURN, REFERENCE_SALE,
};
use super::errors::InventoryError;
use crate::ports::{ProductDirectory, TransactionStore};

/// Folds a movement history into the current stock level.
///
/// `In` and `Return` quantities add, `Out` quantities subtract, and
/// `Adjustment` quantities (stored as absolute values) fold into the
/// increase side. No negative floor: a history where outs exceed ins folds
/// to a negative level, which the read path reports as-is.
pub fn derived_stock(history: &[InventoryTransaction]) -> i64 {
    history.iter().map(InventoryTransaction::stock_delta).sum()
}

/// The ledger: records movements and derives stock and valuation.
pub struct InventoryLedger<T, D> {
    transactions: Arc<T>,
    products: Arc<D>,
}

impl<T: TransactionStore, D: ProductDirectory> InventoryLedger<T, D> {
    pub fn new(transactions: Arc<T>, products: Arc<D>) -> Self {
        Self {
            transactions,
            products,
        }
    }

    /// Records a purchase stock-in.
    ///
    /// # Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `ProductNotFound` if the product does not resolve
    pub fn record_in(
        &self,
        product_id: ProductId,
        quantity: i64,
        unit_cost: Option<Decimal>,
        reference: Option<&str>,
    ) -> Result<InventoryTransaction, InventoryError> {
        require_positive(TransactionKind::In, quantity)?;

        let mut tx = InventoryTransaction::new(product_id, TransactionKind::In, quantity);
        tx.unit_cost = unit_cost;
        tx.reference_type = Some(REFERENCE_PURCHASE.into());
        tx.notes = reference.map(str::to_owned);

        self.append(tx)
    }

    /// Records a sale stock-out, guarded by the derived stock level.
    ///
    /// Read-then-check: the sufficiency test and the append are not one
    /// atomic step (see the crate docs). On failure no movement is appended.
    ///
    /// # Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `ProductNotFound` if the product does not resolve
    /// - `InsufficientStock` if derived stock at call time is below `quantity`
    pub fn record_out(
        &self,
        product_id: ProductId,
        quantity: i64,
        unit_cost: Option<Decimal>,
        reference: Option<&str>,
    ) -> Result<InventoryTransaction, InventoryError> {
        require_positive(TransactionKind::Out, quantity)?;

        let available = self.current_stock(product_id)?;
        if available < quantity {
            return Err(InventoryError::InsufficientStock {
                product_id,
                requested: quantity,
                available,
            });
        }

        let mut tx = InventoryTransaction::new(product_id, TransactionKind::Out, quantity);
        tx.unit_cost = unit_cost;
        tx.reference_type = Some(REFERENCE_SALE.into());
        tx.notes = reference.map(str::to_owned);

        self.append(tx)
    }

    /// Records a customer return (stock-increasing).
    ///
    /// # Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `ProductNotFound` if the product does not resolve
    pub fn record_return(
        &self,
        product_id: ProductId,
        quantity: i64,
        unit_cost: Option<Decimal>,
        reference: Option<&str>,
    ) -> Result<InventoryTransaction, InventoryError> {
        require_positive(TransactionKind::Return, quantity)?;

        let mut tx = InventoryTransaction::new(product_id, TransactionKind::Return, quantity);
        tx.unit_cost = unit_cost;
        tx.reference_type = Some(REFERENCE_RETURN.into());
        tx.notes = reference.map(str::to_owned);

        self.append(tx)
    }

    /// Records a manual adjustment. The quantity is stored as `abs(quantity)`
    /// and folds into the increase side of the stock formula.
    pub fn record_adjustment(
        &self,
        product_id: ProductId,
        quantity: i64,
        unit_cost: Option<Decimal>,
        reason: Option<&str>,
    ) -> Result<InventoryTransaction, InventoryError> {
        let mut tx = InventoryTransaction::new(
            product_id,
            TransactionKind::Adjustment,
            quantity.abs(),
        );
        tx.unit_cost = unit_cost;
        tx.reference_type = Some(REFERENCE_ADJUSTMENT.into());
        tx.notes = reason.map(str::to_owned);

        self.append(tx)
    }

    /// Appends a movement: resolves the product, recomputes the derived
    /// `total_cost`, and saves. No stock-sufficiency check happens here —
    /// that guard belongs to [`InventoryLedger::record_out`].
    pub fn append(
        &self,
        mut tx: InventoryTransaction,
    ) -> Result<InventoryTransaction, InventoryError> {
        if !self.products.exists(tx.product_id)? {
            return Err(InventoryError::ProductNotFound(tx.product_id));
        }

        tx.recompute_total_cost();
        let saved = self.transactions.save(tx)?;
        info!(
            transaction_id = saved.id,
            product_id = saved.product_id,
            kind = %saved.kind,
            quantity = saved.quantity,
            "inventory movement recorded"
        );
        Ok(saved)
    }

    /// Batch append. Each movement resolves its product and gets its total
    /// cost recomputed before the batch save.
    pub fn bulk_record(
        &self,
        txs: Vec<InventoryTransaction>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        let mut prepared = Vec::with_capacity(txs.len());
        for mut tx in txs {
            if !self.products.exists(tx.product_id)? {
                return Err(InventoryError::ProductNotFound(tx.product_id));
            }
            tx.recompute_total_cost();
            prepared.push(tx);
        }

        let saved = self.transactions.save_all(prepared)?;
        info!(count = saved.len(), "bulk stock update recorded");
        Ok(saved)
    }

    /// Current stock, recomputed fresh from the full movement history.
    pub fn current_stock(&self, product_id: ProductId) -> Result<i64, InventoryError> {
        if !self.products.exists(product_id)? {
            return Err(InventoryError::ProductNotFound(product_id));
        }

        let history = self.transactions.find_by_product(product_id)?;
        Ok(derived_stock(&history))
    }

    pub fn has_enough_stock(
        &self,
        product_id: ProductId,
        required: i64,
    ) -> Result<bool, InventoryError> {
        Ok(self.current_stock(product_id)? >= required)
    }

    /// Inventory value of one product: Σ(unit_cost × quantity) over inbound
    /// movements only (outs and adjustments carry no valuation).
    pub fn inventory_value(&self, product_id: ProductId) -> Result<Decimal, InventoryError> {
        if !self.products.exists(product_id)? {
            return Err(InventoryError::ProductNotFound(product_id));
        }

        let history = self.transactions.find_by_product(product_id)?;
        Ok(history
            .iter()
            .filter(|tx| tx.kind.counts_toward_value())
            .map(|tx| tx.unit_cost.unwrap_or(Decimal::ZERO) * Decimal::from(tx.quantity))
            .sum())
    }

    /// Inventory value summed over every product in the catalog.
    pub fn total_inventory_value(&self) -> Result<Decimal, InventoryError> {
        let mut total = Decimal::ZERO;
        for product_id in self.products.product_ids()? {
            total += self.inventory_value(product_id)?;
        }
        Ok(total)
    }

    /// Products whose min-stock threshold has caught up with derived stock
    /// (`min_stock_level >= stock`). A static compare per product,
    /// recomputed per call, never cached.
    pub fn low_stock_product_ids(&self) -> Result<Vec<ProductId>, InventoryError> {
        let mut low = Vec::new();
        for threshold in self.products.stock_thresholds()? {
            let history = self.transactions.find_by_product(threshold.product_id)?;
            if threshold.min_stock_level >= derived_stock(&history) {
                low.push(threshold.product_id);
            }
        }
        Ok(low)
    }

    // ---- queries -----------------------------------------------------------

    pub fn transactions_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        if !self.products.exists(product_id)? {
            return Err(InventoryError::ProductNotFound(product_id));
        }
        self.transactions.find_by_product(product_id)
    }

    pub fn transactions_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        self.transactions.find_by_date_range(start, end)
    }

    pub fn transactions_by_kind(
        &self,
        kind: TransactionKind,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        self.transactions.find_by_kind(kind)
    }

    pub fn transactions_by_reference(
        &self,
        reference_type: &str,
        reference_id: Option<i64>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        self.transactions.find_by_reference(reference_type, reference_id)
    }

    pub fn search_notes(&self, keyword: &str) -> Result<Vec<InventoryTransaction>, InventoryError> {
        self.transactions.search_notes(keyword)
    }

    /// Page of a product's history, zero-based.
    pub fn transaction_history(
        &self,
        product_id: ProductId,
        page: usize,
        size: usize,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        let all = self.transactions_by_product(product_id)?;

        let start = page * size;
        if start >= all.len() {
            return Ok(Vec::new());
        }
        let end = (start + size).min(all.len());
        Ok(all[start..end].to_vec())
    }
}

fn require_positive(kind: TransactionKind, quantity: i64) -> Result<(), InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity { kind, quantity });
    }
    Ok(())
}
