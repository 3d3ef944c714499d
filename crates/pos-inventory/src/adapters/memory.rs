//! In-memory movement store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pos_types::{ProductId, Timestamp, TransactionId, UNSAVED};

use crate::domain::{InventoryError, InventoryTransaction, TransactionKind};
use crate::ports::TransactionStore;

/// In-memory `TransactionStore` with sequential id assignment.
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    inner: RwLock<TransactionTable>,
}

#[derive(Debug, Default)]
struct TransactionTable {
    next_id: TransactionId,
    rows: BTreeMap<TransactionId, InventoryTransaction>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TransactionTable>, InventoryError> {
        self.inner
            .read()
            .map_err(|_| InventoryError::Store("transaction store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TransactionTable>, InventoryError> {
        self.inner
            .write()
            .map_err(|_| InventoryError::Store("transaction store lock poisoned".into()))
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn find_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|tx| tx.product_id == product_id)
            .cloned()
            .collect())
    }

    fn find_by_kind(
        &self,
        kind: TransactionKind,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|tx| tx.kind == kind)
            .cloned()
            .collect())
    }

    fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|tx| tx.transaction_date >= start && tx.transaction_date <= end)
            .cloned()
            .collect())
    }

    fn find_by_reference(
        &self,
        reference_type: &str,
        reference_id: Option<i64>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|tx| {
                tx.reference_type.as_deref() == Some(reference_type)
                    && (reference_id.is_none() || tx.reference_id == reference_id)
            })
            .cloned()
            .collect())
    }

    fn search_notes(&self, keyword: &str) -> Result<Vec<InventoryTransaction>, InventoryError> {
        let needle = keyword.to_lowercase();
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|tx| {
                tx.notes
                    .as_deref()
                    .map(|notes| notes.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn save(&self, mut tx: InventoryTransaction) -> Result<InventoryTransaction, InventoryError> {
        let mut table = self.write()?;
        if tx.id == UNSAVED {
            table.next_id += 1;
            tx.id = table.next_id;
        }
        table.rows.insert(tx.id, tx.clone());
        Ok(tx)
    }

    fn save_all(
        &self,
        txs: Vec<InventoryTransaction>,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        txs.into_iter().map(|tx| self.save(tx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_assigns_sequential_ids() {
        let store = MemoryTransactionStore::new();
        let a = store
            .save(InventoryTransaction::new(1, TransactionKind::In, 5))
            .unwrap();
        let b = store
            .save(InventoryTransaction::new(1, TransactionKind::Out, 2))
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn test_find_by_reference_matches_type_and_optional_id() {
        let store = MemoryTransactionStore::new();
        let mut tx = InventoryTransaction::new(1, TransactionKind::In, 5);
        tx.reference_type = Some("PURCHASE".into());
        tx.reference_id = Some(42);
        store.save(tx).unwrap();

        assert_eq!(store.find_by_reference("PURCHASE", None).unwrap().len(), 1);
        assert_eq!(
            store.find_by_reference("PURCHASE", Some(42)).unwrap().len(),
            1
        );
        assert!(store
            .find_by_reference("PURCHASE", Some(7))
            .unwrap()
            .is_empty());
        assert!(store.find_by_reference("SALE", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_notes_substring() {
        let store = MemoryTransactionStore::new();
        let mut tx = InventoryTransaction::new(1, TransactionKind::Adjustment, 3);
        tx.notes = Some("Yearly recount".into());
        store.save(tx).unwrap();

        assert_eq!(store.search_notes("recount").unwrap().len(), 1);
        assert!(store.search_notes("shrinkage").unwrap().is_empty());
    }
}
