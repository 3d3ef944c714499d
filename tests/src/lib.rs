//! # POS Back-Office Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── lib.rs            # Composition root (Backoffice) and port bridges
//! └── integration/      # Cross-subsystem flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pos-tests
//!
//! # By category
//! cargo test -p pos-tests integration::
//! ```
//!
//! The subsystem crates only know their own ports. This crate is where the
//! wiring happens: the inventory ledger's `ProductDirectory` is bridged to
//! the catalog's product store, and the customer service's `OrderDirectory`
//! to the order store. All services share one `CodeGenerator` so business
//! codes stay globally sequential.

#![allow(dead_code)]

use std::sync::Arc;

use pos_catalog::adapters::{MemoryCategoryStore, MemoryProductStore};
use pos_catalog::domain::{CategoryManager, ProductManager};
use pos_catalog::ports::ProductStore;
use pos_customers::adapters::MemoryCustomerStore;
use pos_customers::domain::CustomerManager;
use pos_customers::ports::OrderDirectory;
use pos_customers::CustomerError;
use pos_idgen::CodeGenerator;
use pos_inventory::adapters::MemoryTransactionStore;
use pos_inventory::domain::InventoryLedger;
use pos_inventory::ports::{ProductDirectory, StockThreshold};
use pos_inventory::InventoryError;
use pos_orders::adapters::MemoryOrderStore;
use pos_orders::domain::OrderManager;
use pos_orders::ports::OrderStore;
use pos_types::{CustomerId, ProductId};

pub mod integration;

/// Bridges the inventory ledger's catalog view onto the product store.
pub struct CatalogDirectory {
    products: Arc<MemoryProductStore>,
}

impl CatalogDirectory {
    pub fn new(products: Arc<MemoryProductStore>) -> Self {
        Self { products }
    }
}

impl ProductDirectory for CatalogDirectory {
    fn exists(&self, product_id: ProductId) -> Result<bool, InventoryError> {
        Ok(self
            .products
            .find_by_id(product_id)
            .map_err(|err| InventoryError::Store(err.to_string()))?
            .is_some())
    }

    fn product_ids(&self) -> Result<Vec<ProductId>, InventoryError> {
        Ok(self
            .products
            .find_all()
            .map_err(|err| InventoryError::Store(err.to_string()))?
            .into_iter()
            .map(|product| product.id)
            .collect())
    }

    fn stock_thresholds(&self) -> Result<Vec<StockThreshold>, InventoryError> {
        Ok(self
            .products
            .find_all()
            .map_err(|err| InventoryError::Store(err.to_string()))?
            .into_iter()
            .map(|product| StockThreshold {
                product_id: product.id,
                min_stock_level: product.min_stock_level,
            })
            .collect())
    }
}

/// Bridges the customer service's order view onto the order store.
pub struct OrderCounts {
    orders: Arc<MemoryOrderStore>,
}

impl OrderCounts {
    pub fn new(orders: Arc<MemoryOrderStore>) -> Self {
        Self { orders }
    }
}

impl OrderDirectory for OrderCounts {
    fn count_by_customer(&self, customer_id: CustomerId) -> Result<u64, CustomerError> {
        Ok(self
            .orders
            .find_by_customer(customer_id)
            .map_err(|err| CustomerError::Store(err.to_string()))?
            .len() as u64)
    }
}

/// Fully wired back office over in-memory stores.
pub struct Backoffice {
    pub categories: CategoryManager<MemoryCategoryStore, MemoryProductStore>,
    pub products: ProductManager<MemoryProductStore>,
    pub inventory: InventoryLedger<MemoryTransactionStore, CatalogDirectory>,
    pub orders: OrderManager<MemoryOrderStore>,
    pub customers: CustomerManager<MemoryCustomerStore, OrderCounts>,
}

impl Backoffice {
    pub fn new() -> Self {
        let category_store = Arc::new(MemoryCategoryStore::new());
        let product_store = Arc::new(MemoryProductStore::new());
        let transaction_store = Arc::new(MemoryTransactionStore::new());
        let order_store = Arc::new(MemoryOrderStore::new());
        let customer_store = Arc::new(MemoryCustomerStore::new());
        let codes = Arc::new(CodeGenerator::new());

        Self {
            categories: CategoryManager::new(category_store, Arc::clone(&product_store)),
            products: ProductManager::with_generator(
                Arc::clone(&product_store),
                Arc::clone(&codes),
            ),
            inventory: InventoryLedger::new(
                transaction_store,
                Arc::new(CatalogDirectory::new(product_store)),
            ),
            orders: OrderManager::with_generator(Arc::clone(&order_store), Arc::clone(&codes)),
            customers: CustomerManager::with_generator(
                customer_store,
                Arc::new(OrderCounts::new(order_store)),
                codes,
            ),
        }
    }
}

impl Default for Backoffice {
    fn default() -> Self {
        Self::new()
    }
}

/// Enables log output in flow tests when RUST_LOG is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
