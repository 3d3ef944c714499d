//! In-memory order store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pos_types::{CustomerId, OrderId, OrderItemId, Timestamp, UNSAVED};
use rust_decimal::Decimal;

use crate::domain::{Order, OrderError, OrderStatus};
use crate::ports::OrderStore;

/// In-memory `OrderStore` with sequential id assignment for orders and
/// their line items.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    inner: RwLock<OrderTable>,
}

#[derive(Debug, Default)]
struct OrderTable {
    next_id: OrderId,
    next_item_id: OrderItemId,
    rows: BTreeMap<OrderId, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, OrderTable>, OrderError> {
        self.inner
            .read()
            .map_err(|_| OrderError::Store("order store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, OrderTable>, OrderError> {
        self.inner
            .write()
            .map_err(|_| OrderError::Store("order store lock poisoned".into()))
    }
}

fn contains_keyword(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

impl OrderStore for MemoryOrderStore {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_by_number(&self, number: &str) -> Result<Option<Order>, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|order| order.order_number == number)
            .cloned())
    }

    fn exists_by_number(&self, number: &str) -> Result<bool, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .any(|order| order.order_number == number))
    }

    fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| order.customer_id == Some(customer_id))
            .cloned()
            .collect())
    }

    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| order.status == status)
            .cloned()
            .collect())
    }

    fn find_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| {
                order
                    .order_date
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn search(&self, keyword: &str) -> Result<Vec<Order>, OrderError> {
        let needle = keyword.to_lowercase();
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| {
                order.order_number.to_lowercase().contains(&needle)
                    || contains_keyword(order.shipping_address.as_deref(), &needle)
                    || contains_keyword(order.notes.as_deref(), &needle)
            })
            .cloned()
            .collect())
    }

    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderError> {
        let table = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    fn count_by_status(&self, status: OrderStatus) -> Result<u64, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| order.status == status)
            .count() as u64)
    }

    fn total_revenue_by_status(&self, statuses: &[OrderStatus]) -> Result<Decimal, OrderError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|order| statuses.contains(&order.status))
            .filter_map(|order| order.total_amount)
            .sum())
    }

    fn save(&self, mut order: Order) -> Result<Order, OrderError> {
        let mut table = self.write()?;
        if order.id == UNSAVED {
            table.next_id += 1;
            order.id = table.next_id;
        }
        for item in &mut order.items {
            item.order_id = order.id;
            if item.id == UNSAVED {
                table.next_item_id += 1;
                item.id = table.next_item_id;
            }
        }
        table.rows.insert(order.id, order.clone());
        Ok(order)
    }

    fn save_all(&self, orders: Vec<Order>) -> Result<Vec<Order>, OrderError> {
        orders.into_iter().map(|order| self.save(order)).collect()
    }

    fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}
