//! In-memory customer store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pos_types::{CustomerId, UNSAVED};

use crate::domain::{Customer, CustomerError};
use crate::ports::CustomerStore;

/// In-memory `CustomerStore` with sequential id assignment.
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    inner: RwLock<CustomerTable>,
}

#[derive(Debug, Default)]
struct CustomerTable {
    next_id: CustomerId,
    rows: BTreeMap<CustomerId, Customer>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CustomerTable>, CustomerError> {
        self.inner
            .read()
            .map_err(|_| CustomerError::Store("customer store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CustomerTable>, CustomerError> {
        self.inner
            .write()
            .map_err(|_| CustomerError::Store("customer store lock poisoned".into()))
    }
}

fn contains_keyword(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

impl CustomerStore for MemoryCustomerStore {
    fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_by_code(&self, code: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|customer| customer.customer_code == code)
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|customer| customer.email.as_deref() == Some(email))
            .cloned())
    }

    fn exists_by_code(&self, code: &str) -> Result<bool, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .any(|customer| customer.customer_code == code))
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .any(|customer| customer.email.as_deref() == Some(email)))
    }

    fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn find_active(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|customer| customer.active)
            .cloned()
            .collect())
    }

    fn search(&self, keyword: &str) -> Result<Vec<Customer>, CustomerError> {
        let needle = keyword.to_lowercase();
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|customer| {
                customer.name.to_lowercase().contains(&needle)
                    || customer.customer_code.to_lowercase().contains(&needle)
                    || contains_keyword(customer.email.as_deref(), &needle)
                    || contains_keyword(customer.phone.as_deref(), &needle)
            })
            .cloned()
            .collect())
    }

    fn find_with_min_points(&self, min: i64) -> Result<Vec<Customer>, CustomerError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|customer| customer.loyalty_points >= min)
            .cloned()
            .collect())
    }

    fn find_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, CustomerError> {
        let table = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    fn save(&self, mut customer: Customer) -> Result<Customer, CustomerError> {
        let mut table = self.write()?;
        if customer.id == UNSAVED {
            table.next_id += 1;
            customer.id = table.next_id;
        }
        table.rows.insert(customer.id, customer.clone());
        Ok(customer)
    }

    fn save_all(&self, customers: Vec<Customer>) -> Result<Vec<Customer>, CustomerError> {
        customers
            .into_iter()
            .map(|customer| self.save(customer))
            .collect()
    }

    fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}
