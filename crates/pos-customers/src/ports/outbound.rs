//! Outbound ports for customer persistence and the order directory.

use pos_types::CustomerId;

use crate::domain::{Customer, CustomerError};

/// Persistence required by the customer account service.
///
/// `save` is insert-or-update: a customer with id `0` gets a fresh id.
/// Query methods never fail on "no match"; they return `None` or empty
/// results.
pub trait CustomerStore: Send + Sync {
    fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError>;

    fn find_by_code(&self, code: &str) -> Result<Option<Customer>, CustomerError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError>;

    fn exists_by_code(&self, code: &str) -> Result<bool, CustomerError>;

    fn exists_by_email(&self, email: &str) -> Result<bool, CustomerError>;

    fn find_all(&self) -> Result<Vec<Customer>, CustomerError>;

    fn find_active(&self) -> Result<Vec<Customer>, CustomerError>;

    /// Case-insensitive substring match over name, code, email and phone.
    fn search(&self, keyword: &str) -> Result<Vec<Customer>, CustomerError>;

    /// Customers holding at least `min` loyalty points.
    fn find_with_min_points(&self, min: i64) -> Result<Vec<Customer>, CustomerError>;

    /// Resolves the customers that exist; unknown ids are silently dropped.
    fn find_by_ids(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, CustomerError>;

    fn save(&self, customer: Customer) -> Result<Customer, CustomerError>;

    fn save_all(&self, customers: Vec<Customer>) -> Result<Vec<Customer>, CustomerError>;

    fn delete(&self, id: CustomerId) -> Result<(), CustomerError>;
}

/// What the customer service needs to know about orders. The order
/// subsystem implements this at composition time.
pub trait OrderDirectory: Send + Sync {
    /// Number of orders referencing the customer.
    fn count_by_customer(&self, customer_id: CustomerId) -> Result<u64, CustomerError>;
}

#[cfg(test)]
pub use mock::MockOrderDirectory;

#[cfg(test)]
mod mock {
    use std::collections::BTreeMap;

    use super::*;

    /// Canned order counts for unit tests.
    #[derive(Debug, Default)]
    pub struct MockOrderDirectory {
        counts: BTreeMap<CustomerId, u64>,
    }

    impl MockOrderDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_orders(mut self, customer_id: CustomerId, count: u64) -> Self {
            self.counts.insert(customer_id, count);
            self
        }
    }

    impl OrderDirectory for MockOrderDirectory {
        fn count_by_customer(&self, customer_id: CustomerId) -> Result<u64, CustomerError> {
            Ok(self.counts.get(&customer_id).copied().unwrap_or(0))
        }
    }
}
