//! Outbound port for order persistence.

use pos_types::{CustomerId, OrderId, Timestamp};
use rust_decimal::Decimal;

use crate::domain::{Order, OrderError, OrderStatus};

/// Persistence required by the order lifecycle service.
///
/// `save` is insert-or-update: an order with id `0` gets a fresh id, and the
/// store also assigns ids to its unsaved line items. Query methods never fail
/// on "no match"; they return empty results.
pub trait OrderStore: Send + Sync {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError>;

    fn find_by_number(&self, number: &str) -> Result<Option<Order>, OrderError>;

    fn exists_by_number(&self, number: &str) -> Result<bool, OrderError>;

    fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError>;

    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;

    fn find_by_date_range(&self, start: Timestamp, end: Timestamp)
        -> Result<Vec<Order>, OrderError>;

    /// Case-insensitive substring match over order number, shipping address
    /// and notes.
    fn search(&self, keyword: &str) -> Result<Vec<Order>, OrderError>;

    /// Resolves the orders that exist; unknown ids are silently dropped.
    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderError>;

    fn count_by_status(&self, status: OrderStatus) -> Result<u64, OrderError>;

    /// Sum of `total_amount` over orders whose status is in `statuses`.
    fn total_revenue_by_status(&self, statuses: &[OrderStatus]) -> Result<Decimal, OrderError>;

    fn save(&self, order: Order) -> Result<Order, OrderError>;

    fn save_all(&self, orders: Vec<Order>) -> Result<Vec<Order>, OrderError>;

    fn delete(&self, id: OrderId) -> Result<(), OrderError>;
}
