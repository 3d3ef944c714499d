//! Order lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use pos_idgen::{CodeGenerator, MAX_GENERATION_ATTEMPTS};
use pos_types::{CustomerId, OrderId, Timestamp};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::entities::{Order, OrderStatus, OrderUpdate, PAYMENT_STATUS_PAID};
use crate::domain::errors::OrderError;
use crate::ports::OrderStore;

/// Order lifecycle service: creation, totals, status transitions, payment.
pub struct OrderManager<S: OrderStore> {
    orders: Arc<S>,
    codes: Arc<CodeGenerator>,
}

impl<S: OrderStore> OrderManager<S> {
    pub fn new(orders: Arc<S>) -> Self {
        Self::with_generator(orders, Arc::new(CodeGenerator::new()))
    }

    /// Shares a code generator with other services so sequences stay global.
    pub fn with_generator(orders: Arc<S>, codes: Arc<CodeGenerator>) -> Self {
        Self { orders, codes }
    }

    /// Creates a new order. Line items must have positive quantities; their
    /// totals are recomputed from unit price and discount regardless of what
    /// the caller filled in. An empty order number gets a generated one, a
    /// caller-supplied one must be unique. The status always starts Pending.
    pub fn create(&self, mut order: Order) -> Result<Order, OrderError> {
        if order.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for item in &mut order.items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(item.quantity));
            }
            item.recompute_total();
        }

        if order.order_number.is_empty() {
            order.order_number = self.unique_order_number()?;
        } else if self.orders.exists_by_number(&order.order_number)? {
            return Err(OrderError::DuplicateOrderNumber(order.order_number));
        }

        order.status = OrderStatus::Pending;
        if order.order_date.is_none() {
            order.order_date = Some(Utc::now());
        }
        if order.total_amount.is_none() {
            order.total_amount = Some(order.computed_total());
        }

        let saved = self.orders.save(order)?;
        info!(
            order_id = saved.id,
            order_number = %saved.order_number,
            total = %saved.total_amount.unwrap_or_default(),
            "order created"
        );
        Ok(saved)
    }

    /// Replaces the mutable fields of an order. The order number and status
    /// are immutable here; status changes go through `update_status`,
    /// `process_payment` or `cancel`.
    pub fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        let mut order = self.get(id)?;

        let mut items = update.items;
        for item in &mut items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(item.quantity));
            }
            item.order_id = order.id;
            item.recompute_total();
        }

        order.customer_id = update.customer_id;
        order.items = items;
        order.shipping_address = update.shipping_address;
        order.shipping_fee = update.shipping_fee;
        order.tax_amount = update.tax_amount;
        order.discount_amount = update.discount_amount;
        order.paid_amount = update.paid_amount;
        order.payment_method = update.payment_method;
        order.payment_status = update.payment_status;
        order.notes = update.notes;
        order.total_amount = Some(
            update
                .total_amount
                .unwrap_or_else(|| order.computed_total()),
        );

        self.orders.save(order)
    }

    /// Deletes an order. Only Pending orders may be deleted.
    pub fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        let order = self.get(id)?;
        if order.status != OrderStatus::Pending {
            return Err(OrderError::DeleteForbidden(order.status));
        }
        self.orders.delete(id)?;
        info!(order_id = id, order_number = %order.order_number, "order deleted");
        Ok(())
    }

    /// Moves an order to `next` per the transition table. A same-state
    /// request succeeds without writing anything.
    pub fn update_status(&self, id: OrderId, next: OrderStatus) -> Result<Order, OrderError> {
        let mut order = self.get(id)?;
        if order.status == next {
            return Ok(order);
        }
        if !order.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        let from = order.status;
        order.status = next;
        if next == OrderStatus::Delivered && order.delivery_date.is_none() {
            order.delivery_date = Some(Utc::now());
        }

        let saved = self.orders.save(order)?;
        info!(order_id = id, %from, to = %next, "order status changed");
        Ok(saved)
    }

    /// Accepts payment for a Pending order. The amount must equal the order
    /// total exactly. On success the order is marked paid and Confirmed in
    /// one step; on any failure the order is untouched.
    pub fn process_payment(
        &self,
        id: OrderId,
        amount: Decimal,
        method: &str,
    ) -> Result<Order, OrderError> {
        let mut order = self.get(id)?;
        if order.status != OrderStatus::Pending {
            return Err(OrderError::PaymentNotPending(order.status));
        }
        let expected = order.total_amount.unwrap_or_else(|| order.computed_total());
        if amount != expected {
            return Err(OrderError::AmountMismatch {
                expected,
                actual: amount,
            });
        }

        order.payment_method = Some(method.to_string());
        order.paid_amount = amount;
        order.payment_status = Some(PAYMENT_STATUS_PAID.to_string());
        order.status = OrderStatus::Confirmed;

        let saved = self.orders.save(order)?;
        info!(order_id = id, %amount, method, "payment processed");
        Ok(saved)
    }

    /// Cancels an order with a reason. This deliberately bypasses the
    /// transition table: any non-terminal order can be cancelled, including
    /// Shipped ones. Delivered and already-cancelled orders are rejected.
    pub fn cancel(&self, id: OrderId, reason: &str) -> Result<Order, OrderError> {
        let mut order = self.get(id)?;
        if order.status.is_terminal() {
            return Err(OrderError::CancelForbidden(order.status));
        }

        let from = order.status;
        order.status = OrderStatus::Cancelled;
        order.notes = Some(reason.to_string());

        let saved = self.orders.save(order)?;
        info!(order_id = id, %from, reason, "order cancelled");
        Ok(saved)
    }

    /// Moves every resolved order to `next`. Ids that match no order are
    /// skipped. All transitions are validated before any order is written,
    /// so one bad order aborts the whole batch.
    pub fn bulk_update_status(
        &self,
        ids: &[OrderId],
        next: OrderStatus,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.orders.find_by_ids(ids)?;

        for order in &orders {
            if order.status != next && !order.status.can_transition_to(next) {
                return Err(OrderError::InvalidTransition {
                    from: order.status,
                    to: next,
                });
            }
        }
        for order in &mut orders {
            order.status = next;
        }

        let saved = self.orders.save_all(orders)?;
        info!(count = saved.len(), to = %next, "bulk status update");
        Ok(saved)
    }

    /// Recomputes the order total from its items and fees.
    pub fn calculate_total(&self, id: OrderId) -> Result<Decimal, OrderError> {
        Ok(self.get(id)?.computed_total())
    }

    /// Records shipping details: the tracking number and estimate land in
    /// the notes, the estimate also becomes the delivery date.
    pub fn update_shipping_info(
        &self,
        id: OrderId,
        tracking_number: &str,
        estimated_delivery: Timestamp,
    ) -> Result<Order, OrderError> {
        let mut order = self.get(id)?;
        order.notes = Some(format!(
            "Tracking: {tracking_number}, estimated delivery: {estimated_delivery}"
        ));
        order.delivery_date = Some(estimated_delivery);
        self.orders.save(order)
    }

    pub fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.find_by_id(id)?.ok_or(OrderError::NotFound)
    }

    pub fn get_by_number(&self, number: &str) -> Result<Order, OrderError> {
        self.orders
            .find_by_number(number)?
            .ok_or(OrderError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.find_all()
    }

    pub fn by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        self.orders.find_by_customer(customer_id)
    }

    pub fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.orders.find_by_status(status)
    }

    pub fn by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Order>, OrderError> {
        self.orders.find_by_date_range(start, end)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Order>, OrderError> {
        self.orders.search(keyword)
    }

    pub fn count_by_status(&self, status: OrderStatus) -> Result<u64, OrderError> {
        self.orders.count_by_status(status)
    }

    pub fn exists_by_number(&self, number: &str) -> Result<bool, OrderError> {
        self.orders.exists_by_number(number)
    }

    /// Revenue summed over the orders in the given statuses.
    pub fn revenue(&self, statuses: &[OrderStatus]) -> Result<Decimal, OrderError> {
        self.orders.total_revenue_by_status(statuses)
    }

    fn unique_order_number(&self) -> Result<String, OrderError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.codes.order_number();
            if !self.orders.exists_by_number(&candidate)? {
                return Ok(candidate);
            }
        }
        Err(OrderError::ExhaustedRetries {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
