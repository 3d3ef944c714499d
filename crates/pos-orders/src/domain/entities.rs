//! Order entities and the status state machine.

use pos_types::{CustomerId, OrderId, OrderItemId, ProductId, Timestamp, UNSAVED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment-status marker set by successful payment processing.
pub const PAYMENT_STATUS_PAID: &str = "PAID";

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, for exhaustive transition checks.
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether the general transition table allows `self → next`.
    /// A same-state transition is always allowed (no-op).
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Processing)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Processing, Self::Shipped)
                | (Self::Processing, Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }

    /// Delivered and Cancelled admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// One order line. Owned exclusively by its order; deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Store-assigned id (`0` until first save).
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount_amount: Decimal,
    /// Derived: `unit_price × quantity − discount_amount`.
    pub total_price: Decimal,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: i64, unit_price: Decimal) -> Self {
        let mut item = Self {
            id: UNSAVED,
            order_id: UNSAVED,
            product_id,
            quantity,
            unit_price,
            discount_amount: Decimal::ZERO,
            total_price: Decimal::ZERO,
        };
        item.recompute_total();
        item
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount_amount = discount;
        self.recompute_total();
        self
    }

    /// Line total: `unit_price × quantity − discount`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity) - self.discount_amount
    }

    /// Refreshes the derived `total_price` field.
    pub fn recompute_total(&mut self) {
        self.total_price = self.line_total();
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned id (`0` until first save).
    pub id: OrderId,
    /// Unique business code. Empty on a draft means "generate one".
    pub order_number: String,
    pub customer_id: Option<CustomerId>,
    pub status: OrderStatus,
    /// Defaulted to now on create when unset.
    pub order_date: Option<Timestamp>,
    pub shipping_address: Option<String>,
    pub shipping_fee: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub paid_amount: Decimal,
    /// Derived from items + fees − discount on create when unset.
    pub total_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
    pub delivery_date: Option<Timestamp>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// New order draft with defaults applied: Pending, nothing paid, order
    /// number and total left for the manager to fill in.
    pub fn new(customer_id: Option<CustomerId>) -> Self {
        Self {
            id: UNSAVED,
            order_number: String::new(),
            customer_id,
            status: OrderStatus::Pending,
            order_date: None,
            shipping_address: None,
            shipping_fee: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            total_amount: None,
            payment_method: None,
            payment_status: None,
            notes: None,
            delivery_date: None,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Order total derived from the line items plus fees minus discount.
    pub fn computed_total(&self) -> Decimal {
        let items_total: Decimal = self.items.iter().map(OrderItem::line_total).sum();
        items_total + self.shipping_fee + self.tax_amount - self.discount_amount
    }
}

/// Replacement values for an order update. The order number and status are
/// never touched by a plain update; status changes go through the
/// transition-checked paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_id: Option<CustomerId>,
    pub items: Vec<OrderItem>,
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub shipping_fee: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub paid_amount: Decimal,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
}

impl From<&Order> for OrderUpdate {
    fn from(order: &Order) -> Self {
        Self {
            customer_id: order.customer_id,
            items: order.items.clone(),
            total_amount: order.total_amount,
            shipping_address: order.shipping_address.clone(),
            shipping_fee: order.shipping_fee,
            tax_amount: order.tax_amount,
            discount_amount: order.discount_amount,
            paid_amount: order.paid_amount,
            payment_method: order.payment_method.clone(),
            payment_status: order.payment_status.clone(),
            notes: order.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transition_table_exhaustive() {
        use OrderStatus::*;

        let allowed = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Processing),
            (Confirmed, Cancelled),
            (Processing, Shipped),
            (Processing, Cancelled),
            (Shipped, Delivered),
        ];

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = from == to || allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_line_total_subtracts_discount() {
        let item = OrderItem::new(1, 3, dec!(10)).with_discount(dec!(2));
        assert_eq!(item.line_total(), dec!(28));
        assert_eq!(item.total_price, dec!(28));
    }

    #[test]
    fn test_computed_total_includes_fees_and_discount() {
        let mut order = Order::new(None)
            .with_item(OrderItem::new(1, 2, dec!(100)))
            .with_item(OrderItem::new(2, 1, dec!(50)).with_discount(dec!(5)));
        order.shipping_fee = dec!(10);
        order.tax_amount = dec!(4);
        order.discount_amount = dec!(9);

        // (200 + 45) + 10 + 4 - 9
        assert_eq!(order.computed_total(), dec!(250));
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
    }
}
