//! Inventory movement entities.

use pos_types::{ProductId, Timestamp, TransactionId, UNSAVED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference-type tag for purchase stock-ins.
pub const REFERENCE_PURCHASE: &str = "PURCHASE";
/// Reference-type tag for sale stock-outs.
pub const REFERENCE_SALE: &str = "SALE";
/// Reference-type tag for manual adjustments.
pub const REFERENCE_ADJUSTMENT: &str = "ADJUSTMENT";
/// Reference-type tag for customer returns.
pub const REFERENCE_RETURN: &str = "RETURN";

/// Movement type. The sign of a movement is implied by its kind; the stored
/// quantity is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    In,
    Out,
    Adjustment,
    Return,
}

impl TransactionKind {
    /// Signed contribution of a movement of this kind to derived stock.
    ///
    /// `In` and `Return` add, `Out` subtracts. `Adjustment` quantities are
    /// stored as absolute values and fold into the increase side, so a
    /// decreasing adjustment cannot be represented distinctly — a documented
    /// limitation of this contract, not an oversight.
    pub fn stock_delta(self, quantity: i64) -> i64 {
        match self {
            Self::In | Self::Return | Self::Adjustment => quantity,
            Self::Out => -quantity,
        }
    }

    /// Whether movements of this kind count toward inventory valuation.
    /// Only inbound goods (purchases and returns) carry value.
    pub fn counts_toward_value(self) -> bool {
        matches!(self, Self::In | Self::Return)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Adjustment => "ADJUSTMENT",
            Self::Return => "RETURN",
        };
        f.write_str(s)
    }
}

/// One ledger entry recording a signed change to a product's stock.
///
/// Immutable in practice: once appended, only `total_cost` is ever
/// recomputed; kind and quantity never change after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    /// Store-assigned id (`0` until first save).
    pub id: TransactionId,
    pub product_id: ProductId,
    pub kind: TransactionKind,
    /// Magnitude only; the sign is implied by `kind`.
    pub quantity: i64,
    pub unit_cost: Option<Decimal>,
    /// Derived: `unit_cost × quantity`, recomputed on every create/update.
    pub total_cost: Option<Decimal>,
    /// Free-form linkage to the originating business event.
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub notes: Option<String>,
    pub transaction_date: Timestamp,
}

impl InventoryTransaction {
    /// New movement draft dated now.
    pub fn new(product_id: ProductId, kind: TransactionKind, quantity: i64) -> Self {
        Self {
            id: UNSAVED,
            product_id,
            kind,
            quantity,
            unit_cost: None,
            total_cost: None,
            reference_type: None,
            reference_id: None,
            notes: None,
            transaction_date: chrono::Utc::now(),
        }
    }

    /// Recomputes the derived `total_cost` field from `unit_cost × quantity`.
    pub fn recompute_total_cost(&mut self) {
        self.total_cost = self
            .unit_cost
            .map(|cost| cost * Decimal::from(self.quantity));
    }

    /// Signed contribution of this movement to derived stock.
    pub fn stock_delta(&self) -> i64 {
        self.kind.stock_delta(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_delta_signs() {
        assert_eq!(TransactionKind::In.stock_delta(5), 5);
        assert_eq!(TransactionKind::Return.stock_delta(5), 5);
        assert_eq!(TransactionKind::Adjustment.stock_delta(5), 5);
        assert_eq!(TransactionKind::Out.stock_delta(5), -5);
    }

    #[test]
    fn test_valuation_excludes_out_and_adjustment() {
        assert!(TransactionKind::In.counts_toward_value());
        assert!(TransactionKind::Return.counts_toward_value());
        assert!(!TransactionKind::Out.counts_toward_value());
        assert!(!TransactionKind::Adjustment.counts_toward_value());
    }

    #[test]
    fn test_recompute_total_cost() {
        let mut tx = InventoryTransaction::new(1, TransactionKind::In, 4);
        tx.unit_cost = Some(dec!(2.50));
        tx.recompute_total_cost();
        assert_eq!(tx.total_cost, Some(dec!(10.00)));

        tx.unit_cost = None;
        tx.recompute_total_cost();
        assert_eq!(tx.total_cost, None);
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&TransactionKind::Adjustment).unwrap();
        assert_eq!(json, "\"ADJUSTMENT\"");
    }
}
