//! Customer entity.

use pos_types::{CustomerId, UNSAVED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer account.
///
/// `current_balance` is the amount the customer owes; available credit is
/// `credit_limit - current_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned id (`0` until first save).
    pub id: CustomerId,
    /// Unique business code. Empty on a draft means "generate one".
    pub customer_code: String,
    pub name: String,
    /// Unique across customers when present.
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_points: i64,
    pub credit_limit: Decimal,
    pub current_balance: Decimal,
    pub active: bool,
    pub notes: Option<String>,
}

impl Customer {
    /// New active customer with zeroed balances and no code assigned yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED,
            customer_code: String::new(),
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            loyalty_points: 0,
            credit_limit: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            active: true,
            notes: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Credit still available under the limit.
    pub fn available_credit(&self) -> Decimal {
        self.credit_limit - self.current_balance
    }
}

/// Replacement values for a customer update. The customer code is immutable
/// once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Decimal,
    pub notes: Option<String>,
}

impl From<&Customer> for CustomerUpdate {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            credit_limit: customer.credit_limit,
            notes: customer.notes.clone(),
        }
    }
}
