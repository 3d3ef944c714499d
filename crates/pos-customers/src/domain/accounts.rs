//! Customer account service.

use std::sync::Arc;

use pos_idgen::{CodeGenerator, MAX_GENERATION_ATTEMPTS};
use pos_types::CustomerId;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::entities::{Customer, CustomerUpdate};
use crate::domain::errors::CustomerError;
use crate::ports::{CustomerStore, OrderDirectory};

/// Customer account service: codes, loyalty points, credit line.
pub struct CustomerManager<S: CustomerStore, O: OrderDirectory> {
    customers: Arc<S>,
    orders: Arc<O>,
    codes: Arc<CodeGenerator>,
}

impl<S: CustomerStore, O: OrderDirectory> CustomerManager<S, O> {
    pub fn new(customers: Arc<S>, orders: Arc<O>) -> Self {
        Self::with_generator(customers, orders, Arc::new(CodeGenerator::new()))
    }

    /// Shares a code generator with other services so sequences stay global.
    pub fn with_generator(customers: Arc<S>, orders: Arc<O>, codes: Arc<CodeGenerator>) -> Self {
        Self {
            customers,
            orders,
            codes,
        }
    }

    /// Creates a customer. An empty customer code gets a generated one, a
    /// caller-supplied one must be unique. The email must be unique when
    /// present and the credit limit non-negative.
    pub fn create(&self, mut customer: Customer) -> Result<Customer, CustomerError> {
        if customer.credit_limit < Decimal::ZERO {
            return Err(CustomerError::NegativeCreditLimit(customer.credit_limit));
        }
        if let Some(email) = &customer.email {
            if self.customers.exists_by_email(email)? {
                return Err(CustomerError::DuplicateEmail(email.clone()));
            }
        }

        if customer.customer_code.is_empty() {
            customer.customer_code = self.unique_customer_code()?;
        } else if self.customers.exists_by_code(&customer.customer_code)? {
            return Err(CustomerError::DuplicateCode(customer.customer_code));
        }

        let saved = self.customers.save(customer)?;
        info!(
            customer_id = saved.id,
            customer_code = %saved.customer_code,
            "customer created"
        );
        Ok(saved)
    }

    /// Replaces the mutable fields of a customer. The code is immutable;
    /// loyalty points and the balance change through their own operations.
    pub fn update(&self, id: CustomerId, update: CustomerUpdate) -> Result<Customer, CustomerError> {
        let mut customer = self.get(id)?;

        if update.credit_limit < Decimal::ZERO {
            return Err(CustomerError::NegativeCreditLimit(update.credit_limit));
        }
        if let Some(email) = &update.email {
            if let Some(owner) = self.customers.find_by_email(email)? {
                if owner.id != id {
                    return Err(CustomerError::DuplicateEmail(email.clone()));
                }
            }
        }

        customer.name = update.name;
        customer.email = update.email;
        customer.phone = update.phone;
        customer.address = update.address;
        customer.credit_limit = update.credit_limit;
        customer.notes = update.notes;

        self.customers.save(customer)
    }

    /// Deletes a customer, refused while any order references them.
    pub fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        let customer = self.get(id)?;
        let count = self.orders.count_by_customer(id)?;
        if count > 0 {
            return Err(CustomerError::HasOrders { id, count });
        }
        self.customers.delete(id)?;
        info!(customer_id = id, customer_code = %customer.customer_code, "customer deleted");
        Ok(())
    }

    /// Adds loyalty points. The amount must be strictly positive.
    pub fn add_points(&self, id: CustomerId, points: i64) -> Result<Customer, CustomerError> {
        if points <= 0 {
            return Err(CustomerError::InvalidPoints(points));
        }
        let mut customer = self.get(id)?;
        customer.loyalty_points += points;
        let saved = self.customers.save(customer)?;
        info!(customer_id = id, points, balance = saved.loyalty_points, "points added");
        Ok(saved)
    }

    /// Redeems loyalty points. Fails if the balance does not cover them.
    pub fn redeem_points(&self, id: CustomerId, points: i64) -> Result<Customer, CustomerError> {
        if points <= 0 {
            return Err(CustomerError::InvalidPoints(points));
        }
        let mut customer = self.get(id)?;
        if points > customer.loyalty_points {
            return Err(CustomerError::InsufficientPoints {
                requested: points,
                available: customer.loyalty_points,
            });
        }
        customer.loyalty_points -= points;
        let saved = self.customers.save(customer)?;
        info!(customer_id = id, points, balance = saved.loyalty_points, "points redeemed");
        Ok(saved)
    }

    pub fn set_credit_limit(
        &self,
        id: CustomerId,
        limit: Decimal,
    ) -> Result<Customer, CustomerError> {
        if limit < Decimal::ZERO {
            return Err(CustomerError::NegativeCreditLimit(limit));
        }
        let mut customer = self.get(id)?;
        customer.credit_limit = limit;
        self.customers.save(customer)
    }

    /// Sets the outstanding balance directly, e.g. after a payment or a new
    /// credit sale.
    pub fn set_balance(&self, id: CustomerId, balance: Decimal) -> Result<Customer, CustomerError> {
        let mut customer = self.get(id)?;
        customer.current_balance = balance;
        self.customers.save(customer)
    }

    /// Whether a further `amount` of credit fits under the customer's limit.
    pub fn has_sufficient_credit(
        &self,
        id: CustomerId,
        amount: Decimal,
    ) -> Result<bool, CustomerError> {
        Ok(amount <= self.get(id)?.available_credit())
    }

    /// The amount the customer currently owes.
    pub fn debt(&self, id: CustomerId) -> Result<Decimal, CustomerError> {
        Ok(self.get(id)?.current_balance)
    }

    pub fn set_active(&self, id: CustomerId, active: bool) -> Result<Customer, CustomerError> {
        let mut customer = self.get(id)?;
        customer.active = active;
        self.customers.save(customer)
    }

    pub fn update_contact_info(
        &self,
        id: CustomerId,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self.get(id)?;
        if let Some(email) = &email {
            if let Some(owner) = self.customers.find_by_email(email)? {
                if owner.id != id {
                    return Err(CustomerError::DuplicateEmail(email.clone()));
                }
            }
        }
        customer.email = email;
        customer.phone = phone;
        customer.address = address;
        self.customers.save(customer)
    }

    /// Activates or deactivates every resolved customer. Unknown ids are
    /// skipped.
    pub fn bulk_set_active(
        &self,
        ids: &[CustomerId],
        active: bool,
    ) -> Result<Vec<Customer>, CustomerError> {
        let mut customers = self.customers.find_by_ids(ids)?;
        for customer in &mut customers {
            customer.active = active;
        }
        let saved = self.customers.save_all(customers)?;
        info!(count = saved.len(), active, "bulk active update");
        Ok(saved)
    }

    pub fn get(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.customers.find_by_id(id)?.ok_or(CustomerError::NotFound)
    }

    pub fn get_by_code(&self, code: &str) -> Result<Customer, CustomerError> {
        self.customers
            .find_by_code(code)?
            .ok_or(CustomerError::NotFound)
    }

    pub fn get_by_email(&self, email: &str) -> Result<Customer, CustomerError> {
        self.customers
            .find_by_email(email)?
            .ok_or(CustomerError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        self.customers.find_all()
    }

    pub fn list_active(&self) -> Result<Vec<Customer>, CustomerError> {
        self.customers.find_active()
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Customer>, CustomerError> {
        self.customers.search(keyword)
    }

    /// Customers holding at least `min` loyalty points.
    pub fn with_loyalty_points(&self, min: i64) -> Result<Vec<Customer>, CustomerError> {
        self.customers.find_with_min_points(min)
    }

    /// Number of orders on file for the customer.
    pub fn order_count(&self, id: CustomerId) -> Result<u64, CustomerError> {
        self.get(id)?;
        self.orders.count_by_customer(id)
    }

    fn unique_customer_code(&self) -> Result<String, CustomerError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.codes.customer_code();
            if !self.customers.exists_by_code(&candidate)? {
                return Ok(candidate);
            }
        }
        Err(CustomerError::ExhaustedRetries {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
