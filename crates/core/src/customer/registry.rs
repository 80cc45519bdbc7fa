//! Customer registry: insert-or-replace, classification and the blocked gate.
//!
//! The registry operates on the full customer collection as loaded from the
//! record store. Callers persist the collection afterwards.

use aqsat_shared::types::CustomerId;

use super::error::CustomerError;
use super::types::{Customer, CustomerStatus, NewCustomer};

/// Stateless service for customer records.
pub struct CustomerRegistry;

impl CustomerRegistry {
    /// Insert a customer if its id is unseen, otherwise replace the stored
    /// record wholesale (no field merge).
    ///
    /// Returns `true` when the customer was newly inserted.
    pub fn upsert(customers: &mut Vec<Customer>, customer: Customer) -> bool {
        match customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => {
                *existing = customer;
                false
            }
            None => {
                customers.push(customer);
                true
            }
        }
    }

    /// Look up a customer by id.
    #[must_use]
    pub fn find(customers: &[Customer], id: CustomerId) -> Option<&Customer> {
        customers.iter().find(|c| c.id == id)
    }

    /// Build a customer record from contact details entered with a plan.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` or `MissingPhone` when a required field is blank.
    pub fn register(details: NewCustomer) -> Result<Customer, CustomerError> {
        if details.name.trim().is_empty() {
            return Err(CustomerError::MissingName);
        }
        if details.phone.trim().is_empty() {
            return Err(CustomerError::MissingPhone);
        }

        Ok(Customer {
            id: CustomerId::new(),
            name: details.name,
            phone: details.phone,
            national_id: details.national_id,
            status: Some(CustomerStatus::Average),
            feedback: None,
        })
    }

    /// Set tier and feedback on an existing customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no customer has the given id.
    pub fn classify(
        customers: &mut [Customer],
        id: CustomerId,
        status: CustomerStatus,
        feedback: Option<String>,
    ) -> Result<Customer, CustomerError> {
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CustomerError::NotFound(id))?;

        customer.status = Some(status);
        customer.feedback = feedback.filter(|f| !f.trim().is_empty());

        Ok(customer.clone())
    }

    /// Whether the caller must obtain explicit confirmation before starting
    /// a new plan for this customer.
    #[must_use]
    pub fn requires_confirmation(customer: &Customer) -> bool {
        customer.tier() == CustomerStatus::Blocked
    }
}
