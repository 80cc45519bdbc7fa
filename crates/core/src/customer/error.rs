//! Customer error types.

use aqsat_shared::types::CustomerId;
use thiserror::Error;

/// Customer-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// A new customer needs a name.
    #[error("Customer name is required")]
    MissingName,

    /// A new customer needs a phone number.
    #[error("Customer phone is required")]
    MissingPhone,
}

impl CustomerError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::MissingName => "CUSTOMER_NAME_REQUIRED",
            Self::MissingPhone => "CUSTOMER_PHONE_REQUIRED",
        }
    }
}
