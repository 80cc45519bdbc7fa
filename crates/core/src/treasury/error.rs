//! Treasury error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Treasury-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreasuryError {
    /// Manual entries must move a positive amount.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
}

impl TreasuryError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
        }
    }
}
