//! Session error types.

use aqsat_core::customer::CustomerError;
use aqsat_core::plan::PlanError;
use aqsat_core::treasury::TreasuryError;
use thiserror::Error;

use crate::error::StorageError;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Plan validation rejection.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Customer validation rejection.
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// Treasury validation rejection.
    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    /// Record store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Returns true for validation rejections, which leave all collections
    /// untouched and carry a message meant for the user.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Plan(e) => e.error_code(),
            Self::Customer(e) => e.error_code(),
            Self::Treasury(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
