//! Plan lifecycle error types.

use aqsat_shared::types::PlanId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::customer::CustomerError;

/// Plan-related errors.
///
/// Every variant is a validation rejection: the operation that produced it
/// left the plan and the treasury untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Plan not found.
    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    /// The plan is fully paid and accepts no further payments.
    #[error("Plan {0} is already fully paid")]
    PlanAlreadyPaid(PlanId),

    /// Payment amount must be positive.
    #[error("Payment amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// Payment larger than what the customer still owes.
    #[error("Payment of {amount} exceeds the remaining balance of {remaining}")]
    ExceedsRemainingBalance {
        /// Requested amount.
        amount: Decimal,
        /// Current remaining balance.
        remaining: Decimal,
    },

    /// Start date plus term is not a representable date.
    #[error("Due date is out of range")]
    DueDateOutOfRange,

    /// Plan figures fall outside the representable amount range.
    #[error("Plan amounts are out of range")]
    AmountOutOfRange,

    /// Customer could not be resolved or registered.
    #[error(transparent)]
    Customer(#[from] CustomerError),
}

impl PlanError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PlanNotFound(_) => "PLAN_NOT_FOUND",
            Self::PlanAlreadyPaid(_) => "PLAN_ALREADY_PAID",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ExceedsRemainingBalance { .. } => "EXCEEDS_REMAINING_BALANCE",
            Self::DueDateOutOfRange => "DUE_DATE_OUT_OF_RANGE",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            Self::Customer(e) => e.error_code(),
        }
    }
}
