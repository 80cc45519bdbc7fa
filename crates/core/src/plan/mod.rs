//! Installment plan lifecycle.
//!
//! This module implements:
//! - Plan creation with its purchase and down-payment transactions
//! - Payment add and delete, each mirrored into the treasury
//! - Status derived from the remaining balance (active or paid)
//! - Read views: payment schedule, monthly summary, portfolio figures
//!
//! Deleting a plan never touches the treasury. Transactions that pointed at
//! it keep their `relatedPlanId`, which then no longer resolves.

pub mod error;
pub mod portfolio;
pub mod service;
pub mod summary;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PlanError;
pub use portfolio::PortfolioStats;
pub use service::PlanService;
pub use summary::{MonthlySummary, monthly_summary};
pub use types::{
    CreatePlanInput, CustomerSelection, InstallmentPlan, Payment, PaymentInput, PaymentReversal,
    PlanCreation, PlanFilter, PlanStatus, ScheduledPayment,
};
