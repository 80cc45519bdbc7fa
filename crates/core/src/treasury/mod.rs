//! Multi-safe treasury ledger.
//!
//! This module implements the cash side of the business:
//! - Transaction records tagged with a safe and a direction
//! - Ledger add/delete on the full collection (newest first)
//! - Per-safe and aggregate balances, folded on every read
//! - Weak plan back-reference index

pub mod error;
pub mod index;
pub mod service;
pub mod stats;
pub mod types;

#[cfg(test)]
mod stats_props;

pub use error::TreasuryError;
pub use index::RelatedPlanIndex;
pub use service::{DirectionFilter, TransactionFilter, TreasuryService};
pub use stats::{SafeStats, TreasuryStats};
pub use types::{
    CATEGORY_COLLECTION, CATEGORY_DOWN_PAYMENT, CATEGORY_MANUAL_DEPOSIT, CATEGORY_MANUAL_EXPENSE,
    CATEGORY_PAYMENT_REVERSAL, CATEGORY_PURCHASE, ManualEntryInput, SafeType, Transaction,
    TransactionKind,
};
