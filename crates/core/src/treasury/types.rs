//! Treasury domain types.
//!
//! A transaction is a single cash movement into or out of one of the three
//! safes. Balances are never stored; see `stats`.

use std::fmt;

use aqsat_shared::types::{PlanId, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category used for the purchase-cost expense recorded at plan creation.
pub const CATEGORY_PURCHASE: &str = "Purchase of goods";
/// Category used for the down-payment deposit recorded at plan creation.
pub const CATEGORY_DOWN_PAYMENT: &str = "Plan down payment";
/// Category used for deposits mirroring an installment payment.
pub const CATEGORY_COLLECTION: &str = "Installment collection";
/// Category used for expenses reversing a deleted payment.
pub const CATEGORY_PAYMENT_REVERSAL: &str = "Correction - payment deleted";
/// Fallback category for manual deposits.
pub const CATEGORY_MANUAL_DEPOSIT: &str = "Cash deposit";
/// Fallback category for manual expenses.
pub const CATEGORY_MANUAL_EXPENSE: &str = "General expenses";

/// The safe (cash box or account) a movement goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeType {
    /// Physical cash box. Default for records without a safe.
    #[default]
    Cash,
    /// Instant bank transfer account.
    Instapay,
    /// Mobile wallet.
    Wallet,
}

impl SafeType {
    /// All safes, in display order.
    pub const ALL: [Self; 3] = [Self::Cash, Self::Instapay, Self::Wallet];

    /// Returns the string representation of the safe.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Instapay => "instapay",
            Self::Wallet => "wallet",
        }
    }

    /// Parses a safe from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "instapay" => Some(Self::Instapay),
            "wallet" => Some(Self::Wallet),
            _ => None,
        }
    }
}

impl fmt::Display for SafeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Deposit,
    /// Money going out.
    Expense,
    /// Money taken out by the owner. Declared for compatibility, never produced.
    Withdrawal,
}

impl TransactionKind {
    /// Returns true for inflows.
    #[must_use]
    pub fn is_deposit(&self) -> bool {
        matches!(self, Self::Deposit)
    }
}

/// A treasury cash movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Date of the movement.
    pub date: NaiveDate,
    /// Amount moved.
    pub amount: Decimal,
    /// Direction.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-form category label.
    pub category: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plan this movement originated from. Lookup hint only: it is not
    /// guaranteed to resolve once the plan has been deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_plan_id: Option<PlanId>,
    /// Safe the money went through. Unset on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_type: Option<SafeType>,
}

impl Transaction {
    /// Creates a transaction with a fresh id.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        safe: SafeType,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            amount,
            kind,
            category: category.into(),
            description: None,
            related_plan_id: None,
            safe_type: Some(safe),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Link the transaction to the plan it came from.
    #[must_use]
    pub fn for_plan(mut self, plan_id: PlanId) -> Self {
        self.related_plan_id = Some(plan_id);
        self
    }

    /// Safe the transaction counts against, treating unset as cash.
    #[must_use]
    pub fn safe(&self) -> SafeType {
        self.safe_type.unwrap_or_default()
    }
}

/// User-entered treasury movement (outside any plan).
#[derive(Debug, Clone)]
pub struct ManualEntryInput {
    /// Deposit or expense.
    pub kind: TransactionKind,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Category; blank falls back to a default per direction.
    pub category: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Date of the movement.
    pub date: NaiveDate,
    /// Safe the money goes through.
    pub safe: SafeType,
}
