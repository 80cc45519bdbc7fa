//! Installment plan domain types.

use std::fmt;

use aqsat_shared::types::{CustomerId, PaymentId, PlanId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::PlanInputs;
use crate::customer::{Customer, NewCustomer};
use crate::treasury::{SafeType, Transaction};

/// Plan status.
///
/// Only `Active` and `Paid` are ever produced. `Overdue` is accepted on load
/// and kept on save, nothing derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Balance still outstanding.
    #[default]
    Active,
    /// Nothing left to pay.
    Paid,
    /// Reserved.
    Overdue,
}

impl PlanStatus {
    /// Status implied by a remaining balance.
    #[must_use]
    pub fn for_balance(remaining: Decimal) -> Self {
        if remaining <= Decimal::ZERO {
            Self::Paid
        } else {
            Self::Active
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment received against a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Date received.
    pub date: NaiveDate,
    /// Amount received.
    pub amount: Decimal,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Safe the payment was deposited into. Unset on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_type: Option<SafeType>,
}

impl Payment {
    /// Safe the payment counts against, treating unset as cash.
    #[must_use]
    pub fn safe(&self) -> SafeType {
        self.safe_type.unwrap_or_default()
    }
}

/// An installment plan.
///
/// The pricing figures are computed once at creation and stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlan {
    /// Unique identifier.
    pub id: PlanId,
    /// Customer the plan belongs to.
    pub customer_id: CustomerId,
    /// Customer name at creation time.
    pub customer_name: String,
    /// Product label.
    pub product_name: String,
    /// Purchase price.
    pub base_price: Decimal,
    /// Seller markup in percent.
    pub seller_percentage: Decimal,
    /// Customer markup in percent.
    pub customer_percentage: Decimal,
    /// What the intermediary pays in total.
    pub total_cost_to_intermediary: Decimal,
    /// What the customer pays in total.
    pub total_price_to_customer: Decimal,
    /// Intermediary profit.
    pub intermediary_profit: Decimal,
    /// Amount paid up front.
    pub down_payment: Decimal,
    /// Term in months.
    pub months: i32,
    /// Monthly installment.
    pub monthly_installment: Decimal,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Start date plus the term.
    pub due_date: NaiveDate,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Advisory text attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
    /// Payments in the order they were received.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// What the customer still owes.
    pub remaining_balance: Decimal,
    /// Current status.
    pub status: PlanStatus,
}

impl InstallmentPlan {
    /// Amount collected so far, down payment included.
    #[must_use]
    pub fn amount_paid(&self) -> Decimal {
        self.total_price_to_customer.saturating_sub(self.remaining_balance)
    }

    /// Sum of the recorded payments (down payment excluded).
    #[must_use]
    pub fn payments_total(&self) -> Decimal {
        self.payments
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.amount))
    }

    /// Returns true if the plan is marked paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == PlanStatus::Paid
    }
}

/// Who a new plan is for.
#[derive(Debug, Clone)]
pub enum CustomerSelection {
    /// A customer already in the registry.
    Existing(CustomerId),
    /// A new customer entered together with the plan.
    New(NewCustomer),
}

/// Input for creating a plan.
#[derive(Debug, Clone)]
pub struct CreatePlanInput {
    /// Customer the plan is for.
    pub customer: CustomerSelection,
    /// Product label.
    pub product_name: String,
    /// Pricing inputs.
    pub inputs: PlanInputs,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Safe the purchase is paid from.
    pub purchase_safe: SafeType,
    /// Safe the down payment goes into.
    pub down_payment_safe: SafeType,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Advisory text, if it arrived before commit.
    pub ai_analysis: Option<String>,
}

/// Result of creating a plan: the plan plus the records that go with it.
#[derive(Debug, Clone)]
pub struct PlanCreation {
    /// The new plan.
    pub plan: InstallmentPlan,
    /// Customer registered alongside the plan, if a new one was entered.
    pub new_customer: Option<Customer>,
    /// Purchase-cost expense.
    pub purchase: Transaction,
    /// Down-payment deposit, when the down payment is positive.
    pub down_payment: Option<Transaction>,
}

impl PlanCreation {
    /// Seed transactions in the order they are prepended to the ledger.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        std::iter::once(&self.purchase).chain(self.down_payment.as_ref())
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Amount received.
    pub amount: Decimal,
    /// Optional notes.
    pub notes: Option<String>,
    /// Date received.
    pub date: NaiveDate,
    /// Safe the payment goes into.
    pub safe: SafeType,
}

/// Result of a payment deletion.
#[derive(Debug, Clone)]
pub struct PaymentReversal {
    /// The payment removed from the plan.
    pub payment: Payment,
    /// Expense offsetting the original deposit.
    pub correction: Transaction,
}

/// A payment with its position in the plan's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    /// 1-based position in the payment list.
    pub ordinal: u32,
    /// Notional due date: start date plus `ordinal` months.
    pub due_date: Option<NaiveDate>,
    /// The payment.
    pub payment: Payment,
}

/// Filter for plan listings.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Case-insensitive substring of the customer name.
    pub search: Option<String>,
    /// Restrict to one status.
    pub status: Option<PlanStatus>,
}

impl PlanFilter {
    /// Returns true if the plan passes the filter.
    #[must_use]
    pub fn matches(&self, plan: &InstallmentPlan) -> bool {
        let name_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => plan
                .customer_name
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };
        name_ok && self.status.is_none_or(|status| plan.status == status)
    }
}
