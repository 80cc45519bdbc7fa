//! Per-month payment summary of a plan.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::InstallmentPlan;

/// Payments of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// `YYYY-MM` label.
    pub month: String,
    /// Number of payments in the month.
    pub count: usize,
    /// Sum paid.
    pub total: Decimal,
    /// Average per payment.
    pub average: Decimal,
}

/// Group a plan's payments by year-month, sorted chronologically.
#[must_use]
pub fn monthly_summary(plan: &InstallmentPlan) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for payment in &plan.payments {
        let entry = groups
            .entry(payment.date.format("%Y-%m").to_string())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(payment.amount);
    }

    groups
        .into_iter()
        .map(|(month, (count, total))| MonthlySummary {
            month,
            count,
            total,
            average: total / Decimal::from(count),
        })
        .collect()
}
