//! Portfolio-wide figures over all plans.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{InstallmentPlan, PlanStatus};

/// Aggregate figures over a plan collection. Recomputed on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Number of plans.
    pub plan_count: usize,
    /// Number of plans still active.
    pub active_plans: usize,
    /// Sum of intermediary profit.
    pub total_profit: Decimal,
    /// Sum of customer prices.
    pub total_revenue: Decimal,
    /// Sum of remaining balances.
    pub total_receivables: Decimal,
}

impl PortfolioStats {
    /// Fold a plan collection.
    #[must_use]
    pub fn compute(plans: &[InstallmentPlan]) -> Self {
        plans.iter().fold(Self::default(), |mut acc, plan| {
            acc.plan_count += 1;
            if plan.status == PlanStatus::Active {
                acc.active_plans += 1;
            }
            acc.total_profit = acc.total_profit.saturating_add(plan.intermediary_profit);
            acc.total_revenue = acc.total_revenue.saturating_add(plan.total_price_to_customer);
            acc.total_receivables = acc.total_receivables.saturating_add(plan.remaining_balance);
            acc
        })
    }
}
