//! Plan preview calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric inputs of a plan as entered by the user.
///
/// Any value is accepted, including negatives. Range checks are a caller
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInputs {
    /// Price the intermediary pays for the product.
    pub base_price: Decimal,
    /// Seller markup in percent (e.g. 30 for 30%).
    pub seller_percentage: Decimal,
    /// Customer markup in percent (e.g. 40 for 40%).
    pub customer_percentage: Decimal,
    /// Amount paid up front.
    pub down_payment: Decimal,
    /// Number of monthly installments.
    pub months: i32,
}

/// Derived figures for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPreview {
    /// `base * (1 + seller% / 100)`.
    pub cost_basis: Decimal,
    /// `base * (1 + customer% / 100)`.
    pub total_price: Decimal,
    /// `total_price - cost_basis`.
    pub profit: Decimal,
    /// `total_price - down_payment`.
    pub remaining: Decimal,
    /// `remaining / months`, or zero when months is not positive.
    pub monthly: Decimal,
}

/// Stateless plan calculator.
pub struct PlanCalculator;

impl PlanCalculator {
    /// Compute the preview for a set of plan inputs.
    ///
    /// Never fails. A non-positive term yields a monthly installment of zero
    /// instead of dividing by zero, and figures beyond the `Decimal` range
    /// saturate at `Decimal::MAX` / `Decimal::MIN`.
    #[must_use]
    pub fn preview(inputs: &PlanInputs) -> PlanPreview {
        let cost_basis = saturating_markup(inputs.base_price, inputs.seller_percentage);
        let total_price = saturating_markup(inputs.base_price, inputs.customer_percentage);
        let remaining = total_price.saturating_sub(inputs.down_payment);

        PlanPreview {
            cost_basis,
            total_price,
            profit: total_price.saturating_sub(cost_basis),
            remaining,
            monthly: monthly(remaining, inputs.months),
        }
    }

    /// Compute the preview, or `None` if any figure leaves the `Decimal`
    /// range.
    #[must_use]
    pub fn checked_preview(inputs: &PlanInputs) -> Option<PlanPreview> {
        let cost_basis = checked_markup(inputs.base_price, inputs.seller_percentage)?;
        let total_price = checked_markup(inputs.base_price, inputs.customer_percentage)?;
        let remaining = total_price.checked_sub(inputs.down_payment)?;

        Some(PlanPreview {
            cost_basis,
            total_price,
            profit: total_price.checked_sub(cost_basis)?,
            remaining,
            monthly: monthly(remaining, inputs.months),
        })
    }
}

fn checked_markup(base: Decimal, percentage: Decimal) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(percentage.checked_div(Decimal::ONE_HUNDRED)?)?;
    base.checked_mul(factor)
}

fn saturating_markup(base: Decimal, percentage: Decimal) -> Decimal {
    let factor = Decimal::ONE.saturating_add(percentage / Decimal::ONE_HUNDRED);
    base.saturating_mul(factor)
}

fn monthly(remaining: Decimal, months: i32) -> Decimal {
    if months > 0 {
        remaining / Decimal::from(months)
    } else {
        Decimal::ZERO
    }
}
