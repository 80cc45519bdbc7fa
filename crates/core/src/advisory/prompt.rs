//! Plan summary sent to the advisory generator.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculator::{PlanInputs, PlanPreview};

/// The figures of a plan the advisory note is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Product label.
    pub product_name: String,
    /// Purchase price.
    pub base_price: Decimal,
    /// Seller markup in percent.
    pub seller_percentage: Decimal,
    /// Customer markup in percent.
    pub customer_percentage: Decimal,
    /// Intermediary profit.
    pub intermediary_profit: Decimal,
    /// Amount paid up front.
    pub down_payment: Decimal,
    /// Monthly installment.
    pub monthly_installment: Decimal,
    /// Term in months.
    pub months: i32,
}

impl PlanSummary {
    /// Summary of a plan still being entered.
    #[must_use]
    pub fn from_preview(
        product_name: impl Into<String>,
        inputs: &PlanInputs,
        preview: &PlanPreview,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            base_price: inputs.base_price,
            seller_percentage: inputs.seller_percentage,
            customer_percentage: inputs.customer_percentage,
            intermediary_profit: preview.profit,
            down_payment: inputs.down_payment,
            monthly_installment: preview.monthly,
            months: inputs.months,
        }
    }

    /// Prompt text for the generator.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Act as an expert financial advisor. Analyze the following installment plan \
             and give a brief report:\n\
             \n\
             Product: {}\n\
             Base price: {}\n\
             Seller percentage: {}%\n\
             Customer percentage: {}%\n\
             Intermediary net profit: {}\n\
             Down payment: {}\n\
             Monthly installment: {}\n\
             Term: {} months\n\
             \n\
             Points to cover:\n\
             1. Is the profit margin good for the intermediary?\n\
             2. Does the monthly installment look reasonable for the price?\n\
             3. One very short line of advice for the intermediary.",
            self.product_name,
            self.base_price,
            self.seller_percentage,
            self.customer_percentage,
            self.intermediary_profit,
            self.down_payment,
            self.monthly_installment.round_dp(2),
            self.months,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::PlanCalculator;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prompt_carries_plan_figures() {
        let inputs = PlanInputs {
            base_price: dec!(9000),
            seller_percentage: dec!(25),
            customer_percentage: dec!(35),
            down_payment: dec!(1150),
            months: 12,
        };
        let preview = PlanCalculator::preview(&inputs);
        let summary = PlanSummary::from_preview("Air conditioner", &inputs, &preview);

        let prompt = summary.prompt();

        assert!(prompt.contains("Product: Air conditioner"));
        assert!(prompt.contains("Base price: 9000"));
        assert!(prompt.contains("Seller percentage: 25%"));
        assert!(prompt.contains("Customer percentage: 35%"));
        assert!(prompt.contains("Intermediary net profit: 900"));
        assert!(prompt.contains("Down payment: 1150"));
        assert!(prompt.contains("Monthly installment: 916.67"));
        assert!(prompt.contains("Term: 12 months"));
    }
}
