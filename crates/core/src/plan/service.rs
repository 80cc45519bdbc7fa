//! Plan lifecycle: creation, payments and payment reversal.
//!
//! Every operation validates before it touches anything, so a rejection
//! leaves the plan exactly as it was and produces no treasury record.
//! Successful mutations return the mirrored treasury transaction for the
//! caller to prepend to the ledger.

use aqsat_shared::types::{PaymentId, PlanId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::PlanError;
use super::types::{
    CreatePlanInput, CustomerSelection, InstallmentPlan, Payment, PaymentInput, PaymentReversal,
    PlanCreation, PlanFilter, PlanStatus, ScheduledPayment,
};
use crate::calculator::{PlanCalculator, add_months, installment_due_date};
use crate::customer::{Customer, CustomerError, CustomerRegistry};
use crate::treasury::{
    CATEGORY_COLLECTION, CATEGORY_DOWN_PAYMENT, CATEGORY_PAYMENT_REVERSAL, CATEGORY_PURCHASE,
    Transaction, TransactionKind,
};

/// Stateless plan lifecycle service.
pub struct PlanService;

impl PlanService {
    /// Create a plan with its seed transactions.
    ///
    /// Resolves or registers the customer, derives the pricing figures and
    /// the due date, and builds:
    /// - a purchase expense for the base price on the purchase safe
    /// - a down-payment deposit on the down-payment safe, only if positive
    ///
    /// Both transactions are dated `today` and linked to the plan.
    ///
    /// # Errors
    ///
    /// - `Customer(NotFound)` if an existing customer id does not resolve
    /// - `Customer(MissingName | MissingPhone)` for incomplete new customers
    /// - `AmountOutOfRange` if a pricing figure overflows `Decimal`
    /// - `DueDateOutOfRange` if start date plus term overflows the calendar
    ///
    /// A down payment covering the whole customer price opens the plan with
    /// a zero balance, already `Paid`.
    pub fn create(
        input: CreatePlanInput,
        customers: &[Customer],
        today: NaiveDate,
    ) -> Result<PlanCreation, PlanError> {
        let (customer_id, customer_name, new_customer) = match input.customer {
            CustomerSelection::Existing(id) => {
                let existing =
                    CustomerRegistry::find(customers, id).ok_or(CustomerError::NotFound(id))?;
                (existing.id, existing.name.clone(), None)
            }
            CustomerSelection::New(details) => {
                let created = CustomerRegistry::register(details)?;
                (created.id, created.name.clone(), Some(created))
            }
        };

        let inputs = input.inputs;
        let preview =
            PlanCalculator::checked_preview(&inputs).ok_or(PlanError::AmountOutOfRange)?;
        let due_date =
            add_months(input.start_date, inputs.months).ok_or(PlanError::DueDateOutOfRange)?;

        let remaining_balance = preview.remaining.max(Decimal::ZERO);

        let plan = InstallmentPlan {
            id: PlanId::new(),
            customer_id,
            customer_name,
            product_name: input.product_name,
            base_price: inputs.base_price,
            seller_percentage: inputs.seller_percentage,
            customer_percentage: inputs.customer_percentage,
            total_cost_to_intermediary: preview.cost_basis,
            total_price_to_customer: preview.total_price,
            intermediary_profit: preview.profit,
            down_payment: inputs.down_payment,
            months: inputs.months,
            monthly_installment: preview.monthly,
            start_date: input.start_date,
            due_date,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
            ai_analysis: input.ai_analysis.filter(|a| !a.trim().is_empty()),
            payments: Vec::new(),
            remaining_balance,
            status: PlanStatus::for_balance(remaining_balance),
        };

        let purchase = Transaction::new(
            today,
            plan.base_price,
            TransactionKind::Expense,
            CATEGORY_PURCHASE,
            input.purchase_safe,
        )
        .with_description(format!(
            "Purchase of {} for customer {}",
            plan.product_name, plan.customer_name
        ))
        .for_plan(plan.id);

        let down_payment = (plan.down_payment > Decimal::ZERO).then(|| {
            Transaction::new(
                today,
                plan.down_payment,
                TransactionKind::Deposit,
                CATEGORY_DOWN_PAYMENT,
                input.down_payment_safe,
            )
            .with_description(format!(
                "Down payment for {} - {}",
                plan.product_name, plan.customer_name
            ))
            .for_plan(plan.id)
        });

        Ok(PlanCreation {
            plan,
            new_customer,
            purchase,
            down_payment,
        })
    }

    /// Record a payment against a plan.
    ///
    /// Appends the payment, lowers the remaining balance (never below zero),
    /// recomputes the status and returns the mirrored deposit on the
    /// payment's safe.
    ///
    /// # Errors
    ///
    /// - `PlanAlreadyPaid` if the plan is marked paid, whatever the amount
    /// - `NonPositiveAmount` if the amount is zero or negative
    /// - `ExceedsRemainingBalance` if the amount is above what is owed
    pub fn add_payment(
        plan: &mut InstallmentPlan,
        input: PaymentInput,
    ) -> Result<Transaction, PlanError> {
        Self::check_payment(plan, input.amount)?;

        let notes = input.notes.filter(|n| !n.trim().is_empty());
        let payment = Payment {
            id: PaymentId::new(),
            date: input.date,
            amount: input.amount,
            notes: notes.clone(),
            safe_type: Some(input.safe),
        };

        plan.payments.push(payment);
        plan.remaining_balance = (plan.remaining_balance - input.amount).max(Decimal::ZERO);
        plan.status = PlanStatus::for_balance(plan.remaining_balance);

        let deposit = Transaction::new(
            input.date,
            input.amount,
            TransactionKind::Deposit,
            CATEGORY_COLLECTION,
            input.safe,
        )
        .with_description(format!(
            "Installment payment: {} - {} ({})",
            plan.customer_name,
            plan.product_name,
            notes.unwrap_or_default()
        ))
        .for_plan(plan.id);

        Ok(deposit)
    }

    /// Check the payment preconditions without mutating anything.
    ///
    /// # Errors
    ///
    /// Same as [`PlanService::add_payment`].
    pub fn check_payment(plan: &InstallmentPlan, amount: Decimal) -> Result<(), PlanError> {
        if plan.is_paid() {
            return Err(PlanError::PlanAlreadyPaid(plan.id));
        }
        if amount <= Decimal::ZERO {
            return Err(PlanError::NonPositiveAmount(amount));
        }
        if amount > plan.remaining_balance {
            return Err(PlanError::ExceedsRemainingBalance {
                amount,
                remaining: plan.remaining_balance,
            });
        }
        Ok(())
    }

    /// Remove a payment and reverse it.
    ///
    /// Restores the amount to the remaining balance (no clamp at the
    /// original total), recomputes the status and returns a correction
    /// expense on the safe the payment used, dated `today`. The original
    /// deposit is left in the ledger.
    ///
    /// Returns `None` and leaves the plan untouched if the payment is absent.
    pub fn delete_payment(
        plan: &mut InstallmentPlan,
        payment_id: PaymentId,
        today: NaiveDate,
    ) -> Option<PaymentReversal> {
        let index = plan.payments.iter().position(|p| p.id == payment_id)?;
        let payment = plan.payments.remove(index);

        plan.remaining_balance = plan.remaining_balance.saturating_add(payment.amount);
        plan.status = PlanStatus::for_balance(plan.remaining_balance);

        let correction = Transaction::new(
            today,
            payment.amount,
            TransactionKind::Expense,
            CATEGORY_PAYMENT_REVERSAL,
            payment.safe(),
        )
        .with_description(format!(
            "Payment cancelled: {} - {}",
            plan.customer_name, plan.product_name
        ))
        .for_plan(plan.id);

        Some(PaymentReversal {
            payment,
            correction,
        })
    }

    /// Prepend a plan to the collection (newest first).
    pub fn add(plans: &mut Vec<InstallmentPlan>, plan: InstallmentPlan) {
        plans.insert(0, plan);
    }

    /// Remove a plan by id. Linked transactions are not touched.
    ///
    /// Returns `false` (and leaves the list untouched) when the id is absent.
    pub fn delete(plans: &mut Vec<InstallmentPlan>, id: PlanId) -> bool {
        match plans.iter().position(|p| p.id == id) {
            Some(index) => {
                plans.remove(index);
                true
            }
            None => false,
        }
    }

    /// Look up a plan by id.
    #[must_use]
    pub fn find(plans: &[InstallmentPlan], id: PlanId) -> Option<&InstallmentPlan> {
        plans.iter().find(|p| p.id == id)
    }

    /// Look up a plan by id for mutation.
    pub fn find_mut(plans: &mut [InstallmentPlan], id: PlanId) -> Option<&mut InstallmentPlan> {
        plans.iter_mut().find(|p| p.id == id)
    }

    /// Payments with their ordinal and notional due date.
    #[must_use]
    pub fn schedule(plan: &InstallmentPlan) -> Vec<ScheduledPayment> {
        (1u32..)
            .zip(&plan.payments)
            .map(|(ordinal, payment)| ScheduledPayment {
                ordinal,
                due_date: installment_due_date(plan.start_date, ordinal),
                payment: payment.clone(),
            })
            .collect()
    }

    /// Plans passing the filter, in stored order.
    #[must_use]
    pub fn filter<'a>(
        plans: &'a [InstallmentPlan],
        filter: &PlanFilter,
    ) -> Vec<&'a InstallmentPlan> {
        plans.iter().filter(|p| filter.matches(p)).collect()
    }
}
