//! Property-based tests for the plan lifecycle.
//!
//! After any sequence of payment additions and deletions:
//! - `remaining == max(0, total - down - sum(payments))`
//! - `status == Paid` iff `remaining <= 0`
//!
//! And adding then deleting a payment restores balance and status while
//! leaving an offsetting deposit/expense pair on the same safe.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculator::PlanInputs;
use crate::customer::NewCustomer;
use crate::plan::service::PlanService;
use crate::plan::types::{
    CreatePlanInput, CustomerSelection, InstallmentPlan, PaymentInput, PlanStatus,
};
use crate::treasury::{SafeType, TransactionKind};

#[derive(Debug, Clone)]
enum Op {
    /// Pay a percentage of what is still owed.
    PayShare(u32, SafeType),
    /// Pay an arbitrary amount in cents (often rejected).
    PayRaw(i64, SafeType),
    /// Delete the payment at `index % len`.
    Delete(usize),
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
}

fn arb_safe() -> impl Strategy<Value = SafeType> {
    prop_oneof![
        Just(SafeType::Cash),
        Just(SafeType::Instapay),
        Just(SafeType::Wallet),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=100u32, arb_safe()).prop_map(|(pct, safe)| Op::PayShare(pct, safe)),
        (-1_000i64..2_000_000i64, arb_safe()).prop_map(|(cents, safe)| Op::PayRaw(cents, safe)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

/// A freshly created plan, sometimes settled in full by its down payment.
fn arb_plan() -> impl Strategy<Value = InstallmentPlan> {
    (
        100i64..1_000_000i64,
        0i64..=100i64,
        0i64..=100i64,
        0i64..=100i64,
        1i32..=36i32,
    )
        .prop_map(|(base, seller, customer, down_pct, months)| {
            let base_price = Decimal::from(base);
            let total =
                base_price * (Decimal::ONE + Decimal::from(customer) / Decimal::ONE_HUNDRED);
            let inputs = PlanInputs {
                base_price,
                seller_percentage: Decimal::from(seller),
                customer_percentage: Decimal::from(customer),
                down_payment: total * Decimal::from(down_pct) / Decimal::ONE_HUNDRED,
                months,
            };
            PlanService::create(
                CreatePlanInput {
                    customer: CustomerSelection::New(NewCustomer {
                        name: "Prop".to_string(),
                        phone: "0100".to_string(),
                        national_id: String::new(),
                    }),
                    product_name: "Item".to_string(),
                    inputs,
                    start_date: day(),
                    purchase_safe: SafeType::Cash,
                    down_payment_safe: SafeType::Cash,
                    notes: None,
                    ai_analysis: None,
                },
                &[],
                day(),
            )
            .expect("valid plan")
            .plan
        })
}

fn payment(amount: Decimal, safe: SafeType) -> PaymentInput {
    PaymentInput {
        amount,
        notes: None,
        date: day(),
        safe,
    }
}

/// `pct` percent of `remaining`, rounded to cents without exceeding it.
fn share(remaining: Decimal, pct: u32) -> Decimal {
    (remaining * Decimal::from(pct) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

fn expected_remaining(plan: &InstallmentPlan) -> Decimal {
    (plan.total_price_to_customer - plan.down_payment - plan.payments_total()).max(Decimal::ZERO)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_balance_and_status_invariants(
        mut plan in arb_plan(),
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        for op in ops {
            let before = plan.clone();
            match op {
                Op::PayShare(pct, safe) => {
                    let amount = share(plan.remaining_balance, pct);
                    if PlanService::add_payment(&mut plan, payment(amount, safe)).is_err() {
                        prop_assert_eq!(&plan, &before);
                    }
                }
                Op::PayRaw(cents, safe) => {
                    let input = payment(Decimal::new(cents, 2), safe);
                    if PlanService::add_payment(&mut plan, input).is_err() {
                        prop_assert_eq!(&plan, &before);
                    }
                }
                Op::Delete(index) => {
                    if !plan.payments.is_empty() {
                        let id = plan.payments[index % plan.payments.len()].id;
                        prop_assert!(PlanService::delete_payment(&mut plan, id, day()).is_some());
                    }
                }
            }

            prop_assert_eq!(plan.remaining_balance, expected_remaining(&plan));
            prop_assert_eq!(
                plan.status == PlanStatus::Paid,
                plan.remaining_balance <= Decimal::ZERO
            );
        }
    }

    #[test]
    fn prop_add_then_delete_round_trips(
        mut plan in arb_plan(),
        pct in 1u32..=100u32,
        safe in arb_safe(),
    ) {
        let amount = share(plan.remaining_balance, pct);
        prop_assume!(amount > Decimal::ZERO);
        let before = plan.clone();

        let deposit =
            PlanService::add_payment(&mut plan, payment(amount, safe)).expect("valid payment");
        let id = plan.payments[0].id;
        let reversal = PlanService::delete_payment(&mut plan, id, day()).expect("payment exists");

        prop_assert_eq!(plan.remaining_balance, before.remaining_balance);
        prop_assert_eq!(plan.status, before.status);
        prop_assert!(plan.payments.is_empty());

        prop_assert_eq!(deposit.kind, TransactionKind::Deposit);
        prop_assert_eq!(reversal.correction.kind, TransactionKind::Expense);
        prop_assert_eq!(deposit.amount, reversal.correction.amount);
        prop_assert_eq!(deposit.safe(), reversal.correction.safe());
        prop_assert_eq!(deposit.related_plan_id, reversal.correction.related_plan_id);
    }
}
