//! Property-based tests for plan and treasury consistency through a session.
//!
//! Every payment deposits and every deletion withdraws the same amount, so
//! after any sequence the treasury total equals
//! `down_payment - base_price + sum(current payments)`.

use aqsat_core::calculator::PlanInputs;
use aqsat_core::customer::NewCustomer;
use aqsat_core::plan::{CreatePlanInput, CustomerSelection, PaymentInput, PlanStatus};
use aqsat_core::treasury::SafeType;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::Session;
use crate::store::OpendalStore;

#[derive(Debug, Clone)]
enum Op {
    Pay(i64, SafeType),
    Delete(usize),
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
        (1i64..500_000i64, arb_safe()).prop_map(|(cents, safe)| Op::Pay(cents, safe)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

async fn run(base: i64, down: i64, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let session = Session::new(OpendalStore::in_memory().expect("memory store")).with_today(day());
    let plan = session
        .create_plan(CreatePlanInput {
            customer: CustomerSelection::New(NewCustomer {
                name: "Prop".to_string(),
                phone: "0100".to_string(),
                national_id: String::new(),
            }),
            product_name: "Item".to_string(),
            inputs: PlanInputs {
                base_price: Decimal::from(base),
                seller_percentage: Decimal::from(10),
                customer_percentage: Decimal::from(25),
                down_payment: Decimal::from(down),
                months: 12,
            },
            start_date: day(),
            purchase_safe: SafeType::Cash,
            down_payment_safe: SafeType::Wallet,
            notes: None,
            ai_analysis: None,
        })
        .await
        .expect("plan created");

    for op in ops {
        match op {
            Op::Pay(cents, safe) => {
                let input = PaymentInput {
                    amount: Decimal::new(cents, 2),
                    notes: None,
                    date: day(),
                    safe,
                };
                if let Err(e) = session.add_payment(plan.id, input).await {
                    prop_assert!(e.is_rejection());
                }
            }
            Op::Delete(index) => {
                let current = session.plan(plan.id).await.expect("load").expect("plan");
                if !current.payments.is_empty() {
                    let id = current.payments[index % current.payments.len()].id;
                    let reversal = session.delete_payment(plan.id, id).await.expect("delete");
                    prop_assert!(reversal.is_some());
                }
            }
        }

        let current = session.plan(plan.id).await.expect("load").expect("plan");
        let stats = session.treasury_stats().await.expect("stats");
        prop_assert_eq!(
            stats.total.balance,
            current.down_payment - current.base_price + current.payments_total()
        );
        prop_assert_eq!(
            current.remaining_balance,
            (current.total_price_to_customer - current.down_payment - current.payments_total())
                .max(Decimal::ZERO)
        );
        prop_assert_eq!(
            current.status == PlanStatus::Paid,
            current.remaining_balance <= Decimal::ZERO
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_treasury_tracks_payments(
        base in 100i64..5_000i64,
        down_share in 0i64..=50i64,
        ops in prop::collection::vec(arb_op(), 0..16),
    ) {
        let down = base * down_share / 100;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(run(base, down, ops))?;
    }
}
