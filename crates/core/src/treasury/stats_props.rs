//! Property-based tests for treasury aggregation.
//!
//! For any transaction set the total balance equals the sum of the per-safe
//! balances, and each bucket's balance equals its income minus expenses.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::treasury::service::TreasuryService;
use crate::treasury::stats::TreasuryStats;
use crate::treasury::types::{SafeType, Transaction, TransactionKind};

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Expense),
        Just(TransactionKind::Withdrawal),
    ]
}

fn arb_safe() -> impl Strategy<Value = Option<SafeType>> {
    prop_oneof![
        Just(None),
        Just(Some(SafeType::Cash)),
        Just(Some(SafeType::Instapay)),
        Just(Some(SafeType::Wallet)),
    ]
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (arb_amount(), arb_kind(), arb_safe()).prop_map(|(amount, kind, safe)| {
        let mut tx = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            amount,
            kind,
            "Generated",
            SafeType::Cash,
        );
        tx.safe_type = safe;
        tx
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_total_is_sum_of_safes(transactions in prop::collection::vec(arb_transaction(), 0..50)) {
        let stats = TreasuryStats::compute(&transactions);

        let safe_sum: Decimal = SafeType::ALL.iter().map(|s| stats.for_safe(*s).balance).sum();
        prop_assert_eq!(stats.total.balance, safe_sum);

        for bucket in [stats.total, stats.cash, stats.instapay, stats.wallet] {
            prop_assert_eq!(bucket.balance, bucket.income - bucket.expenses);
        }
    }

    #[test]
    fn prop_order_does_not_matter(
        mut transactions in prop::collection::vec(arb_transaction(), 0..30),
    ) {
        let forward = TreasuryStats::compute(&transactions);
        transactions.reverse();
        prop_assert_eq!(TreasuryStats::compute(&transactions), forward);
    }

    #[test]
    fn prop_delete_restores_previous_stats(
        transactions in prop::collection::vec(arb_transaction(), 0..30),
        extra in arb_transaction(),
    ) {
        let before = TreasuryStats::compute(&transactions);

        let mut ledger = transactions.clone();
        TreasuryService::add(&mut ledger, extra.clone());
        prop_assert!(TreasuryService::delete(&mut ledger, extra.id));

        prop_assert_eq!(&ledger, &transactions);
        prop_assert_eq!(TreasuryStats::compute(&ledger), before);
    }
}
