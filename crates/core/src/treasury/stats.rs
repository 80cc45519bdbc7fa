//! Per-safe and aggregate treasury balances.
//!
//! Balances are a pure fold over the full transaction list, recomputed on
//! every read. Nothing here is persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{SafeType, Transaction};

/// Income, expenses and net balance of one safe (or of all safes together).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SafeStats {
    /// `income - expenses`.
    pub balance: Decimal,
    /// Sum of deposits.
    pub income: Decimal,
    /// Sum of every non-deposit movement.
    pub expenses: Decimal,
}

impl SafeStats {
    /// Adds an inflow. Figures saturate at the `Decimal` bounds.
    pub fn add_income(&mut self, amount: Decimal) {
        self.income = self.income.saturating_add(amount);
        self.balance = self.balance.saturating_add(amount);
    }

    /// Adds an outflow. Figures saturate at the `Decimal` bounds.
    pub fn add_expense(&mut self, amount: Decimal) {
        self.expenses = self.expenses.saturating_add(amount);
        self.balance = self.balance.saturating_sub(amount);
    }
}

/// Treasury figures for each safe plus the total bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreasuryStats {
    /// All safes combined.
    pub total: SafeStats,
    /// Cash box.
    pub cash: SafeStats,
    /// Instant transfer account.
    pub instapay: SafeStats,
    /// Mobile wallet.
    pub wallet: SafeStats,
}

impl TreasuryStats {
    /// Fold a transaction list into per-safe and total figures.
    ///
    /// Deposits add to income and balance; every other direction adds to
    /// expenses and subtracts from balance. A missing safe counts as cash.
    #[must_use]
    pub fn compute(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, tx| {
            let amount = tx.amount;
            if tx.kind.is_deposit() {
                acc.for_safe_mut(tx.safe()).add_income(amount);
                acc.total.add_income(amount);
            } else {
                acc.for_safe_mut(tx.safe()).add_expense(amount);
                acc.total.add_expense(amount);
            }
            acc
        })
    }

    /// Figures for one safe.
    #[must_use]
    pub fn for_safe(&self, safe: SafeType) -> &SafeStats {
        match safe {
            SafeType::Cash => &self.cash,
            SafeType::Instapay => &self.instapay,
            SafeType::Wallet => &self.wallet,
        }
    }

    fn for_safe_mut(&mut self, safe: SafeType) -> &mut SafeStats {
        match safe {
            SafeType::Cash => &mut self.cash,
            SafeType::Instapay => &mut self.instapay,
            SafeType::Wallet => &mut self.wallet,
        }
    }
}
