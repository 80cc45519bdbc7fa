//! Treasury ledger operations on the full transaction collection.

use aqsat_shared::types::TransactionId;
use rust_decimal::Decimal;

use super::error::TreasuryError;
use super::types::{
    CATEGORY_MANUAL_DEPOSIT, CATEGORY_MANUAL_EXPENSE, ManualEntryInput, SafeType, Transaction,
};

/// Which directions a transaction listing keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionFilter {
    /// Everything.
    #[default]
    All,
    /// Deposits only.
    Deposits,
    /// Everything that is not a deposit.
    Outflows,
}

/// Filter for treasury listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Direction filter.
    pub direction: DirectionFilter,
    /// Restrict to one safe. Unset safes match cash.
    pub safe: Option<SafeType>,
}

impl TransactionFilter {
    /// Returns true if the transaction passes the filter.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        let direction_ok = match self.direction {
            DirectionFilter::All => true,
            DirectionFilter::Deposits => tx.kind.is_deposit(),
            DirectionFilter::Outflows => !tx.kind.is_deposit(),
        };
        direction_ok && self.safe.is_none_or(|safe| tx.safe() == safe)
    }
}

/// Stateless treasury ledger service.
///
/// The collection is ordered newest first: new transactions are prepended.
pub struct TreasuryService;

impl TreasuryService {
    /// Prepend a transaction. No validation beyond what the caller built.
    pub fn add(transactions: &mut Vec<Transaction>, tx: Transaction) {
        transactions.insert(0, tx);
    }

    /// Remove a transaction by id.
    ///
    /// Returns `false` (and leaves the list untouched) when the id is absent.
    pub fn delete(transactions: &mut Vec<Transaction>, id: TransactionId) -> bool {
        match transactions.iter().position(|t| t.id == id) {
            Some(index) => {
                transactions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Build a user-entered deposit or expense.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the amount is zero or negative.
    pub fn manual_entry(input: ManualEntryInput) -> Result<Transaction, TreasuryError> {
        if input.amount <= Decimal::ZERO {
            return Err(TreasuryError::NonPositiveAmount(input.amount));
        }

        let category = input
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| {
                if input.kind.is_deposit() {
                    CATEGORY_MANUAL_DEPOSIT.to_string()
                } else {
                    CATEGORY_MANUAL_EXPENSE.to_string()
                }
            });

        let mut tx = Transaction::new(input.date, input.amount, input.kind, category, input.safe);
        tx.description = input.description.filter(|d| !d.trim().is_empty());
        Ok(tx)
    }

    /// Transactions passing the filter, in stored order.
    #[must_use]
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| filter.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treasury::types::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn tx(kind: TransactionKind, safe: SafeType) -> Transaction {
        Transaction::new(day(), dec!(100), kind, "Test", safe)
    }

    fn manual(kind: TransactionKind, amount: Decimal, category: Option<&str>) -> ManualEntryInput {
        ManualEntryInput {
            kind,
            amount,
            category: category.map(str::to_string),
            description: None,
            date: day(),
            safe: SafeType::Cash,
        }
    }

    #[test]
    fn test_add_prepends() {
        let mut transactions = vec![tx(TransactionKind::Deposit, SafeType::Cash)];
        let newer = tx(TransactionKind::Expense, SafeType::Wallet);
        TreasuryService::add(&mut transactions, newer.clone());
        assert_eq!(transactions[0], newer);
        assert_eq!(transactions.len(), 2);
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let first = tx(TransactionKind::Deposit, SafeType::Cash);
        let mut transactions = vec![first.clone(), tx(TransactionKind::Expense, SafeType::Cash)];

        assert!(TreasuryService::delete(&mut transactions, first.id));
        assert_eq!(transactions.len(), 1);

        let snapshot = transactions.clone();
        assert!(!TreasuryService::delete(&mut transactions, TransactionId::new()));
        assert_eq!(transactions, snapshot);
    }

    #[test]
    fn test_manual_entry_default_categories() {
        let unnamed = manual(TransactionKind::Deposit, dec!(10), None);
        let deposit = TreasuryService::manual_entry(unnamed).unwrap();
        assert_eq!(deposit.category, CATEGORY_MANUAL_DEPOSIT);

        let blank = manual(TransactionKind::Expense, dec!(10), Some(" "));
        let expense = TreasuryService::manual_entry(blank).unwrap();
        assert_eq!(expense.category, CATEGORY_MANUAL_EXPENSE);

        let named = manual(TransactionKind::Expense, dec!(10), Some("Rent"));
        let rent = TreasuryService::manual_entry(named).unwrap();
        assert_eq!(rent.category, "Rent");
        assert!(rent.related_plan_id.is_none());
    }

    #[test]
    fn test_manual_entry_rejects_non_positive() {
        let zero = manual(TransactionKind::Deposit, dec!(0), None);
        let err = TreasuryService::manual_entry(zero).unwrap_err();
        assert_eq!(err, TreasuryError::NonPositiveAmount(dec!(0)));

        let negative = manual(TransactionKind::Expense, dec!(-5), None);
        assert!(TreasuryService::manual_entry(negative).is_err());
    }

    #[test]
    fn test_filter_by_direction_and_safe() {
        let mut legacy = tx(TransactionKind::Expense, SafeType::Cash);
        legacy.safe_type = None;
        let transactions = vec![
            tx(TransactionKind::Deposit, SafeType::Cash),
            tx(TransactionKind::Withdrawal, SafeType::Wallet),
            legacy,
            tx(TransactionKind::Deposit, SafeType::Instapay),
        ];

        let outflows = TreasuryService::filter(
            &transactions,
            &TransactionFilter { direction: DirectionFilter::Outflows, safe: None },
        );
        assert_eq!(outflows.len(), 2);

        let cash = TreasuryService::filter(
            &transactions,
            &TransactionFilter { direction: DirectionFilter::All, safe: Some(SafeType::Cash) },
        );
        assert_eq!(cash.len(), 2);

        let cash_deposits = TreasuryService::filter(
            &transactions,
            &TransactionFilter { direction: DirectionFilter::Deposits, safe: Some(SafeType::Cash) },
        );
        assert_eq!(cash_deposits.len(), 1);
    }
}
