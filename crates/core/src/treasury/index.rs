//! Lookup index from plan id to the transactions that reference it.
//!
//! `relatedPlanId` is a weak back-reference. The index is rebuilt from the
//! transaction list and only answers lookups; it is never used to cascade
//! deletes. After a plan is deleted its transactions stay, and their
//! reference dangles.

use std::collections::{HashMap, HashSet};

use aqsat_shared::types::PlanId;

use super::types::Transaction;

/// Plan id to referencing transactions, in ledger order.
#[derive(Debug, Default)]
pub struct RelatedPlanIndex<'a> {
    by_plan: HashMap<PlanId, Vec<&'a Transaction>>,
}

impl<'a> RelatedPlanIndex<'a> {
    /// Build the index over a transaction list.
    #[must_use]
    pub fn build(transactions: &'a [Transaction]) -> Self {
        let mut by_plan: HashMap<PlanId, Vec<&'a Transaction>> = HashMap::new();
        for tx in transactions {
            if let Some(plan_id) = tx.related_plan_id {
                by_plan.entry(plan_id).or_default().push(tx);
            }
        }
        Self { by_plan }
    }

    /// Transactions referencing a plan (empty if none).
    #[must_use]
    pub fn for_plan(&self, plan_id: PlanId) -> &[&'a Transaction] {
        self.by_plan.get(&plan_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transactions whose referenced plan is not among `live_plans`.
    #[must_use]
    pub fn dangling(&self, live_plans: &HashSet<PlanId>) -> Vec<&'a Transaction> {
        let mut orphans: Vec<&'a Transaction> = self
            .by_plan
            .iter()
            .filter(|(plan_id, _)| !live_plans.contains(plan_id))
            .flat_map(|(_, txs)| txs.iter().copied())
            .collect();
        orphans.sort_by_key(|tx| tx.id.into_inner());
        orphans
    }

    /// Number of distinct plans referenced.
    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.by_plan.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treasury::types::{SafeType, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn linked(plan_id: Option<PlanId>) -> Transaction {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            dec!(10),
            TransactionKind::Deposit,
            "Test",
            SafeType::Cash,
        );
        match plan_id {
            Some(id) => tx.for_plan(id),
            None => tx,
        }
    }

    #[test]
    fn test_lookup_by_plan() {
        let plan_a = PlanId::new();
        let plan_b = PlanId::new();
        let transactions = vec![
            linked(Some(plan_a)),
            linked(None),
            linked(Some(plan_b)),
            linked(Some(plan_a)),
        ];

        let index = RelatedPlanIndex::build(&transactions);

        assert_eq!(index.plan_count(), 2);
        assert_eq!(index.for_plan(plan_a).len(), 2);
        assert_eq!(index.for_plan(plan_a)[0].id, transactions[0].id);
        assert_eq!(index.for_plan(plan_b).len(), 1);
        assert!(index.for_plan(PlanId::new()).is_empty());
    }

    #[test]
    fn test_dangling_references() {
        let live = PlanId::new();
        let deleted = PlanId::new();
        let transactions = vec![linked(Some(live)), linked(Some(deleted)), linked(Some(deleted))];

        let index = RelatedPlanIndex::build(&transactions);
        let live_plans: HashSet<PlanId> = [live].into_iter().collect();
        let orphans = index.dangling(&live_plans);

        assert_eq!(orphans.len(), 2);
        assert!(orphans.iter().all(|tx| tx.related_plan_id == Some(deleted)));
    }
}
