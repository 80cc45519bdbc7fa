//! Session: the explicit context object behind every operation.
//!
//! Each mutation loads the full collection it touches, applies a core
//! operation and replaces the collection. Validation happens before any
//! write, so a rejection writes nothing. Absent-record deletes are no-ops
//! and write nothing either. The last writer wins.

mod error;
#[cfg(test)]
mod props;

pub use error::SessionError;

use std::collections::HashSet;

use aqsat_core::customer::{Customer, CustomerError, CustomerRegistry, CustomerStatus};
use aqsat_core::plan::{
    CreatePlanInput, InstallmentPlan, MonthlySummary, PaymentInput, PaymentReversal, PlanError,
    PlanFilter, PlanService, PortfolioStats, ScheduledPayment, monthly_summary,
};
use aqsat_core::treasury::{
    ManualEntryInput, RelatedPlanIndex, Transaction, TransactionFilter, TreasuryService,
    TreasuryStats,
};
use aqsat_shared::types::{CustomerId, PaymentId, PlanId, TransactionId};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::collection::Collection;
use crate::error::StorageError;
use crate::store::{RecordStore, load_all, replace_all};

/// One logical session over a record store.
pub struct Session<S: RecordStore> {
    store: S,
    today: Option<NaiveDate>,
}

impl<S: RecordStore> Session<S> {
    /// Create a session over a store. Dates default to the current UTC day.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store, today: None }
    }

    /// Pin the date used for generated transactions.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All customers, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn customers(&self) -> Result<Vec<Customer>, StorageError> {
        load_all(&self.store, Collection::Customers).await
    }

    /// All plans, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn plans(&self) -> Result<Vec<InstallmentPlan>, StorageError> {
        load_all(&self.store, Collection::Plans).await
    }

    /// All transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        load_all(&self.store, Collection::Transactions).await
    }

    /// One customer.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn customer(&self, id: CustomerId) -> Result<Option<Customer>, StorageError> {
        let customers = self.customers().await?;
        Ok(CustomerRegistry::find(&customers, id).cloned())
    }

    /// One plan.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn plan(&self, id: PlanId) -> Result<Option<InstallmentPlan>, StorageError> {
        let plans = self.plans().await?;
        Ok(PlanService::find(&plans, id).cloned())
    }

    async fn existing_plan(&self, id: PlanId) -> Result<InstallmentPlan, SessionError> {
        self.plan(id)
            .await?
            .ok_or_else(|| PlanError::PlanNotFound(id).into())
    }

    /// Per-safe and total balances, folded from the full ledger.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn treasury_stats(&self) -> Result<TreasuryStats, StorageError> {
        Ok(TreasuryStats::compute(&self.transactions().await?))
    }

    /// Portfolio figures over all plans.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn portfolio_stats(&self) -> Result<PortfolioStats, StorageError> {
        Ok(PortfolioStats::compute(&self.plans().await?))
    }

    /// Plans matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn filter_plans(
        &self,
        filter: &PlanFilter,
    ) -> Result<Vec<InstallmentPlan>, StorageError> {
        let plans = self.plans().await?;
        Ok(PlanService::filter(&plans, filter).into_iter().cloned().collect())
    }

    /// Transactions matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn filter_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StorageError> {
        let transactions = self.transactions().await?;
        Ok(TreasuryService::filter(&transactions, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Transactions whose `relatedPlanId` is the given plan.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn transactions_for_plan(
        &self,
        plan_id: PlanId,
    ) -> Result<Vec<Transaction>, StorageError> {
        let transactions = self.transactions().await?;
        let index = RelatedPlanIndex::build(&transactions);
        Ok(index.for_plan(plan_id).iter().map(|tx| (*tx).clone()).collect())
    }

    /// Transactions referencing plans that no longer exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a collection cannot be read.
    pub async fn dangling_transactions(&self) -> Result<Vec<Transaction>, StorageError> {
        let live: HashSet<PlanId> = self.plans().await?.iter().map(|p| p.id).collect();
        let transactions = self.transactions().await?;
        let index = RelatedPlanIndex::build(&transactions);
        Ok(index.dangling(&live).into_iter().cloned().collect())
    }

    /// A plan's payments with ordinal and notional due date.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound` for an unknown plan, or a storage error.
    pub async fn payment_schedule(
        &self,
        plan_id: PlanId,
    ) -> Result<Vec<ScheduledPayment>, SessionError> {
        Ok(PlanService::schedule(&self.existing_plan(plan_id).await?))
    }

    /// A plan's payments grouped by month.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound` for an unknown plan, or a storage error.
    pub async fn monthly_summary(
        &self,
        plan_id: PlanId,
    ) -> Result<Vec<MonthlySummary>, SessionError> {
        Ok(monthly_summary(&self.existing_plan(plan_id).await?))
    }

    // ------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------

    /// Insert or fully replace a customer.
    ///
    /// Returns `true` when the customer was new.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or written.
    pub async fn upsert_customer(&self, customer: Customer) -> Result<bool, SessionError> {
        let mut customers = self.customers().await?;
        let customer_id = customer.id;
        let inserted = CustomerRegistry::upsert(&mut customers, customer);
        replace_all(&self.store, Collection::Customers, &customers).await?;

        info!(customer_id = %customer_id, inserted, "Customer saved");
        Ok(inserted)
    }

    /// Set a customer's tier and feedback.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown customer, or a storage error.
    pub async fn classify_customer(
        &self,
        id: CustomerId,
        status: CustomerStatus,
        feedback: Option<String>,
    ) -> Result<Customer, SessionError> {
        let mut customers = self.customers().await?;
        let updated = match CustomerRegistry::classify(&mut customers, id, status, feedback) {
            Ok(customer) => customer,
            Err(e) => {
                warn!(customer_id = %id, error = %e, "Classification rejected");
                return Err(e.into());
            }
        };
        replace_all(&self.store, Collection::Customers, &customers).await?;

        info!(customer_id = %id, status = %status, "Customer classified");
        Ok(updated)
    }

    /// Whether starting a plan for this customer needs explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown customer, or a storage error.
    pub async fn requires_confirmation(&self, id: CustomerId) -> Result<bool, SessionError> {
        let customer = self
            .customer(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;
        Ok(CustomerRegistry::requires_confirmation(&customer))
    }

    // ------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------

    /// Create a plan with its seed transactions.
    ///
    /// Writes, in order: the customer (if new), the plan, the transactions.
    /// Blocked customers are not refused here; callers gate them with
    /// [`Session::requires_confirmation`] first.
    ///
    /// # Errors
    ///
    /// Returns a plan or customer rejection, or a storage error.
    pub async fn create_plan(
        &self,
        input: CreatePlanInput,
    ) -> Result<InstallmentPlan, SessionError> {
        let mut customers = self.customers().await?;
        let mut plans = self.plans().await?;
        let mut transactions = self.transactions().await?;

        let creation = match PlanService::create(input, &customers, self.today()) {
            Ok(creation) => creation,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Plan creation rejected");
                return Err(e.into());
            }
        };

        if let Some(customer) = creation.new_customer.clone() {
            let customer_id = customer.id;
            CustomerRegistry::upsert(&mut customers, customer);
            replace_all(&self.store, Collection::Customers, &customers).await?;
            info!(customer_id = %customer_id, "Customer registered with plan");
        }

        PlanService::add(&mut plans, creation.plan.clone());
        replace_all(&self.store, Collection::Plans, &plans).await?;

        for tx in creation.transactions() {
            TreasuryService::add(&mut transactions, tx.clone());
        }
        replace_all(&self.store, Collection::Transactions, &transactions).await?;

        let plan = creation.plan;
        info!(
            plan_id = %plan.id,
            customer_id = %plan.customer_id,
            total_price = %plan.total_price_to_customer,
            remaining = %plan.remaining_balance,
            "Plan created"
        );
        Ok(plan)
    }

    /// Record a payment and its mirrored deposit.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound`, a payment rejection, or a storage error.
    pub async fn add_payment(
        &self,
        plan_id: PlanId,
        input: PaymentInput,
    ) -> Result<Transaction, SessionError> {
        let mut plans = self.plans().await?;
        let plan =
            PlanService::find_mut(&mut plans, plan_id).ok_or(PlanError::PlanNotFound(plan_id))?;

        let amount = input.amount;
        let deposit = match PlanService::add_payment(plan, input) {
            Ok(deposit) => deposit,
            Err(e) => {
                warn!(plan_id = %plan_id, amount = %amount, error = %e, "Payment rejected");
                return Err(e.into());
            }
        };
        let (remaining, status) = (plan.remaining_balance, plan.status);
        replace_all(&self.store, Collection::Plans, &plans).await?;

        let mut transactions = self.transactions().await?;
        TreasuryService::add(&mut transactions, deposit.clone());
        replace_all(&self.store, Collection::Transactions, &transactions).await?;

        info!(
            plan_id = %plan_id,
            amount = %amount,
            safe = %deposit.safe(),
            remaining = %remaining,
            status = %status,
            "Payment recorded"
        );
        Ok(deposit)
    }

    /// Delete a payment and record the correcting expense.
    ///
    /// Returns `None`, writing nothing, if the plan or payment is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a collection cannot be read or written.
    pub async fn delete_payment(
        &self,
        plan_id: PlanId,
        payment_id: PaymentId,
    ) -> Result<Option<PaymentReversal>, SessionError> {
        let today = self.today();
        let mut plans = self.plans().await?;
        let Some(plan) = PlanService::find_mut(&mut plans, plan_id) else {
            debug!(plan_id = %plan_id, "Payment delete on missing plan ignored");
            return Ok(None);
        };
        let Some(reversal) = PlanService::delete_payment(plan, payment_id, today) else {
            debug!(
                plan_id = %plan_id,
                payment_id = %payment_id,
                "Payment delete on missing payment ignored"
            );
            return Ok(None);
        };
        let (remaining, status) = (plan.remaining_balance, plan.status);
        replace_all(&self.store, Collection::Plans, &plans).await?;

        let mut transactions = self.transactions().await?;
        TreasuryService::add(&mut transactions, reversal.correction.clone());
        replace_all(&self.store, Collection::Transactions, &transactions).await?;

        info!(
            plan_id = %plan_id,
            payment_id = %payment_id,
            amount = %reversal.payment.amount,
            safe = %reversal.correction.safe(),
            remaining = %remaining,
            status = %status,
            "Payment deleted and reversed"
        );
        Ok(Some(reversal))
    }

    /// Delete a plan. Its transactions stay in the ledger.
    ///
    /// Returns `false`, writing nothing, if the plan is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or written.
    pub async fn delete_plan(&self, plan_id: PlanId) -> Result<bool, SessionError> {
        let mut plans = self.plans().await?;
        if !PlanService::delete(&mut plans, plan_id) {
            debug!(plan_id = %plan_id, "Delete of missing plan ignored");
            return Ok(false);
        }
        replace_all(&self.store, Collection::Plans, &plans).await?;

        info!(plan_id = %plan_id, "Plan deleted");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Treasury
    // ------------------------------------------------------------------

    /// Prepend a transaction as built by the caller, without validation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or written.
    pub async fn add_transaction(&self, tx: Transaction) -> Result<(), SessionError> {
        let mut transactions = self.transactions().await?;
        let (id, kind, amount, safe) = (tx.id, tx.kind, tx.amount, tx.safe());
        TreasuryService::add(&mut transactions, tx);
        replace_all(&self.store, Collection::Transactions, &transactions).await?;

        info!(
            transaction_id = %id,
            kind = ?kind,
            amount = %amount,
            safe = %safe,
            "Transaction added"
        );
        Ok(())
    }

    /// Validate and record a manual deposit or expense.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` for amounts `<= 0`, or a storage error.
    pub async fn record_manual_transaction(
        &self,
        input: ManualEntryInput,
    ) -> Result<Transaction, SessionError> {
        let tx = match TreasuryService::manual_entry(input) {
            Ok(tx) => tx,
            Err(e) => {
                warn!(error = %e, "Manual entry rejected");
                return Err(e.into());
            }
        };
        self.add_transaction(tx.clone()).await?;
        Ok(tx)
    }

    /// Delete a transaction.
    ///
    /// Returns `false`, writing nothing, if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or written.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<bool, SessionError> {
        let mut transactions = self.transactions().await?;
        if !TreasuryService::delete(&mut transactions, id) {
            debug!(transaction_id = %id, "Delete of missing transaction ignored");
            return Ok(false);
        }
        replace_all(&self.store, Collection::Transactions, &transactions).await?;

        info!(transaction_id = %id, "Transaction deleted");
        Ok(true)
    }
}
