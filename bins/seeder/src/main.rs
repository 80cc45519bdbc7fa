//! Demo data seeder for Aqsat development and testing.
//!
//! Seeds customers, installment plans, payments and manual treasury entries
//! into the configured record store, then logs the resulting figures.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use aqsat_core::advisory::{GeminiAdvisor, PendingAdvisory, PlanSummary};
use aqsat_core::calculator::{PlanCalculator, PlanInputs};
use aqsat_core::customer::{CustomerStatus, NewCustomer};
use aqsat_core::plan::{CreatePlanInput, CustomerSelection, PaymentInput};
use aqsat_core::treasury::{ManualEntryInput, SafeType, TransactionKind};
use aqsat_shared::AppConfig;
use aqsat_store::{OpendalStore, RecordStore, Session};
use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = OpendalStore::from_provider(&config.storage.provider)?;
    info!(provider = store.provider(), "Record store ready");
    let session = Session::new(store);

    if !session.plans().await?.is_empty() {
        info!("Plans already present, skipping seed");
        return report(&session).await;
    }

    let advisor = Arc::new(GeminiAdvisor::new(config.advisor.clone())?);
    let today = Utc::now().date_naive();

    info!("Seeding opening cash...");
    seed_opening_cash(&session, today).await?;

    info!("Seeding plans...");
    seed_plans(&session, advisor, today).await?;

    info!("Seeding complete!");
    report(&session).await
}

async fn seed_opening_cash<S: RecordStore>(
    session: &Session<S>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    for (safe, amount) in [
        (SafeType::Cash, Decimal::from(50_000)),
        (SafeType::Instapay, Decimal::from(15_000)),
        (SafeType::Wallet, Decimal::from(5_000)),
    ] {
        session
            .record_manual_transaction(ManualEntryInput {
                kind: TransactionKind::Deposit,
                amount,
                category: None,
                description: Some("Opening balance".to_string()),
                date: today,
                safe,
            })
            .await?;
    }

    session
        .record_manual_transaction(ManualEntryInput {
            kind: TransactionKind::Expense,
            amount: Decimal::from(1_500),
            category: Some("Shop rent".to_string()),
            description: None,
            date: today,
            safe: SafeType::Cash,
        })
        .await?;
    Ok(())
}

struct DemoPlan {
    customer: &'static str,
    phone: &'static str,
    product: &'static str,
    base_price: i64,
    down_payment: i64,
    months: i32,
    payments: usize,
}

const DEMO_PLANS: [DemoPlan; 3] = [
    DemoPlan {
        customer: "Karim Adel",
        phone: "01012345678",
        product: "Refrigerator",
        base_price: 10_000,
        down_payment: 2_000,
        months: 10,
        payments: 3,
    },
    DemoPlan {
        customer: "Mona Hassan",
        phone: "01198765432",
        product: "Washing machine",
        base_price: 8_000,
        down_payment: 0,
        months: 6,
        payments: 6,
    },
    DemoPlan {
        customer: "Tarek Samir",
        phone: "01234567890",
        product: "Laptop",
        base_price: 20_000,
        down_payment: 5_000,
        months: 12,
        payments: 0,
    },
];

async fn seed_plans<S: RecordStore>(
    session: &Session<S>,
    advisor: Arc<GeminiAdvisor>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let start = today
        .checked_sub_months(Months::new(6))
        .context("start date out of range")?;

    for demo in &DEMO_PLANS {
        let inputs = PlanInputs {
            base_price: Decimal::from(demo.base_price),
            seller_percentage: Decimal::from(30),
            customer_percentage: Decimal::from(40),
            down_payment: Decimal::from(demo.down_payment),
            months: demo.months,
        };
        let preview = PlanCalculator::preview(&inputs);

        let mut pending = PendingAdvisory::spawn(
            advisor.clone(),
            PlanSummary::from_preview(demo.product, &inputs, &preview),
        );
        // Give the advisor a moment; the plan is committed either way.
        tokio::time::sleep(Duration::from_millis(250)).await;
        let ai_analysis = pending.try_take();
        pending.abandon();

        let plan = session
            .create_plan(CreatePlanInput {
                customer: CustomerSelection::New(NewCustomer {
                    name: demo.customer.to_string(),
                    phone: demo.phone.to_string(),
                    national_id: String::new(),
                }),
                product_name: demo.product.to_string(),
                inputs,
                start_date: start,
                purchase_safe: SafeType::Cash,
                down_payment_safe: SafeType::Instapay,
                notes: None,
                ai_analysis,
            })
            .await?;

        for ordinal in 1..=demo.payments {
            let date = start
                .checked_add_months(Months::new(u32::try_from(ordinal)?))
                .context("payment date out of range")?;
            let safe = if ordinal % 2 == 0 { SafeType::Wallet } else { SafeType::Cash };
            let owed = session
                .plan(plan.id)
                .await?
                .map_or(Decimal::ZERO, |p| p.remaining_balance);
            let amount = if i32::try_from(ordinal)? == demo.months {
                owed
            } else {
                plan.monthly_installment.round_dp(2).min(owed)
            };
            session
                .add_payment(
                    plan.id,
                    PaymentInput {
                        amount,
                        notes: Some(format!("Installment {ordinal}")),
                        date,
                        safe,
                    },
                )
                .await?;
        }

        if demo.payments == 0 {
            session
                .classify_customer(
                    plan.customer_id,
                    CustomerStatus::Bad,
                    Some("Missed the first installment".to_string()),
                )
                .await?;
        }
    }
    Ok(())
}

async fn report<S: RecordStore>(session: &Session<S>) -> anyhow::Result<()> {
    let treasury = session.treasury_stats().await?;
    let portfolio = session.portfolio_stats().await?;

    info!(
        total = %treasury.total.balance,
        cash = %treasury.cash.balance,
        instapay = %treasury.instapay.balance,
        wallet = %treasury.wallet.balance,
        "Treasury balances"
    );
    info!(
        plans = portfolio.plan_count,
        active = portfolio.active_plans,
        profit = %portfolio.total_profit,
        revenue = %portfolio.total_revenue,
        receivables = %portfolio.total_receivables,
        "Portfolio"
    );

    let dangling = session.dangling_transactions().await?;
    if !dangling.is_empty() {
        info!(count = dangling.len(), "Transactions reference deleted plans");
    }
    Ok(())
}
