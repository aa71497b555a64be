//! Dashboard orchestration: fetch a user's records and derive summaries
//! through the reporting engine.
//!
//! Recency is always `recorded_at` and period filtering is always
//! `occurred_on`, for every view served here. There is exactly one
//! implementation of these rules (`reporting`), so the dashboard, the
//! period report, and the income breakdown can never drift apart.
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::errors::DomainError;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::domain::reporting::{self, DailyBucket, Totals, DEFAULT_RECENT_LIMIT};
use crate::storage::{DbConnection, TransactionRepository};

/// Rolling window length for the income-source breakdown.
pub const INCOME_SOURCES_WINDOW_DAYS: u32 = 60;

/// All-time totals plus the most recently entered records.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub recent_transactions: Vec<Transaction>,
}

/// Aggregates over one calendar year, optionally narrowed to a month.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub year: i32,
    pub month: Option<u32>,
    pub totals: Totals,
    /// Matching records, most recently entered first
    pub transactions: Vec<Transaction>,
    /// Daily buckets in ascending chronological order
    pub series: Vec<DailyBucket>,
}

/// Income records inside the rolling window, one slice per record.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSources {
    pub window_days: u32,
    pub total: Decimal,
    pub sources: Vec<Transaction>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: TransactionRepository,
}

impl DashboardService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: TransactionRepository::new(db),
        }
    }

    /// All-time totals and the six most recently entered transactions.
    pub async fn summary(&self, owner: &str) -> Result<DashboardSummary, DomainError> {
        let incomes = self
            .repository
            .list_by_owner(owner, TransactionKind::Income)
            .await?;
        let expenses = self
            .repository
            .list_by_owner(owner, TransactionKind::Expense)
            .await?;

        let mut all = Vec::with_capacity(incomes.len() + expenses.len());
        all.extend_from_slice(&incomes);
        all.extend_from_slice(&expenses);

        let totals = reporting::totals(&all);
        let recent_transactions =
            reporting::recent_transactions(&incomes, &expenses, DEFAULT_RECENT_LIMIT)?;

        Ok(DashboardSummary {
            totals,
            recent_transactions,
        })
    }

    /// Totals, matching records, and a daily series for one period.
    pub async fn period_report(
        &self,
        owner: &str,
        year: i32,
        month: Option<u32>,
    ) -> Result<PeriodReport, DomainError> {
        let incomes = self
            .repository
            .list_by_owner(owner, TransactionKind::Income)
            .await?;
        let expenses = self
            .repository
            .list_by_owner(owner, TransactionKind::Expense)
            .await?;

        let mut merged = Vec::with_capacity(incomes.len() + expenses.len());
        merged.extend(incomes);
        merged.extend(expenses);

        let mut transactions = reporting::filter_by_period(&merged, year, month)?;
        let totals = reporting::totals(&transactions);
        let series = reporting::time_series(&transactions);

        // Display order matches the recent list: entry time, stable, so
        // income precedes expense on identical timestamps.
        transactions.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        Ok(PeriodReport {
            year,
            month,
            totals,
            transactions,
            series,
        })
    }

    /// Income entries attributed to the last 60 days counting back from
    /// `today`, one slice per record.
    pub async fn income_sources(
        &self,
        owner: &str,
        today: NaiveDate,
    ) -> Result<IncomeSources, DomainError> {
        let incomes = self
            .repository
            .list_by_owner(owner, TransactionKind::Income)
            .await?;

        let sources =
            reporting::filter_rolling_window(&incomes, today, INCOME_SOURCES_WINDOW_DAYS);
        let total = reporting::totals(&sources).total_income;

        Ok(IncomeSources {
            window_days: INCOME_SOURCES_WINDOW_DAYS,
            total,
            sources,
        })
    }
}
