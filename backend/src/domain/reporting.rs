//! Dashboard aggregation and time-windowed reporting.
//!
//! Every summary the API serves is derived here: totals and balance,
//! the recent-transactions merge, year/month and rolling-window filters,
//! daily time series, and flat export rows. All functions are pure and
//! stateless over in-memory collections, so callers may invoke them
//! concurrently on the same data without coordination.
//!
//! Two different clocks are in play and must not be mixed up:
//! `recorded_at` (when a record was entered) drives recency ranking,
//! `occurred_on` (what date the money is attributed to) drives every
//! period filter.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::models::transaction::{Transaction, TransactionKind};

/// How many entries the dashboard's recent-transactions list shows.
pub const DEFAULT_RECENT_LIMIT: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Income and expense sums with their difference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Sum amounts per kind and derive the balance.
///
/// Empty input yields an all-zero result. Sums are exact decimal
/// arithmetic; many small amounts accumulate without drift.
pub fn totals(records: &[Transaction]) -> Totals {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for record in records {
        match record.kind {
            TransactionKind::Income => total_income += record.amount,
            TransactionKind::Expense => total_expense += record.amount,
        }
    }

    Totals {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Merge both collections and keep the `limit` most recently *entered*
/// records, ranked by `recorded_at` descending.
///
/// This is a "what was entered most recently" view, not a "what happened
/// most recently" view; a backdated record entered a minute ago outranks
/// everything entered before it. The sort is stable, so records sharing a
/// `recorded_at` keep concatenation order: income before expense.
pub fn recent_transactions(
    incomes: &[Transaction],
    expenses: &[Transaction],
    limit: usize,
) -> Result<Vec<Transaction>, ReportError> {
    if limit == 0 {
        return Err(ReportError::InvalidArgument(
            "limit must be at least 1".to_string(),
        ));
    }

    let mut merged = Vec::with_capacity(incomes.len() + expenses.len());
    merged.extend_from_slice(incomes);
    merged.extend_from_slice(expenses);

    merged.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    merged.truncate(limit);

    Ok(merged)
}

/// Keep records whose `occurred_on` falls in the given calendar year, and
/// month when one is supplied. Months are 1-12; anything else is rejected
/// rather than coerced.
pub fn filter_by_period(
    records: &[Transaction],
    year: i32,
    month: Option<u32>,
) -> Result<Vec<Transaction>, ReportError> {
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return Err(ReportError::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                m
            )));
        }
    }

    Ok(records
        .iter()
        .filter(|t| {
            t.occurred_on.year() == year
                && month.map_or(true, |m| t.occurred_on.month() == m)
        })
        .cloned()
        .collect())
}

/// Keep records attributed to the last `days` days counting back from
/// `today`, cutoff inclusive. Ignores calendar boundaries entirely.
///
/// `today` is an explicit parameter: the engine never reads the clock.
pub fn filter_rolling_window(
    records: &[Transaction],
    today: NaiveDate,
    days: u32,
) -> Vec<Transaction> {
    let cutoff = today - Duration::days(i64::from(days));
    records
        .iter()
        .filter(|t| t.occurred_on >= cutoff)
        .cloned()
        .collect()
}

/// One day's aggregated income and expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    /// Short display key, e.g. "15 Jan"
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Group records by `occurred_on` day, one bucket per distinct day,
/// emitted in ascending chronological order regardless of input order.
pub fn time_series(records: &[Transaction]) -> Vec<DailyBucket> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for record in records {
        let entry = buckets.entry(record.occurred_on).or_default();
        match record.kind {
            TransactionKind::Income => entry.0 += record.amount,
            TransactionKind::Expense => entry.1 += record.amount,
        }
    }

    buckets
        .into_iter()
        .map(|(date, (income, expense))| DailyBucket {
            date,
            label: day_label(date),
            income,
            expense,
        })
        .collect()
}

fn day_label(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// A flat row ready for CSV or spreadsheet serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub title: String,
    pub amount: Decimal,
    /// ISO date (YYYY-MM-DD); parses back to the original calendar date
    pub date: String,
    pub description: String,
}

/// Flatten records for export. Pure formatting, no business logic; input
/// order is preserved and amounts are carried exactly.
pub fn export_rows(records: &[Transaction]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|t| ExportRow {
            title: t.title.clone(),
            amount: t.amount,
            date: t.occurred_on.format("%Y-%m-%d").to_string(),
            description: t.description.clone(),
        })
        .collect()
}
