//! Transaction aggregation.
//!
//! Pure functions over a slice of already-fetched, already user-scoped
//! transaction records. Grouping uses exact string equality on the category
//! label, and all sums use `Decimal` arithmetic.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use super::types::{GroupKey, SummaryRow, TransactionKind, TransactionRecord};

/// Expense totals per category, largest total first.
///
/// Ties break on category name ascending so repeated runs over the same
/// records produce identical row sequences.
#[must_use]
pub fn spending_by_category(records: &[TransactionRecord]) -> Vec<SummaryRow> {
    totals_by_category(records, TransactionKind::Expense)
}

/// Income totals per category, largest total first.
///
/// Same ordering contract as [`spending_by_category`].
#[must_use]
pub fn income_by_category(records: &[TransactionRecord]) -> Vec<SummaryRow> {
    totals_by_category(records, TransactionKind::Income)
}

fn totals_by_category(records: &[TransactionRecord], kind: TransactionKind) -> Vec<SummaryRow> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();

    for record in records.iter().filter(|r| r.kind == kind) {
        *totals.entry(record.category.as_str()).or_insert(Decimal::ZERO) += record.amount;
    }

    // BTreeMap iteration is category-ascending; the stable sort on total
    // keeps that as the tie-break order.
    let mut rows: Vec<SummaryRow> = totals
        .into_iter()
        .map(|(category, total)| SummaryRow {
            key: GroupKey::Category(category.to_string()),
            total,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Per-month income and expense totals over the trailing `months_back`
/// calendar months ending at `today`'s month, oldest month first.
///
/// Within a month, the expense row precedes the income row. Records outside
/// the window are ignored, so callers may hand over unbounded history.
#[must_use]
pub fn monthly_trends(
    records: &[TransactionRecord],
    today: NaiveDate,
    months_back: u32,
) -> Vec<SummaryRow> {
    if months_back == 0 {
        return Vec::new();
    }

    let window_start = trends_window_start(today, months_back);
    let window_end = month_floor(today);

    let mut totals: BTreeMap<(NaiveDate, TransactionKind), Decimal> = BTreeMap::new();

    for record in records {
        let month = month_floor(record.occurred_on);
        if month < window_start || month > window_end {
            continue;
        }
        *totals.entry((month, record.kind)).or_insert(Decimal::ZERO) += record.amount;
    }

    // Key order is (month asc, kind asc) with Expense < Income.
    totals
        .into_iter()
        .map(|((month, kind), total)| SummaryRow {
            key: GroupKey::Month { month, kind },
            total,
        })
        .collect()
}

/// First day of the oldest month inside a trailing `months_back` window
/// ending at `today`'s month.
#[must_use]
pub fn trends_window_start(today: NaiveDate, months_back: u32) -> NaiveDate {
    let oldest = today
        .checked_sub_months(Months::new(months_back.saturating_sub(1)))
        .unwrap_or(today);
    month_floor(oldest)
}

/// First day of the date's calendar month.
fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}
