//! Report data types.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Whether a transaction adds to or subtracts from the user's funds.
///
/// Variant order is meaningful: within a trend month, expense rows sort
/// before income rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    Expense,
    /// Money received.
    Income,
}

impl TransactionKind {
    /// Returns the lowercase string form used in APIs and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown transaction kind: {s}")),
        }
    }
}

/// A single transaction as seen by the reporting engine.
///
/// This is a borrowed, already user-scoped view of a stored transaction;
/// the engine never mutates or persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction amount (always positive; the kind carries the sign).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Free-form category label. Distinct spellings are distinct groups.
    pub category: String,
    /// The day the transaction occurred.
    pub occurred_on: NaiveDate,
}

/// An optional inclusive date window.
///
/// A missing bound means unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// An unbounded range.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Checks that the bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if both bounds are present and
    /// start is after end.
    pub fn validate(&self) -> Result<(), ReportError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err(ReportError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Returns true if the date falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// The three supported aggregation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Expense totals grouped by category.
    Spending,
    /// Income totals grouped by category.
    Income,
    /// Per-month income/expense totals over the trailing months.
    Trends,
}

impl ReportKind {
    /// Returns the lowercase string form used in request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spending => "spending",
            Self::Income => "income",
            Self::Trends => "trends",
        }
    }

    /// Base filename for exports of this report; the exporter appends its
    /// own extension.
    #[must_use]
    pub fn filename(self) -> String {
        format!("{}_report", self.as_str())
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending" => Ok(Self::Spending),
            "income" => Ok(Self::Income),
            "trends" => Ok(Self::Trends),
            _ => Err(ReportError::InvalidReportKind(s.to_string())),
        }
    }
}

/// Serialization targets for summary rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Delimited text table.
    Csv,
    /// Paginated printable document.
    Pdf,
}

impl ExportFormat {
    /// Returns the lowercase string form used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ReportError::InvalidExportFormat(s.to_string())),
        }
    }
}

/// The grouping key of one summary row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    /// A category label (spending/income reports).
    Category(String),
    /// A calendar month and kind (trend reports).
    Month {
        /// First day of the calendar month.
        month: NaiveDate,
        /// Income or expense.
        kind: TransactionKind,
    },
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(category) => f.write_str(category),
            Self::Month { month, kind } => write!(f, "{} {kind}", month.format("%Y-%m")),
        }
    }
}

/// One aggregated output unit: a group key plus its summed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// What this row groups.
    pub key: GroupKey,
    /// Exact decimal sum of the matching transaction amounts.
    pub total: Decimal,
}

/// A report request, constructed per call and never stored.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Which aggregation to run.
    pub kind: ReportKind,
    /// Date window for category reports; ignored by trend reports, which
    /// window on the trailing months instead.
    pub range: DateRange,
    /// When set, rows are serialized instead of returned directly.
    pub export: Option<ExportFormat>,
}

/// The outcome of a report request.
#[derive(Debug, Clone)]
pub enum ReportOutput {
    /// Structured rows, for JSON-shaped responses.
    Rows(Vec<SummaryRow>),
    /// A serialized document ready for download.
    Export(ExportPayload),
}

/// A serialized report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    /// The complete document bytes. Never partial: exporters either return
    /// a whole document or an error.
    pub bytes: Vec<u8>,
    /// Suggested filename, extension included.
    pub filename: String,
    /// MIME type for the HTTP boundary.
    pub content_type: &'static str,
}
