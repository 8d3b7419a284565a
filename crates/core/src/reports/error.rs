//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Unrecognized report kind.
    #[error("Invalid report type: {0}")]
    InvalidReportKind(String),

    /// Unrecognized export format.
    #[error("Invalid export format: {0}")]
    InvalidExportFormat(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Export serialization failed.
    #[error("Export failed: {0}")]
    Export(String),
}
