//! Report selection service.
//!
//! Single entry point translating a report request into structured rows or
//! an export payload. The caller fetches the transaction records the
//! selector asks for (via [`ReportService::feed_filter`]), then hands them
//! to [`ReportService::generate`] together with the request.

use chrono::NaiveDate;

use super::aggregate;
use super::error::ReportError;
use super::export;
use super::types::{
    DateRange, ExportFormat, ReportKind, ReportOutput, ReportRequest, TransactionKind,
    TransactionRecord,
};

/// Service for generating reports from transaction records.
pub struct ReportService;

impl ReportService {
    /// How many trailing calendar months a trend report covers.
    pub const TRENDS_MONTHS_BACK: u32 = 12;

    /// The feed query a request needs: an optional kind filter plus a date
    /// window.
    ///
    /// Category reports pass the request's own range through and filter by
    /// the matching kind at the feed. Trend reports read both kinds over the
    /// trailing-months window ending at `today`.
    #[must_use]
    pub fn feed_filter(
        request: &ReportRequest,
        today: NaiveDate,
    ) -> (Option<TransactionKind>, DateRange) {
        match request.kind {
            ReportKind::Spending => (Some(TransactionKind::Expense), request.range.clone()),
            ReportKind::Income => (Some(TransactionKind::Income), request.range.clone()),
            ReportKind::Trends => (
                None,
                DateRange {
                    start: Some(aggregate::trends_window_start(
                        today,
                        Self::TRENDS_MONTHS_BACK,
                    )),
                    end: None,
                },
            ),
        }
    }

    /// Generates a report from already-fetched records.
    ///
    /// Validates the requested range, runs the matching aggregation, and
    /// serializes the rows when an export format is set. An empty record
    /// slice produces empty rows (or an empty-but-valid document), never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if the range bounds are
    /// reversed, or `ReportError::Export` if serialization fails.
    pub fn generate(
        request: &ReportRequest,
        records: &[TransactionRecord],
        today: NaiveDate,
    ) -> Result<ReportOutput, ReportError> {
        request.range.validate()?;

        let rows = match request.kind {
            ReportKind::Spending => aggregate::spending_by_category(records),
            ReportKind::Income => aggregate::income_by_category(records),
            ReportKind::Trends => {
                aggregate::monthly_trends(records, today, Self::TRENDS_MONTHS_BACK)
            }
        };

        match request.export {
            None => Ok(ReportOutput::Rows(rows)),
            Some(ExportFormat::Csv) => {
                export::csv::export(&rows, &request.kind.filename()).map(ReportOutput::Export)
            }
            Some(ExportFormat::Pdf) => {
                export::pdf::export(&rows, &request.kind.filename()).map(ReportOutput::Export)
            }
        }
    }
}
