//! Tabular (CSV) export.

use super::super::error::ReportError;
use super::super::types::{ExportPayload, SummaryRow};

/// MIME type of the tabular export.
pub const CONTENT_TYPE: &str = "text/csv";

/// Serializes summary rows into a comma-delimited table.
///
/// The document is a `Category,Amount` header followed by one record per
/// row: the group key's display form and the row's total. Empty rows still
/// yield a valid header-only document.
///
/// # Errors
///
/// Returns `ReportError::Export` if the writer fails, which cannot happen
/// for an in-memory buffer under normal operation.
pub fn export(rows: &[SummaryRow], filename: &str) -> Result<ExportPayload, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Category", "Amount"])
        .map_err(|e| ReportError::Export(e.to_string()))?;

    for row in rows {
        writer
            .write_record([row.key.to_string(), row.total.to_string()])
            .map_err(|e| ReportError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(ExportPayload {
        bytes,
        filename: format!("{filename}.csv"),
        content_type: CONTENT_TYPE,
    })
}
