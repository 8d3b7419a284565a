//! Paginated document (PDF) export.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::super::error::ReportError;
use super::super::types::{ExportPayload, SummaryRow};

/// MIME type of the document export.
pub const CONTENT_TYPE: &str = "application/pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 20.0;
const TOP_CURSOR_MM: f32 = 277.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const TITLE_GAP_MM: f32 = 14.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 11.0;

/// Serializes summary rows into a paginated A4 document.
///
/// The first page opens with a title line carrying the filename; each row is
/// drawn as `<group key>: <total>` and advances a fixed line height. A row
/// that would cross the bottom margin starts a new page with the cursor
/// reset to the top. Empty rows yield a valid title-only page.
///
/// # Errors
///
/// Returns `ReportError::Export` if document assembly fails.
pub fn export(rows: &[SummaryRow], filename: &str) -> Result<ExportPayload, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        filename,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Export(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor = TOP_CURSOR_MM;

    layer.use_text(
        filename,
        TITLE_SIZE_PT,
        Mm(LEFT_MARGIN_MM),
        Mm(cursor),
        &font,
    );
    cursor -= TITLE_GAP_MM;

    for row in rows {
        if cursor < BOTTOM_MARGIN_MM {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "report");
            layer = doc.get_page(page).get_layer(page_layer);
            cursor = TOP_CURSOR_MM;
        }

        layer.use_text(
            format!("{}: {}", row.key, row.total),
            BODY_SIZE_PT,
            Mm(LEFT_MARGIN_MM),
            Mm(cursor),
            &font,
        );
        cursor -= LINE_HEIGHT_MM;
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(ExportPayload {
        bytes,
        filename: format!("{filename}.pdf"),
        content_type: CONTENT_TYPE,
    })
}
