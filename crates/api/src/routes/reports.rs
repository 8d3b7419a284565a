//! Report routes.
//!
//! The reporting engine's HTTP boundary: one endpoint that returns
//! structured summary rows or streams a CSV/PDF export of them.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use moneta_core::reports::{
    DateRange, ExportFormat, ExportPayload, GroupKey, ReportKind, ReportOutput, ReportRequest,
    ReportService, SummaryRow,
};
use moneta_db::repositories::transaction::TransactionRepository;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/{report_type}", get(get_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for report requests.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Inclusive range start (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
    /// Export format; omitted means structured rows.
    pub export: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One summary row in a response.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryRowResponse {
    /// A category report row.
    Category {
        /// Category label.
        category: String,
        /// Total amount.
        total: String,
    },
    /// A trend report row.
    Month {
        /// Calendar month (YYYY-MM).
        month: String,
        /// Income or expense.
        kind: String,
        /// Total amount.
        total: String,
    },
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a Decimal as a string with 2 decimal places.
fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Converts a summary row to its response form.
fn summary_row_to_response(row: &SummaryRow) -> SummaryRowResponse {
    match &row.key {
        GroupKey::Category(category) => SummaryRowResponse::Category {
            category: category.clone(),
            total: format_money(row.total),
        },
        GroupKey::Month { month, kind } => SummaryRowResponse::Month {
            month: month.format("%Y-%m").to_string(),
            kind: kind.to_string(),
            total: format_money(row.total),
        },
    }
}

/// Builds the download response for an export payload.
fn export_response(payload: ExportPayload) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, payload.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", payload.filename),
            ),
        ],
        payload.bytes,
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/reports/{report_type}` - Generate a report for the authenticated user.
///
/// Returns structured rows, or a downloadable document when `export` is set.
#[axum::debug_handler]
async fn get_report(
    State(state): State<AppState>,
    Path(report_type): Path<String>,
    Query(query): Query<ReportQuery>,
    auth: AuthUser,
) -> impl IntoResponse {
    // Parse the report kind
    let Ok(kind) = report_type.parse::<ReportKind>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid report type" })),
        )
            .into_response();
    };

    // Parse the export format, if any
    let export = match query.export.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<ExportFormat>() {
            Ok(format) => Some(format),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid export format" })),
                )
                    .into_response();
            }
        },
    };

    let request = ReportRequest {
        kind,
        range: DateRange {
            start: query.start_date,
            end: query.end_date,
        },
        export,
    };

    // Validate date range before touching the feed
    if request.range.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_date_range",
                "message": "Start date must be before or equal to end date"
            })),
        )
            .into_response();
    }

    let today = chrono::Utc::now().date_naive();

    // Run the feed query the selector asks for
    let (kind_filter, feed_range) = ReportService::feed_filter(&request, today);
    let repo = TransactionRepository::new((*state.db).clone());
    let records = match repo
        .list_for_report(auth.user_id(), kind_filter, &feed_range)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Failed to read transaction feed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to generate report"
                })),
            )
                .into_response();
        }
    };

    // Aggregate and, when requested, export
    match ReportService::generate(&request, &records, today) {
        Ok(ReportOutput::Rows(rows)) => {
            let rows: Vec<SummaryRowResponse> =
                rows.iter().map(summary_row_to_response).collect();
            (StatusCode::OK, Json(rows)).into_response()
        }
        Ok(ReportOutput::Export(payload)) => export_response(payload),
        Err(e) => {
            error!(error = %e, "Failed to generate report");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to generate report"
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneta_core::reports::TransactionKind;
    use rust_decimal_macros::dec;

    #[rstest::rstest]
    #[case(dec!(80), "80.00")]
    #[case(dec!(19.5), "19.50")]
    #[case(dec!(1200.25), "1200.25")]
    fn test_format_money_two_decimal_places(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_money(amount), expected);
    }

    #[test]
    fn test_category_row_response() {
        let row = SummaryRow {
            key: GroupKey::Category("food".to_string()),
            total: dec!(80),
        };

        assert_eq!(
            summary_row_to_response(&row),
            SummaryRowResponse::Category {
                category: "food".to_string(),
                total: "80.00".to_string(),
            }
        );
    }

    #[test]
    fn test_month_row_response() {
        let row = SummaryRow {
            key: GroupKey::Month {
                month: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                kind: TransactionKind::Income,
            },
            total: dec!(1200.5),
        };

        assert_eq!(
            summary_row_to_response(&row),
            SummaryRowResponse::Month {
                month: "2024-03".to_string(),
                kind: "income".to_string(),
                total: "1200.50".to_string(),
            }
        );
    }

    #[test]
    fn test_export_response_headers() {
        let payload = ExportPayload {
            bytes: b"Category,Amount\n".to_vec(),
            filename: "spending_report.csv".to_string(),
            content_type: "text/csv",
        };

        let response = export_response(payload);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"spending_report.csv\""
        );
    }
}
