//! Transaction management routes.
//!
//! Routine CRUD over the authenticated user's transactions. The reporting
//! engine reads the same table through its own feed query.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use moneta_db::entities::{kinds::TransactionKind, transactions};
use moneta_db::repositories::transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
use moneta_shared::{PageRequest, PageResponse};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{transaction_id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by kind ("income" or "expense").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by exact category label.
    pub category: Option<String>,
    /// Filter by date range start (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100).
    pub per_page: Option<u32>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Amount (positive).
    pub amount: Decimal,
    /// Transaction kind ("income" or "expense").
    #[serde(rename = "type")]
    pub kind: String,
    /// Category label.
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// The day the transaction occurred (YYYY-MM-DD).
    pub date: NaiveDate,
}

/// Request body for updating a transaction. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Amount.
    pub amount: String,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Category label.
    pub category: String,
    /// Description.
    pub description: String,
    /// The day the transaction occurred.
    pub date: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_kind(raw: &str) -> Option<TransactionKind> {
    raw.parse::<moneta_core::reports::TransactionKind>()
        .ok()
        .map(TransactionKind::from)
}

fn transaction_to_response(model: &transactions::Model) -> TransactionResponse {
    TransactionResponse {
        id: model.id,
        amount: format!("{:.2}", model.amount),
        kind: moneta_core::reports::TransactionKind::from(model.kind).to_string(),
        category: model.category.clone(),
        description: model.description.clone(),
        date: model.date.to_string(),
        created_at: model.created_at.to_rfc3339(),
        updated_at: model.updated_at.to_rfc3339(),
    }
}

fn invalid_kind_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_transaction_type",
            "message": "Transaction type must be 'income' or 'expense'"
        })),
    )
        .into_response()
}

fn validation_error(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "validation_error", "message": message })),
    )
        .into_response()
}

fn not_found_response(transaction_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Transaction {transaction_id} not found")
        })),
    )
        .into_response()
}

fn internal_error_response() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List the user's transactions with filters.
#[axum::debug_handler]
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
    auth: AuthUser,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref() {
        None => None,
        Some(raw) => match parse_kind(raw) {
            Some(kind) => Some(kind),
            None => return invalid_kind_response(),
        },
    };

    let filter = TransactionFilter {
        kind,
        category: query.category,
        date_from: query.start_date,
        date_to: query.end_date,
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(20).clamp(1, 100),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list(auth.user_id(), filter, &page).await {
        Ok((rows, total)) => {
            let items: Vec<TransactionResponse> =
                rows.iter().map(transaction_to_response).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(items, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error_response()
        }
    }
}

/// POST `/transactions` - Create a new transaction.
#[axum::debug_handler]
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let Some(kind) = parse_kind(&payload.kind) else {
        return invalid_kind_response();
    };
    if payload.amount <= Decimal::ZERO {
        return validation_error("Amount must be greater than 0");
    }
    if payload.category.trim().is_empty() {
        return validation_error("Category is required");
    }

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        user_id: auth.user_id(),
        amount: payload.amount,
        kind,
        category: payload.category,
        description: payload.description,
        date: payload.date,
    };

    match repo.create(input).await {
        Ok(model) => {
            (StatusCode::CREATED, Json(transaction_to_response(&model))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            internal_error_response()
        }
    }
}

/// GET `/transactions/{transaction_id}` - Fetch one transaction.
#[axum::debug_handler]
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get(auth.user_id(), transaction_id).await {
        Ok(model) => (StatusCode::OK, Json(transaction_to_response(&model))).into_response(),
        Err(TransactionError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to get transaction");
            internal_error_response()
        }
    }
}

/// PUT `/transactions/{transaction_id}` - Update one transaction.
#[axum::debug_handler]
async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
    Json(payload): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let kind = match payload.kind.as_deref() {
        None => None,
        Some(raw) => match parse_kind(raw) {
            Some(kind) => Some(kind),
            None => return invalid_kind_response(),
        },
    };
    if let Some(amount) = payload.amount {
        if amount <= Decimal::ZERO {
            return validation_error("Amount must be greater than 0");
        }
    }
    if let Some(category) = &payload.category {
        if category.trim().is_empty() {
            return validation_error("Category is required");
        }
    }

    let repo = TransactionRepository::new((*state.db).clone());
    let input = UpdateTransactionInput {
        amount: payload.amount,
        kind,
        category: payload.category,
        description: payload.description,
        date: payload.date,
    };

    match repo.update(auth.user_id(), transaction_id, input).await {
        Ok(model) => (StatusCode::OK, Json(transaction_to_response(&model))).into_response(),
        Err(TransactionError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            internal_error_response()
        }
    }
}

/// DELETE `/transactions/{transaction_id}` - Delete one transaction.
#[axum::debug_handler]
async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(TransactionError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            internal_error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("income"), Some(TransactionKind::Income));
        assert_eq!(parse_kind("expense"), Some(TransactionKind::Expense));
        assert_eq!(parse_kind("transfer"), None);
        assert_eq!(parse_kind(""), None);
    }
}
