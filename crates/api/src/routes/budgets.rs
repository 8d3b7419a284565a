//! Budget management routes.
//!
//! Routine CRUD over the authenticated user's budgets.

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
use moneta_db::entities::{budgets, kinds::BudgetPeriod};
use moneta_db::repositories::budget::{
    BudgetError, BudgetRepository, CreateBudgetInput, UpdateBudgetInput,
};
use moneta_shared::{PageRequest, PageResponse};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{budget_id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing budgets.
#[derive(Debug, Deserialize)]
pub struct ListBudgetsQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100).
    pub per_page: Option<u32>,
}

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Category the budget covers.
    pub category: String,
    /// Recurrence period ("monthly", "quarterly", "annual"). Defaults to
    /// monthly.
    pub period: Option<String>,
    /// Budgeted amount (positive).
    pub amount: Decimal,
    /// First day the budget applies (YYYY-MM-DD).
    pub start_date: NaiveDate,
    /// Last day the budget applies (YYYY-MM-DD).
    pub end_date: NaiveDate,
}

/// Request body for updating a budget. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    /// New category.
    pub category: Option<String>,
    /// New period.
    pub period: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: Uuid,
    /// Category the budget covers.
    pub category: String,
    /// Recurrence period.
    pub period: String,
    /// Budgeted amount.
    pub amount: String,
    /// First day the budget applies.
    pub start_date: String,
    /// Last day the budget applies.
    pub end_date: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn budget_to_response(model: &budgets::Model) -> BudgetResponse {
    BudgetResponse {
        id: model.id,
        category: model.category.clone(),
        period: model.period.as_str().to_string(),
        amount: format!("{:.2}", model.amount),
        start_date: model.start_date.to_string(),
        end_date: model.end_date.to_string(),
        created_at: model.created_at.to_rfc3339(),
        updated_at: model.updated_at.to_rfc3339(),
    }
}

fn invalid_period_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_budget_period",
            "message": "Budget period must be 'monthly', 'quarterly', or 'annual'"
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

fn not_found_response(budget_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Budget {budget_id} not found")
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

/// GET `/budgets` - List the user's budgets.
#[axum::debug_handler]
async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<ListBudgetsQuery>,
    auth: AuthUser,
) -> impl IntoResponse {
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(20).clamp(1, 100),
    };

    let repo = BudgetRepository::new((*state.db).clone());
    match repo.list(auth.user_id(), &page).await {
        Ok((rows, total)) => {
            let items: Vec<BudgetResponse> = rows.iter().map(budget_to_response).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(items, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list budgets");
            internal_error_response()
        }
    }
}

/// POST `/budgets` - Create a new budget.
#[axum::debug_handler]
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    let period = match payload.period.as_deref() {
        None => BudgetPeriod::Monthly,
        Some(raw) => match raw.parse::<BudgetPeriod>() {
            Ok(period) => period,
            Err(_) => return invalid_period_response(),
        },
    };
    if payload.amount <= Decimal::ZERO {
        return validation_error("Amount must be greater than 0");
    }
    if payload.category.trim().is_empty() {
        return validation_error("Category is required");
    }
    if payload.start_date > payload.end_date {
        return validation_error("Start date must be before or equal to end date");
    }

    let repo = BudgetRepository::new((*state.db).clone());
    let input = CreateBudgetInput {
        user_id: auth.user_id(),
        category: payload.category,
        period,
        amount: payload.amount,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    match repo.create(input).await {
        Ok(model) => (StatusCode::CREATED, Json(budget_to_response(&model))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create budget");
            internal_error_response()
        }
    }
}

/// GET `/budgets/{budget_id}` - Fetch one budget.
#[axum::debug_handler]
async fn get_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    auth: AuthUser,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.get(auth.user_id(), budget_id).await {
        Ok(model) => (StatusCode::OK, Json(budget_to_response(&model))).into_response(),
        Err(BudgetError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to get budget");
            internal_error_response()
        }
    }
}

/// PUT `/budgets/{budget_id}` - Update one budget.
#[axum::debug_handler]
async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    auth: AuthUser,
    Json(payload): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    let period = match payload.period.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<BudgetPeriod>() {
            Ok(period) => Some(period),
            Err(_) => return invalid_period_response(),
        },
    };
    if let Some(amount) = payload.amount {
        if amount <= Decimal::ZERO {
            return validation_error("Amount must be greater than 0");
        }
    }
    if let (Some(start), Some(end)) = (payload.start_date, payload.end_date) {
        if start > end {
            return validation_error("Start date must be before or equal to end date");
        }
    }

    let repo = BudgetRepository::new((*state.db).clone());
    let input = UpdateBudgetInput {
        category: payload.category,
        period,
        amount: payload.amount,
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    match repo.update(auth.user_id(), budget_id, input).await {
        Ok(model) => (StatusCode::OK, Json(budget_to_response(&model))).into_response(),
        Err(BudgetError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to update budget");
            internal_error_response()
        }
    }
}

/// DELETE `/budgets/{budget_id}` - Delete one budget.
#[axum::debug_handler]
async fn delete_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    auth: AuthUser,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), budget_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(BudgetError::NotFound(id)) => not_found_response(id),
        Err(e) => {
            error!(error = %e, "Failed to delete budget");
            internal_error_response()
        }
    }
}
