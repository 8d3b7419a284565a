//! Budget repository.

use chrono::{NaiveDate, Utc};
use moneta_shared::PageRequest;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{budgets, kinds::BudgetPeriod};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found (or owned by another user).
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Category the budget covers.
    pub category: String,
    /// Recurrence period.
    pub period: BudgetPeriod,
    /// Budgeted amount (positive).
    pub amount: Decimal,
    /// First day the budget applies.
    pub start_date: NaiveDate,
    /// Last day the budget applies.
    pub end_date: NaiveDate,
}

/// Input for updating a budget. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    /// New category.
    pub category: Option<String>,
    /// New period.
    pub period: Option<BudgetPeriod>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateBudgetInput) -> Result<budgets::Model, BudgetError> {
        let now = Utc::now().into();

        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            category: Set(input.category),
            period: Set(input.period),
            amount: Set(input.amount),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(budget.insert(&self.db).await?)
    }

    /// Gets one of the user's budgets by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn get(&self, user_id: Uuid, budget_id: Uuid) -> Result<budgets::Model, BudgetError> {
        budgets::Entity::find_by_id(budget_id)
            .filter(budgets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(budget_id))
    }

    /// Lists the user's budgets, most recent start date first, paginated.
    ///
    /// Returns the page of rows and the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<budgets::Model>, u64), BudgetError> {
        let paginator = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_desc(budgets::Column::StartDate)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Updates one of the user's budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn update(
        &self,
        user_id: Uuid,
        budget_id: Uuid,
        input: UpdateBudgetInput,
    ) -> Result<budgets::Model, BudgetError> {
        let existing = self.get(user_id, budget_id).await?;

        let mut active: budgets::ActiveModel = existing.into();
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(period) = input.period {
            active.period = Set(period);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes one of the user's budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn delete(&self, user_id: Uuid, budget_id: Uuid) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(budget_id))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(budget_id));
        }
        Ok(())
    }
}
