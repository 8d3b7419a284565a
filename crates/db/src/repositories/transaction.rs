//! Transaction repository.
//!
//! CRUD over a user's transactions, plus the read-only feed the reporting
//! engine consumes.

use chrono::{NaiveDate, Utc};
use moneta_core::reports::{DateRange, TransactionRecord};
use moneta_shared::PageRequest;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{kinds::TransactionKind, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or owned by another user).
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error. For report reads this is the feed-read failure the
    /// engine surfaces without retrying.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Amount (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Category label.
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// The day the transaction occurred.
    pub date: NaiveDate,
}

/// Input for updating a transaction. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New kind.
    pub kind: Option<TransactionKind>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
    /// Filter by exact category label.
    pub category: Option<String>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
}

/// Transaction repository for CRUD operations and the report feed.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let now = Utc::now().into();

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            amount: Set(input.amount),
            kind: Set(input.kind),
            category: Set(input.category),
            description: Set(input.description),
            date: Set(input.date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(transaction.insert(&self.db).await?)
    }

    /// Gets one of the user's transactions by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn get(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))
    }

    /// Lists the user's transactions with optional filters, most recent
    /// first, paginated.
    ///
    /// Returns the page of rows and the total row count for the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), TransactionError> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }
        if let Some(category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(date_to));
        }

        let paginator = query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Updates one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn update(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let existing = self.get(user_id, transaction_id).await?;

        let mut active: transactions::ActiveModel = existing.into();
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row is absent or owned by another user.
    pub async fn delete(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(transaction_id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(transaction_id));
        }
        Ok(())
    }

    /// The transaction feed for the reporting engine: the user's
    /// transactions, optionally filtered by kind and date window, as
    /// borrowed report records.
    ///
    /// # Errors
    ///
    /// Returns `Database` (a feed-read error) if the query fails; the
    /// engine surfaces it without retrying.
    pub async fn list_for_report(
        &self,
        user_id: Uuid,
        kind: Option<moneta_core::reports::TransactionKind>,
        range: &DateRange,
    ) -> Result<Vec<TransactionRecord>, TransactionError> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(TransactionKind::from(kind)));
        }
        if let Some(start) = range.start {
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(transactions::Column::Date.lte(end));
        }

        let rows = query
            .order_by_asc(transactions::Column::Date)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(to_record).collect())
    }
}

fn to_record(row: transactions::Model) -> TransactionRecord {
    TransactionRecord {
        amount: row.amount,
        kind: row.kind.into(),
        category: row.category,
        occurred_on: row.date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_model_maps_to_report_record() {
        let row = transactions::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: dec!(42.50),
            kind: TransactionKind::Expense,
            category: "food".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        };

        let record = to_record(row);
        assert_eq!(record.amount, dec!(42.50));
        assert_eq!(
            record.kind,
            moneta_core::reports::TransactionKind::Expense
        );
        assert_eq!(record.category, "food");
        assert_eq!(
            record.occurred_on,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }
}
