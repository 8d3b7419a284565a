//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every operation takes the owning user's ID explicitly;
//! there is no ambient request context.

pub mod budget;
pub mod transaction;
pub mod user;

pub use budget::{BudgetError, BudgetRepository, CreateBudgetInput, UpdateBudgetInput};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
pub use user::{UserError, UserRepository};
