//! `SeaORM` entity definitions.

pub mod budgets;
pub mod kinds;
pub mod transactions;
pub mod users;

pub use kinds::{BudgetPeriod, TransactionKind};
