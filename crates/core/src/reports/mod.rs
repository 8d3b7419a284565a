//! Report aggregation and export.
//!
//! This module turns a user's transaction history into ordered summary rows
//! and, on request, serializes those rows into downloadable documents:
//! - Spending by category (expense totals, largest first)
//! - Income by category (income totals, largest first)
//! - Monthly trends (per-month income/expense totals, oldest first)
//!
//! The engine is stateless: every request builds its row sequence from the
//! records it is handed and discards it afterwards.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
