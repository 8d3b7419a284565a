//! Core business logic for Moneta.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. It consumes transaction records the caller has already
//! fetched and scoped to one user, and produces report rows and export
//! payloads.
//!
//! # Modules
//!
//! - `reports` - Aggregation, report selection, and export serialization

pub mod reports;
