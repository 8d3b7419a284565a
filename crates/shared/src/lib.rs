//! Shared types, configuration, and auth plumbing for Moneta.
//!
//! This crate provides common pieces used across all other crates:
//! - Application configuration loading
//! - JWT claims and token validation
//! - Pagination types for list endpoints

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{PageMeta, PageRequest, PageResponse};
