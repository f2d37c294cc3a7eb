//! # API Shared
//!
//! Wire types shared by the neurocase REST server and CLI.
//!
//! Contains:
//! - `HealthRes` and the `HealthService` that produces it
//! - The structured error body returned on every failed request
//! - Pagination query parameters for list endpoints

pub mod health;
pub mod wire;

pub use health::{HealthRes, HealthService};
pub use wire::{ErrorBody, ErrorDetail, PageParams, DEFAULT_PAGE_LIMIT};
