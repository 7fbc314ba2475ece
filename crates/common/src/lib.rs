//! Common utilities shared by the catalog crates.
//!
//! This crate provides:
//! - Configuration management
//! - Telemetry (tracing subscriber setup)
//! - Pagination and sorting helpers

pub mod config;
pub mod pagination;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseSettings, TelemetryConfig};
pub use pagination::{PageRequest, PaginatedResult, SortDirection, SortParams};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
