//! Utility modules
//!
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - organization-timezone conversions
//! - [`csv`] - quoted CSV export
//! - [`validation`] - text validation helpers

pub mod csv;
pub mod logger;
pub mod time;
pub mod validation;

// Re-export the unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCode};
