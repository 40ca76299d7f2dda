//! Shared types for the Timeclock workspace
//!
//! Common types used across crates: domain models, the unified error
//! system, and the tenant context threaded through data access.

pub mod context;
pub mod error;
pub mod models;

// Re-exports
pub use context::OrgContext;
pub use error::{ApiError, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
