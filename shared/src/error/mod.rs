//! Unified error system
//!
//! One error type propagated through the whole application:
//! - [`ErrorCode`]: standardized error codes grouped by category
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: error type with code, message, and optional details
//! - [`ApiError`]: the wire shape (`{code, error, details}`) rendered to callers
//!
//! # Error code ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Attendance errors
//! - 5xxx: Employee errors
//! - 9xxx: System / remote-collaborator errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation("check_out must be later than check_in");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! assert_eq!(err.http_status().as_u16(), 400);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiError, AppError, AppResult};
