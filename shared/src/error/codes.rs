//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Attendance errors
//! - 5xxx: Employee errors
//! - 9xxx: System / remote-collaborator errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Manager role required
    ManagerRequired = 2003,

    // ==================== 4xxx: Attendance ====================
    /// Employee already checked in today
    AlreadyCheckedIn = 4001,
    /// Employee has not checked in today
    NotCheckedIn = 4002,
    /// Employee already checked out today
    AlreadyCheckedOut = 4003,
    /// A break is already open
    BreakAlreadyOpen = 4004,
    /// No open break to end
    NoOpenBreak = 4005,
    /// Check-out precedes check-in
    CheckOutBeforeCheckIn = 4006,
    /// Remote attendance not allowed by policy
    RemoteNotAllowed = 4007,
    /// Policy requires a check-in location
    LocationRequired = 4008,

    // ==================== 5xxx: Employee ====================
    /// Employee account is inactive
    EmployeeInactive = 5001,
    /// Email is already registered
    EmailTaken = 5002,
    /// Employee code is already in use
    CodeTaken = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Remote collaborator rejected or failed the operation
    RemoteError = 9002,
    /// Remote collaborator unreachable
    RemoteUnavailable = 9003,
    /// Backend service is not configured
    NotConfigured = 9004,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Session expired",
            ErrorCode::TokenInvalid => "Invalid session token",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role required",
            ErrorCode::ManagerRequired => "Manager role required",

            ErrorCode::AlreadyCheckedIn => "Already checked in today",
            ErrorCode::NotCheckedIn => "Not checked in today",
            ErrorCode::AlreadyCheckedOut => "Already checked out today",
            ErrorCode::BreakAlreadyOpen => "A break is already in progress",
            ErrorCode::NoOpenBreak => "No break in progress",
            ErrorCode::CheckOutBeforeCheckIn => "Check-out must be later than check-in",
            ErrorCode::RemoteNotAllowed => "Remote attendance is not allowed",
            ErrorCode::LocationRequired => "A check-in location is required",

            ErrorCode::EmployeeInactive => "Employee account is inactive",
            ErrorCode::EmailTaken => "Email is already registered",
            ErrorCode::CodeTaken => "Employee code is already in use",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::RemoteError => "Backend operation failed",
            ErrorCode::RemoteUnavailable => "Backend service unavailable",
            ErrorCode::NotConfigured => "Backend service is not configured",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", *self as u16)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unrecognized u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        use ErrorCode::*;
        let code = match value {
            0 => Success,
            1 => Unknown,
            2 => ValidationFailed,
            3 => NotFound,
            4 => AlreadyExists,
            5 => InvalidRequest,
            1001 => NotAuthenticated,
            1002 => InvalidCredentials,
            1003 => TokenExpired,
            1004 => TokenInvalid,
            2001 => PermissionDenied,
            2002 => AdminRequired,
            2003 => ManagerRequired,
            4001 => AlreadyCheckedIn,
            4002 => NotCheckedIn,
            4003 => AlreadyCheckedOut,
            4004 => BreakAlreadyOpen,
            4005 => NoOpenBreak,
            4006 => CheckOutBeforeCheckIn,
            4007 => RemoteNotAllowed,
            4008 => LocationRequired,
            5001 => EmployeeInactive,
            5002 => EmailTaken,
            5003 => CodeTaken,
            9001 => InternalError,
            9002 => RemoteError,
            9003 => RemoteUnavailable,
            9004 => NotConfigured,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::AlreadyCheckedIn,
            ErrorCode::RemoteUnavailable,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(ErrorCode::try_from(7777), Err(InvalidErrorCode(7777)));
    }
}
