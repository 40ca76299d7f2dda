//! Error categories derived from code ranges

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Classification of errors by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Attendance,
    Employee,
    System,
}

impl ErrorCode {
    /// Category for this error code, derived from its numeric range
    pub fn category(&self) -> ErrorCategory {
        match *self as u16 {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Attendance,
            5000..=5999 => ErrorCategory::Employee,
            _ => ErrorCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_map_to_categories() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::AdminRequired.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::NotCheckedIn.category(), ErrorCategory::Attendance);
        assert_eq!(ErrorCode::EmailTaken.category(), ErrorCategory::Employee);
        assert_eq!(ErrorCode::RemoteUnavailable.category(), ErrorCategory::System);
    }
}
