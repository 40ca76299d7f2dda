//! HTTP status mapping and axum response rendering

use super::codes::ErrorCode;
use super::types::{ApiError, AppError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,

            ValidationFailed | InvalidRequest | CheckOutBeforeCheckIn | RemoteNotAllowed
            | LocationRequired => StatusCode::BAD_REQUEST,

            NotAuthenticated | InvalidCredentials | TokenExpired | TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            PermissionDenied | AdminRequired | ManagerRequired | EmployeeInactive => {
                StatusCode::FORBIDDEN
            }

            NotFound => StatusCode::NOT_FOUND,

            AlreadyExists | AlreadyCheckedIn | NotCheckedIn | AlreadyCheckedOut
            | BreakAlreadyOpen | NoOpenBreak | EmailTaken | CodeTaken => StatusCode::CONFLICT,

            Unknown | InternalError | RemoteError => StatusCode::INTERNAL_SERVER_ERROR,

            RemoteUnavailable | NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl AppError {
    /// HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
        }

        (status, Json(ApiError::from(&self))).into_response()
    }
}
