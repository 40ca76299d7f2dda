//! Auth API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, JwtVerifier};
use crate::baas::StoreError;
use crate::core::ServerState;
use crate::db::EmployeeRepository;
use crate::utils::validation::{MAX_EMAIL_LEN, validate_required_text};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeRole};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub employee: Option<Employee>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub organization_id: String,
    pub role: EmployeeRole,
    pub employee: Option<Employee>,
}

/// POST /api/auth/login - exchange credentials for a session (public)
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.password, "password", 128)?;

    let gateway = state.auth_gateway()?;
    let session = gateway
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            // Any backend rejection reads as bad credentials to the
            // caller; details would enable account enumeration.
            StoreError::Rejected(_) | StoreError::NotFound(_) => AppError::invalid_credentials(),
            other => other.into(),
        })?;

    // The session token carries the tenant; use it to load the employee
    // row behind this identity.
    let claims = state
        .jwt
        .verify(&session.access_token)
        .map_err(|e| AppError::invalid_token(e.to_string()))?;
    let user = CurrentUser::from(claims);

    let employees = EmployeeRepository::new(state.store()?);
    let employee = employees.find_by_id(&user.context(), &user.id).await?;

    if let Some(employee) = &employee
        && !employee.is_active
    {
        return Err(AppError::new(ErrorCode::EmployeeInactive));
    }

    Ok(Json(LoginResponse {
        access_token: session.access_token,
        token_type: session.token_type,
        expires_in: session.expires_in,
        employee,
    }))
}

/// GET /api/auth/session - the signed-in identity and employee row
pub async fn session(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<SessionResponse>> {
    let employees = EmployeeRepository::new(state.store()?);
    let employee = employees.find_by_id(&user.context(), &user.id).await?;
    Ok(Json(SessionResponse {
        organization_id: user.organization_id,
        role: user.role,
        employee,
    }))
}

/// POST /api/auth/logout - invalidate the session at the backend
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<bool>> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtVerifier::extract_from_header)
        .ok_or_else(AppError::not_authenticated)?;

    state.auth_gateway()?.sign_out(token).await?;
    Ok(Json(true))
}
