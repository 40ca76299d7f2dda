//! Account provisioning handlers
//!
//! Creates the auth identity and the employee row in one administrative
//! action. The two writes are independent (no cross-entity transaction
//! at the backend); the employee row is written second so a failed
//! insert leaves an identity without a row, which re-provisioning
//! repairs.

use axum::{
    Json,
    extract::{Extension, State},
};
use http::StatusCode;
use serde_json::json;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::EmployeeRepository;
use crate::utils::time;
use crate::utils::validation::validate_payload;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate};

/// POST /api/accounts - provision an identity + employee (admin)
///
/// Responds 201 with the created employee; validation failures are
/// reported before any network call.
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    validate_payload(&payload)?;

    let org = user.context();
    let employees = EmployeeRepository::new(state.store()?);

    if employees.find_by_email(&org, &payload.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailTaken).with_detail("email", payload.email));
    }
    if employees.find_by_code(&org, &payload.code).await?.is_some() {
        return Err(AppError::new(ErrorCode::CodeTaken).with_detail("code", payload.code));
    }

    let metadata = json!({
        "organization_id": org.organization_id,
        "role": payload.role,
    });
    let identity = state
        .auth_gateway()?
        .create_identity(&payload.email, &payload.password, metadata)
        .await?;

    let hire_date = payload
        .hire_date
        .unwrap_or_else(|| time::today_in(state.clock.now(), state.config.timezone));

    let employee = Employee {
        id: identity.id,
        organization_id: org.organization_id.clone(),
        code: payload.code,
        full_name: payload.full_name,
        email: payload.email,
        phone: payload.phone,
        department_id: payload.department_id,
        position_id: payload.position_id,
        role: payload.role,
        is_active: true,
        hire_date,
        schedule_override: payload.schedule_override,
    };
    let created = employees.insert(&employee).await?;

    tracing::info!(
        employee_id = %created.id,
        created_by = %user.id,
        "employee provisioned"
    );

    Ok((StatusCode::CREATED, Json(created)))
}
