//! Employee API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::EmployeeRepository;
use crate::utils::validation::validate_payload;
use shared::error::{AppError, AppResult};
use shared::models::{Employee, EmployeeUpdate};

/// GET /api/employees - list active employees
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.store()?);
    let employees = repo.find_all(&user.context()).await?;
    Ok(Json(employees))
}

/// GET /api/employees/all - list employees including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.store()?);
    let employees = repo.find_all_with_inactive(&user.context()).await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.store()?);
    let employee = repo
        .find_by_id(&user.context(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;
    Ok(Json(employee))
}

/// PUT /api/employees/:id - admin edit
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    validate_payload(&payload)?;
    let repo = EmployeeRepository::new(state.store()?);
    let employee = repo.update(&user.context(), &id, &payload).await?;
    Ok(Json(employee))
}

/// POST /api/employees/:id/deactivate - soft delete
pub async fn deactivate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.store()?);
    let employee = repo.deactivate(&user.context(), &id).await?;
    tracing::info!(employee_id = %id, by = %user.id, "employee deactivated");
    Ok(Json(employee))
}

/// DELETE /api/employees/:id - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.store()?);
    let removed = repo.delete(&user.context(), &id).await?;
    tracing::info!(employee_id = %id, by = %user.id, "employee deleted");
    Ok(Json(removed))
}
