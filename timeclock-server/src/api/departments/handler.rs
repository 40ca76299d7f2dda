//! Department API Handlers
//!
//! Reads are open to any authenticated session; writes are guarded by
//! the admin check in each handler.

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::DepartmentRepository;
use crate::utils::validation::validate_payload;
use shared::error::{AppError, AppResult};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};

/// GET /api/departments
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Department>>> {
    let repo = DepartmentRepository::new(state.store()?);
    let departments = repo.find_all(&user.context()).await?;
    Ok(Json(departments))
}

/// GET /api/departments/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    let repo = DepartmentRepository::new(state.store()?);
    let department = repo
        .find_by_id(&user.context(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department {id}")))?;
    Ok(Json(department))
}

/// POST /api/departments (admin)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    user.ensure_admin()?;
    validate_payload(&payload)?;
    let repo = DepartmentRepository::new(state.store()?);
    let department = repo.create(&user.context(), payload).await?;
    Ok(Json(department))
}

/// PUT /api/departments/:id (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    user.ensure_admin()?;
    validate_payload(&payload)?;
    let repo = DepartmentRepository::new(state.store()?);
    let department = repo.update(&user.context(), &id, &payload).await?;
    Ok(Json(department))
}

/// DELETE /api/departments/:id (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.ensure_admin()?;
    let repo = DepartmentRepository::new(state.store()?);
    let removed = repo.delete(&user.context(), &id).await?;
    Ok(Json(removed))
}
