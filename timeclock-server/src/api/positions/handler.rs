//! Position API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::PositionRepository;
use crate::utils::validation::validate_payload;
use shared::error::{AppError, AppResult};
use shared::models::{Position, PositionCreate, PositionUpdate};

/// GET /api/positions
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Position>>> {
    let repo = PositionRepository::new(state.store()?);
    let positions = repo.find_all(&user.context()).await?;
    Ok(Json(positions))
}

/// GET /api/positions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Position>> {
    let repo = PositionRepository::new(state.store()?);
    let position = repo
        .find_by_id(&user.context(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Position {id}")))?;
    Ok(Json(position))
}

/// POST /api/positions (admin)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PositionCreate>,
) -> AppResult<Json<Position>> {
    user.ensure_admin()?;
    validate_payload(&payload)?;
    let repo = PositionRepository::new(state.store()?);
    let position = repo.create(&user.context(), payload).await?;
    Ok(Json(position))
}

/// PUT /api/positions/:id (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<PositionUpdate>,
) -> AppResult<Json<Position>> {
    user.ensure_admin()?;
    validate_payload(&payload)?;
    let repo = PositionRepository::new(state.store()?);
    let position = repo.update(&user.context(), &id, &payload).await?;
    Ok(Json(position))
}

/// DELETE /api/positions/:id (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.ensure_admin()?;
    let repo = PositionRepository::new(state.store()?);
    let removed = repo.delete(&user.context(), &id).await?;
    Ok(Json(removed))
}
