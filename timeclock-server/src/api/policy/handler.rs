//! Work policy API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::WorkPolicyRepository;
use shared::error::{AppError, AppResult};
use shared::models::{WorkPolicy, WorkPolicyUpdate};

/// GET /api/policy - the organization's active policy
pub async fn get(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Option<WorkPolicy>>> {
    let repo = WorkPolicyRepository::new(state.store()?);
    let policy = repo.active(&user.context()).await?;
    Ok(Json(policy))
}

/// PUT /api/policy - patch (or create) the organization policy (admin)
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<WorkPolicyUpdate>,
) -> AppResult<Json<WorkPolicy>> {
    user.ensure_admin()?;

    if let (Some(start), Some(end)) = (payload.start_time, payload.end_time)
        && end <= start
    {
        return Err(AppError::validation("end_time must be later than start_time"));
    }
    if let Some(days) = payload.working_days_per_week
        && !(1..=7).contains(&days)
    {
        return Err(AppError::validation("working_days_per_week must be 1-7"));
    }

    let repo = WorkPolicyRepository::new(state.store()?);
    let policy = repo.upsert(&user.context(), &payload).await?;

    tracing::info!(by = %user.id, "work policy updated");
    Ok(Json(policy))
}
