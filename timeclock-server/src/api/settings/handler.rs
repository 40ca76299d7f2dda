//! System settings API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::SettingRepository;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::error::AppResult;
use shared::models::{SettingUpsert, SystemSetting};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// GET /api/settings - list settings; non-admin sessions see public
/// settings only
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<SystemSetting>>> {
    let repo = SettingRepository::new(state.store()?);
    let mut settings = repo.list(&user.context(), query.category.as_deref()).await?;
    if !user.is_admin() {
        settings.retain(|s| s.is_public);
    }
    Ok(Json(settings))
}

/// PUT /api/settings/:category/:key - upsert one setting (admin)
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path((category, key)): Path<(String, String)>,
    Json(payload): Json<SettingUpsert>,
) -> AppResult<Json<SystemSetting>> {
    user.ensure_admin()?;
    validate_required_text(&category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&key, "key", MAX_SHORT_TEXT_LEN)?;

    let repo = SettingRepository::new(state.store()?);
    let setting = repo.upsert(&user.context(), &category, &key, payload).await?;
    Ok(Json(setting))
}
