//! Position Repository

use std::sync::Arc;

use uuid::Uuid;

use shared::OrgContext;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Position, PositionCreate, PositionUpdate};

use super::{decode, decode_rows, to_row};
use crate::baas::{DataStore, Query};

const ENTITY: &str = "positions";

#[derive(Clone)]
pub struct PositionRepository {
    store: Arc<dyn DataStore>,
}

impl PositionRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, org: &OrgContext) -> AppResult<Vec<Position>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .order_asc("title"),
            )
            .await?;
        decode_rows(ENTITY, rows)
    }

    pub async fn find_by_id(&self, org: &OrgContext, id: &str) -> AppResult<Option<Position>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .eq("id", id)
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(|row| decode(ENTITY, row)).transpose()
    }

    async fn find_by_code(&self, org: &OrgContext, code: &str) -> AppResult<Option<Position>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .eq("code", code)
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(|row| decode(ENTITY, row)).transpose()
    }

    pub async fn create(&self, org: &OrgContext, data: PositionCreate) -> AppResult<Position> {
        if self.find_by_code(org, &data.code).await?.is_some() {
            return Err(AppError::new(ErrorCode::CodeTaken).with_detail("code", data.code));
        }
        let position = Position {
            id: Uuid::new_v4().to_string(),
            organization_id: org.organization_id.clone(),
            title: data.title,
            code: data.code,
            department_id: data.department_id,
            level: data.level,
            is_active: true,
        };
        let row = self.store.insert(ENTITY, to_row(&position)?).await?;
        decode(ENTITY, row)
    }

    pub async fn update(
        &self,
        org: &OrgContext,
        id: &str,
        patch: &PositionUpdate,
    ) -> AppResult<Position> {
        let existing = self
            .find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Position {id}")))?;
        if let Some(code) = &patch.code
            && code != &existing.code
            && self.find_by_code(org, code).await?.is_some()
        {
            return Err(AppError::new(ErrorCode::CodeTaken).with_detail("code", code.clone()));
        }
        let row = self.store.update(ENTITY, id, to_row(patch)?).await?;
        decode(ENTITY, row)
    }

    pub async fn delete(&self, org: &OrgContext, id: &str) -> AppResult<bool> {
        self.find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Position {id}")))?;
        let removed = self.store.delete(ENTITY, id).await?;
        Ok(!removed.is_empty())
    }
}
