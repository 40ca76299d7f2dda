//! Department Repository

use std::sync::Arc;

use uuid::Uuid;

use shared::OrgContext;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};

use super::{decode, decode_rows, to_row};
use crate::baas::{DataStore, Query};

const ENTITY: &str = "departments";

#[derive(Clone)]
pub struct DepartmentRepository {
    store: Arc<dyn DataStore>,
}

impl DepartmentRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, org: &OrgContext) -> AppResult<Vec<Department>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .order_asc("name"),
            )
            .await?;
        decode_rows(ENTITY, rows)
    }

    pub async fn find_by_id(&self, org: &OrgContext, id: &str) -> AppResult<Option<Department>> {
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

    async fn find_by_code(&self, org: &OrgContext, code: &str) -> AppResult<Option<Department>> {
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

    pub async fn create(&self, org: &OrgContext, data: DepartmentCreate) -> AppResult<Department> {
        if self.find_by_code(org, &data.code).await?.is_some() {
            return Err(AppError::new(ErrorCode::CodeTaken).with_detail("code", data.code));
        }
        let department = Department {
            id: Uuid::new_v4().to_string(),
            organization_id: org.organization_id.clone(),
            name: data.name,
            code: data.code,
            manager_id: data.manager_id,
            is_active: true,
        };
        let row = self.store.insert(ENTITY, to_row(&department)?).await?;
        decode(ENTITY, row)
    }

    pub async fn update(
        &self,
        org: &OrgContext,
        id: &str,
        patch: &DepartmentUpdate,
    ) -> AppResult<Department> {
        let existing = self
            .find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id}")))?;
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
            .ok_or_else(|| AppError::not_found(format!("Department {id}")))?;
        let removed = self.store.delete(ENTITY, id).await?;
        Ok(!removed.is_empty())
    }
}
