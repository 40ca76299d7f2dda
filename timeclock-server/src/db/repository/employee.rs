//! Employee Repository

use std::sync::Arc;

use serde_json::json;

use shared::OrgContext;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeUpdate};

use super::{decode, decode_rows, to_row};
use crate::baas::{DataStore, Query};

const ENTITY: &str = "employees";

#[derive(Clone)]
pub struct EmployeeRepository {
    store: Arc<dyn DataStore>,
}

impl EmployeeRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Find all active employees
    pub async fn find_all(&self, org: &OrgContext) -> AppResult<Vec<Employee>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .eq("is_active", true)
                    .order_asc("full_name"),
            )
            .await?;
        decode_rows(ENTITY, rows)
    }

    /// Find all employees including inactive
    pub async fn find_all_with_inactive(&self, org: &OrgContext) -> AppResult<Vec<Employee>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .order_asc("full_name"),
            )
            .await?;
        decode_rows(ENTITY, rows)
    }

    /// Find employee by id, scoped to the organization
    pub async fn find_by_id(&self, org: &OrgContext, id: &str) -> AppResult<Option<Employee>> {
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

    /// Find employee by email
    pub async fn find_by_email(&self, org: &OrgContext, email: &str) -> AppResult<Option<Employee>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .eq("email", email)
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(|row| decode(ENTITY, row)).transpose()
    }

    /// Find employee by code
    pub async fn find_by_code(&self, org: &OrgContext, code: &str) -> AppResult<Option<Employee>> {
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

    /// Insert a fully-built employee row (id comes from the provisioned
    /// auth identity)
    pub async fn insert(&self, employee: &Employee) -> AppResult<Employee> {
        let row = self.store.insert(ENTITY, to_row(employee)?).await?;
        decode(ENTITY, row)
    }

    /// Update an employee; duplicate email/code checks happen here so
    /// the caller reports conflicts before any write.
    pub async fn update(
        &self,
        org: &OrgContext,
        id: &str,
        patch: &EmployeeUpdate,
    ) -> AppResult<Employee> {
        let existing = self
            .find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;

        if let Some(email) = &patch.email
            && email != &existing.email
            && self.find_by_email(org, email).await?.is_some()
        {
            return Err(AppError::new(ErrorCode::EmailTaken).with_detail("email", email.clone()));
        }
        if let Some(code) = &patch.code
            && code != &existing.code
            && self.find_by_code(org, code).await?.is_some()
        {
            return Err(AppError::new(ErrorCode::CodeTaken).with_detail("code", code.clone()));
        }

        let row = self.store.update(ENTITY, id, to_row(patch)?).await?;
        decode(ENTITY, row)
    }

    /// Soft delete: deactivate the employee
    pub async fn deactivate(&self, org: &OrgContext, id: &str) -> AppResult<Employee> {
        self.find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;
        let row = self
            .store
            .update(ENTITY, id, json!({"is_active": false}))
            .await?;
        decode(ENTITY, row)
    }

    /// Hard delete an employee row
    pub async fn delete(&self, org: &OrgContext, id: &str) -> AppResult<bool> {
        self.find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;
        let removed = self.store.delete(ENTITY, id).await?;
        Ok(!removed.is_empty())
    }
}
