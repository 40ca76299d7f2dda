//! Attendance Repository
//!
//! One record per employee per calendar date. First check-in goes
//! through an idempotent upsert keyed on `(employee_id, date)` so two
//! concurrent check-ins cannot both insert - the loser observes the row
//! the winner created.

use std::sync::Arc;

use chrono::NaiveDate;

use shared::OrgContext;
use shared::error::{AppError, AppResult};
use shared::models::{Attendance, AttendanceUpdate};

use super::{decode, decode_rows, to_row};
use crate::baas::{DataStore, OnConflict, Query};

const ENTITY: &str = "attendances";

/// Daily-uniqueness key for the upsert
const CONFLICT_KEYS: [&str; 2] = ["employee_id", "date"];

#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<dyn DataStore>,
}

impl AttendanceRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// The record for one employee on one date, if any. Absence is a
    /// valid empty state, not an error.
    pub async fn find_by_employee_and_date(
        &self,
        org: &OrgContext,
        employee_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<Attendance>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .eq("employee_id", employee_id)
                    .eq("date", date.to_string())
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(|row| decode(ENTITY, row)).transpose()
    }

    /// Records in a date range (inclusive), optionally for one employee,
    /// ordered by date.
    pub async fn find_range(
        &self,
        org: &OrgContext,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> AppResult<Vec<Attendance>> {
        let mut query = Query::new()
            .eq("organization_id", org.organization_id.as_str())
            .gte("date", start.to_string())
            .lte("date", end.to_string())
            .order_asc("date");
        if let Some(employee_id) = employee_id {
            query = query.eq("employee_id", employee_id);
        }
        let rows = self.store.query(ENTITY, query).await?;
        decode_rows(ENTITY, rows)
    }

    /// Find a record by id, scoped to the organization
    pub async fn find_by_id(&self, org: &OrgContext, id: &str) -> AppResult<Option<Attendance>> {
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

    /// Insert the day's record unless one already exists for
    /// `(employee_id, date)`. Returns the row now present and whether
    /// this call created it.
    pub async fn create_if_absent(&self, record: &Attendance) -> AppResult<(Attendance, bool)> {
        let row = self
            .store
            .upsert(ENTITY, &CONFLICT_KEYS, to_row(record)?, OnConflict::Ignore)
            .await?;
        let stored: Attendance = decode(ENTITY, row)?;
        let created = stored.id == record.id;
        Ok((stored, created))
    }

    /// Patch a record by id
    pub async fn update(
        &self,
        org: &OrgContext,
        id: &str,
        patch: &AttendanceUpdate,
    ) -> AppResult<Attendance> {
        self.find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attendance record {id}")))?;
        let row = self.store.update(ENTITY, id, to_row(patch)?).await?;
        decode(ENTITY, row)
    }
}
