//! Work Policy Repository
//!
//! At most one active policy per organization; lookups take the first
//! match, writes upsert on the organization id.

use std::sync::Arc;

use chrono::NaiveTime;
use uuid::Uuid;

use shared::OrgContext;
use shared::error::AppResult;
use shared::models::{WorkPolicy, WorkPolicyUpdate};

use super::{decode, to_row};
use crate::baas::{DataStore, OnConflict, Query};

const ENTITY: &str = "work_policies";

#[derive(Clone)]
pub struct WorkPolicyRepository {
    store: Arc<dyn DataStore>,
}

impl WorkPolicyRepository {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// The organization's active policy, if one is configured
    pub async fn active(&self, org: &OrgContext) -> AppResult<Option<WorkPolicy>> {
        let rows = self
            .store
            .query(
                ENTITY,
                Query::new()
                    .eq("organization_id", org.organization_id.as_str())
                    .limit(1),
            )
            .await?;
        rows.into_iter().next().map(|row| decode(ENTITY, row)).transpose()
    }

    /// Apply a patch to the organization policy, creating it from
    /// defaults on first write.
    pub async fn upsert(&self, org: &OrgContext, patch: &WorkPolicyUpdate) -> AppResult<WorkPolicy> {
        let base = match self.active(org).await? {
            Some(existing) => existing,
            None => default_policy(org),
        };

        let merged = WorkPolicy {
            start_time: patch.start_time.unwrap_or(base.start_time),
            end_time: patch.end_time.unwrap_or(base.end_time),
            break_minutes: patch.break_minutes.unwrap_or(base.break_minutes),
            late_threshold_minutes: patch
                .late_threshold_minutes
                .unwrap_or(base.late_threshold_minutes),
            working_days_per_week: patch
                .working_days_per_week
                .unwrap_or(base.working_days_per_week),
            allow_remote: patch.allow_remote.unwrap_or(base.allow_remote),
            require_geolocation: patch
                .require_geolocation
                .unwrap_or(base.require_geolocation),
            max_daily_hours: patch.max_daily_hours.unwrap_or(base.max_daily_hours),
            ..base
        };

        let row = self
            .store
            .upsert(
                ENTITY,
                &["organization_id"],
                to_row(&merged)?,
                OnConflict::Merge,
            )
            .await?;
        decode(ENTITY, row)
    }
}

fn default_policy(org: &OrgContext) -> WorkPolicy {
    WorkPolicy {
        id: Uuid::new_v4().to_string(),
        organization_id: org.organization_id.clone(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        break_minutes: 60,
        late_threshold_minutes: 15,
        working_days_per_week: 5,
        allow_remote: true,
        require_geolocation: false,
        max_daily_hours: 12.0,
    }
}
