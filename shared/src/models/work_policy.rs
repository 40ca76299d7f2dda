//! Work policy model
//!
//! Organization-scoped schedule defaults. At most one active policy per
//! organization; lookups take the first match.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Work policy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPolicy {
    pub id: String,
    pub organization_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: u32,
    /// Minutes of grace after `start_time` before a check-in is late
    pub late_threshold_minutes: u32,
    pub working_days_per_week: u8,
    pub allow_remote: bool,
    pub require_geolocation: bool,
    pub max_daily_hours: f64,
}

impl WorkPolicy {
    /// Scheduled daily working hours: span minus the break allowance
    pub fn standard_daily_hours(&self) -> f64 {
        let span = self
            .end_time
            .signed_duration_since(self.start_time)
            .num_minutes();
        let worked = span - self.break_minutes as i64;
        (worked.max(0) as f64) / 60.0
    }
}

/// Update/upsert payload for the organization policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPolicyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_threshold_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_days_per_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_geolocation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_daily_hours: Option<f64>,
}
