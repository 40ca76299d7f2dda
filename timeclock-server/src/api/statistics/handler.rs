//! Statistics API Handlers
//!
//! One aggregate endpoint feeding the dashboard: overview rates, a
//! weekly trend, and a per-department breakdown, all computed from the
//! records in the requested range.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::{AttendanceRepository, DepartmentRepository, EmployeeRepository, WorkPolicyRepository};
use crate::stats::{self, PartitionStats, WorkingDays};
use crate::utils::time;
use shared::error::{AppError, AppResult};
use shared::models::AttendanceStatus;

// ============================================================================
// Response Types
// ============================================================================

/// Overview statistics
#[derive(Debug, Clone, Serialize)]
pub struct OverviewStats {
    pub headcount: u32,
    pub expected_days: u32,
    pub present_days: u32,
    pub on_time_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub attendance_rate: f64,
    pub punctuality_rate: f64,
    pub absenteeism_rate: f64,
    pub average_hours: f64,
    pub total_worked_hours: f64,
    pub total_overtime_hours: f64,
}

/// Weekly trend point
#[derive(Debug, Clone, Serialize)]
pub struct WeekPoint {
    pub week_start: NaiveDate,
    #[serde(flatten)]
    pub stats: PartitionStats,
}

/// Per-department breakdown
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPoint {
    pub department_id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: PartitionStats,
}

/// Full statistics response
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub overview: OverviewStats,
    pub weekly_trend: Vec<WeekPoint>,
    pub by_department: Vec<DepartmentPoint>,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default = "default_time_range")]
    pub time_range: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn default_time_range() -> String {
    "month".to_string()
}

/// Resolve the named range into inclusive date bounds in the
/// organization timezone.
fn resolve_range(
    time_range: &str,
    today: NaiveDate,
    custom_start: Option<&str>,
    custom_end: Option<&str>,
) -> AppResult<(NaiveDate, NaiveDate)> {
    match time_range {
        "today" => Ok((today, today)),
        "week" => {
            let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            Ok((week_start, today))
        }
        "month" => Ok((today.with_day(1).unwrap_or(today), today)),
        "custom" => match (custom_start, custom_end) {
            (Some(start), Some(end)) => {
                let start = time::parse_date(start)?;
                let end = time::parse_date(end)?;
                if end < start {
                    return Err(AppError::validation("end_date precedes start_date"));
                }
                Ok((start, end))
            }
            _ => Err(AppError::validation(
                "custom time_range requires start_date and end_date",
            )),
        },
        other => Err(AppError::validation(format!("unknown time_range: {other}"))),
    }
}

// ============================================================================
// Handler
// ============================================================================

/// GET /api/statistics - aggregate dashboard numbers (manager)
pub async fn get_statistics(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<StatisticsResponse>> {
    let org = user.context();
    let today = time::today_in(state.clock.now(), state.config.timezone);
    let (start, end) = resolve_range(
        &query.time_range,
        today,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    tracing::debug!(time_range = %query.time_range, %start, %end, "computing statistics");

    let employees = EmployeeRepository::new(state.store()?).find_all(&org).await?;
    let headcount = employees.len() as u32;

    let policy = WorkPolicyRepository::new(state.store()?).active(&org).await?;
    let working_days = policy
        .as_ref()
        .map(|p| WorkingDays::from_days_per_week(p.working_days_per_week))
        .unwrap_or_default();

    let records = AttendanceRepository::new(state.store()?)
        .find_range(&org, start, end, None)
        .await?;

    // Overview
    let expected_per_head = stats::expected_working_days(start, end, working_days);
    let expected_days = expected_per_head * headcount;

    let overall = stats::summarize(&records);
    let excused = records.iter().filter(|r| r.status.is_excused()).count() as u32;
    let marked_absent = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Absent)
        .count() as u32;
    // Days with no record at all count absent alongside explicit tags;
    // excused days reduce the expectation instead.
    let absent_days = expected_days
        .saturating_sub(overall.present_days)
        .saturating_sub(excused)
        .max(marked_absent);

    let overview = OverviewStats {
        headcount,
        expected_days,
        present_days: overall.present_days,
        on_time_days: overall.on_time_days,
        late_days: overall.late_days,
        absent_days,
        attendance_rate: stats::attendance_rate(overall.present_days, expected_days),
        punctuality_rate: stats::punctuality_rate(overall.on_time_days, overall.present_days),
        absenteeism_rate: stats::absenteeism_rate(absent_days, expected_days),
        average_hours: stats::average_hours(overall.total_hours, overall.present_days),
        total_worked_hours: overall.total_hours,
        total_overtime_hours: overall.total_overtime_hours,
    };

    // Weekly trend
    let weekly_trend = stats::group_by_week(&records)
        .into_iter()
        .map(|(week_start, stats)| WeekPoint { week_start, stats })
        .collect();

    // Per-department breakdown
    let department_of: HashMap<String, String> = employees
        .iter()
        .filter_map(|e| e.department_id.clone().map(|d| (e.id.clone(), d)))
        .collect();
    let names: HashMap<String, String> = DepartmentRepository::new(state.store()?)
        .find_all(&org)
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    let by_department = stats::group_by_department(&records, &department_of)
        .into_iter()
        .map(|(department_id, stats)| DepartmentPoint {
            name: names
                .get(&department_id)
                .cloned()
                .unwrap_or_else(|| department_id.clone()),
            department_id,
            stats,
        })
        .collect();

    Ok(Json(StatisticsResponse {
        start_date: start,
        end_date: end,
        overview,
        weekly_trend,
        by_department,
    }))
}
