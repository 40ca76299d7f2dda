//! Calendar API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::calendar::{self, CalendarCell};
use crate::core::ServerState;
use crate::db::{AttendanceRepository, EmployeeRepository, WorkPolicyRepository};
use crate::stats::WorkingDays;
use crate::timesheet::EffectiveSchedule;
use crate::utils::time;
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Another employee's calendar (manager)
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub employee_id: String,
    pub cells: Vec<CalendarCell>,
}

/// GET /api/calendar/:year/:month - the 42-cell month grid
pub async fn month(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let org = user.context();

    let employee_id = match query.employee_id {
        Some(id) if id != user.id => {
            user.ensure_manager()?;
            id
        }
        _ => user.id.clone(),
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("invalid month: {year}-{month:02}")))?;
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::validation(format!("invalid month: {year}-{month:02}")))?;

    let records = AttendanceRepository::new(state.store()?)
        .find_range(&org, first, last, Some(&employee_id))
        .await?;

    // Working days come from the employee's effective schedule so
    // part-time overrides render their own off days.
    let employee = EmployeeRepository::new(state.store()?)
        .find_by_id(&org, &employee_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {employee_id}")))?;
    let policy = WorkPolicyRepository::new(state.store()?).active(&org).await?;
    let working_days: WorkingDays =
        EffectiveSchedule::resolve(policy.as_ref(), employee.schedule_override.as_ref())
            .working_days;

    let today = time::today_in(state.clock.now(), state.config.timezone);
    let cells = calendar::month_grid(year, month, &records, today, working_days)?;

    Ok(Json(CalendarResponse {
        year,
        month,
        employee_id,
        cells,
    }))
}
