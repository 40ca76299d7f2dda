//! Attendance API Handlers
//!
//! The day's record is created by the first check-in through an
//! idempotent upsert keyed on `(employee_id, date)`; check-out and break
//! flows patch that record. "No record yet" is a valid empty state.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::{AttendanceRepository, EmployeeRepository, WorkPolicyRepository};
use crate::timesheet::{self, EffectiveSchedule, Punctuality};
use crate::utils::time;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::OrgContext;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attendance, AttendanceStatus, AttendanceUpdate, BreakInterval, BreakType, GeoLocation,
};

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub remote: bool,
    pub notes: Option<String>,
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BreakStartRequest {
    pub break_type: BreakType,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: String,
    pub end_date: String,
    pub employee_id: Option<String>,
}

/// The schedule the acting employee is measured against
async fn load_schedule(
    state: &ServerState,
    org: &OrgContext,
    employee_id: &str,
) -> AppResult<EffectiveSchedule> {
    let employees = EmployeeRepository::new(state.store()?);
    let employee = employees
        .find_by_id(org, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {employee_id}")))?;
    if !employee.is_active {
        return Err(AppError::new(ErrorCode::EmployeeInactive));
    }

    let policy = WorkPolicyRepository::new(state.store()?).active(org).await?;
    Ok(EffectiveSchedule::resolve(
        policy.as_ref(),
        employee.schedule_override.as_ref(),
    ))
}

/// GET /api/attendance/today - the caller's record for today, if any
pub async fn today(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Option<Attendance>>> {
    let org = user.context();
    let date = time::today_in(state.clock.now(), state.config.timezone);
    let record = AttendanceRepository::new(state.store()?)
        .find_by_employee_and_date(&org, &user.id, date)
        .await?;
    Ok(Json(record))
}

/// POST /api/attendance/check-in - open the day's record
pub async fn check_in(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<Attendance>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let org = user.context();
    let schedule = load_schedule(&state, &org, &user.id).await?;

    if payload.remote && !schedule.allow_remote {
        return Err(AppError::new(ErrorCode::RemoteNotAllowed));
    }
    if schedule.require_geolocation && payload.location.is_none() && !payload.remote {
        return Err(AppError::new(ErrorCode::LocationRequired));
    }

    let now = state.clock.now();
    let tz = state.config.timezone;
    let date = time::today_in(now, tz);

    let punctuality = timesheet::classify_punctuality(
        now,
        schedule.start_time,
        schedule.late_threshold_minutes,
        tz,
    );
    let status = if payload.remote {
        AttendanceStatus::Remote
    } else if punctuality == Punctuality::Late {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    };

    let record = Attendance {
        id: Uuid::new_v4().to_string(),
        organization_id: org.organization_id.clone(),
        employee_id: user.id.clone(),
        date,
        check_in: Some(now),
        check_out: None,
        worked_hours: 0.0,
        overtime_hours: 0.0,
        status,
        notes: payload.notes,
        location: payload.location,
        breaks: vec![],
    };

    let repo = AttendanceRepository::new(state.store()?);
    let (stored, created) = repo.create_if_absent(&record).await?;

    if !created {
        // Lost the upsert (or the day already has a row, e.g. an excused
        // absence tag): a check-in on top of an existing check-in is a
        // conflict; otherwise patch the existing row with the check-in.
        if stored.check_in.is_some() {
            return Err(AppError::new(ErrorCode::AlreadyCheckedIn)
                .with_detail("attendance_id", stored.id.clone()));
        }
        let patch = AttendanceUpdate {
            check_in: Some(now),
            status: Some(status),
            notes: record.notes.clone(),
            ..AttendanceUpdate::default()
        };
        let updated = repo.update(&org, &stored.id, &patch).await?;
        return Ok(Json(updated));
    }

    tracing::debug!(employee_id = %user.id, %date, ?status, "checked in");
    Ok(Json(stored))
}

/// POST /api/attendance/check-out - close the day's record and derive
/// worked/overtime hours
pub async fn check_out(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CheckOutRequest>,
) -> AppResult<Json<Attendance>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let org = user.context();
    let schedule = load_schedule(&state, &org, &user.id).await?;

    let now = state.clock.now();
    let date = time::today_in(now, state.config.timezone);

    let repo = AttendanceRepository::new(state.store()?);
    let record = repo
        .find_by_employee_and_date(&org, &user.id, date)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;

    let check_in = record.check_in.ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;
    if record.check_out.is_some() {
        return Err(AppError::new(ErrorCode::AlreadyCheckedOut));
    }

    // A break still open at check-out closes at the check-out instant.
    let mut breaks = record.breaks.clone();
    for interval in &mut breaks {
        if interval.end.is_none() {
            interval.end = Some(now);
        }
    }

    let worked = timesheet::worked_hours(check_in, Some(now), &breaks)?;
    let overtime = timesheet::overtime_hours(worked, schedule.standard_daily_hours);

    if let Some(max) = schedule.max_daily_hours
        && worked > max
    {
        tracing::warn!(
            employee_id = %user.id,
            worked,
            max,
            "worked hours exceed the policy maximum"
        );
    }

    let status = if overtime > 0.0 {
        Some(AttendanceStatus::Overtime)
    } else {
        None // keep the check-in classification
    };

    let patch = AttendanceUpdate {
        check_out: Some(now),
        worked_hours: Some(worked),
        overtime_hours: Some(overtime),
        status,
        notes: payload.notes,
        breaks: Some(breaks),
        ..AttendanceUpdate::default()
    };
    let updated = repo.update(&org, &record.id, &patch).await?;

    tracing::debug!(employee_id = %user.id, worked, overtime, "checked out");
    Ok(Json(updated))
}

/// POST /api/attendance/breaks/start
pub async fn break_start(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BreakStartRequest>,
) -> AppResult<Json<Attendance>> {
    let org = user.context();
    let now = state.clock.now();
    let date = time::today_in(now, state.config.timezone);

    let repo = AttendanceRepository::new(state.store()?);
    let record = repo
        .find_by_employee_and_date(&org, &user.id, date)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;

    if record.check_in.is_none() {
        return Err(AppError::new(ErrorCode::NotCheckedIn));
    }
    if record.check_out.is_some() {
        return Err(AppError::new(ErrorCode::AlreadyCheckedOut));
    }
    if record.open_break().is_some() {
        return Err(AppError::new(ErrorCode::BreakAlreadyOpen));
    }

    let mut breaks = record.breaks.clone();
    breaks.push(BreakInterval {
        start: now,
        end: None,
        break_type: payload.break_type,
    });

    let patch = AttendanceUpdate {
        breaks: Some(breaks),
        ..AttendanceUpdate::default()
    };
    let updated = repo.update(&org, &record.id, &patch).await?;
    Ok(Json(updated))
}

/// POST /api/attendance/breaks/end
pub async fn break_end(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Attendance>> {
    let org = user.context();
    let now = state.clock.now();
    let date = time::today_in(now, state.config.timezone);

    let repo = AttendanceRepository::new(state.store()?);
    let record = repo
        .find_by_employee_and_date(&org, &user.id, date)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;

    let mut breaks = record.breaks.clone();
    let open = breaks
        .iter_mut()
        .find(|b| b.end.is_none())
        .ok_or_else(|| AppError::new(ErrorCode::NoOpenBreak))?;
    open.end = Some(now);

    let patch = AttendanceUpdate {
        breaks: Some(breaks),
        ..AttendanceUpdate::default()
    };
    let updated = repo.update(&org, &record.id, &patch).await?;
    Ok(Json(updated))
}

/// GET /api/attendance/me - the caller's records in a date range
pub async fn my_history(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<Attendance>>> {
    let org = user.context();
    let start = time::parse_date(&query.start_date)?;
    let end = time::parse_date(&query.end_date)?;
    let records = AttendanceRepository::new(state.store()?)
        .find_range(&org, start, end, Some(&user.id))
        .await?;
    Ok(Json(records))
}

/// GET /api/attendance - records in a date range, optionally for one
/// employee (manager)
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<Attendance>>> {
    user.ensure_manager()?;
    let org = user.context();
    let start = time::parse_date(&query.start_date)?;
    let end = time::parse_date(&query.end_date)?;
    let records = AttendanceRepository::new(state.store()?)
        .find_range(&org, start, end, query.employee_id.as_deref())
        .await?;
    Ok(Json(records))
}

/// PUT /api/attendance/:id - admin edit; derived fields are recomputed
/// and malformed timestamp combinations rejected
pub async fn admin_update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<AttendanceUpdate>,
) -> AppResult<Json<Attendance>> {
    user.ensure_admin()?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let org = user.context();
    let repo = AttendanceRepository::new(state.store()?);
    let existing = repo
        .find_by_id(&org, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Attendance record {id}")))?;

    // Merge the patch over the stored record to validate the final shape.
    let check_in = payload.check_in.or(existing.check_in);
    let check_out = payload.check_out.or(existing.check_out);
    let breaks = payload.breaks.clone().unwrap_or_else(|| existing.breaks.clone());

    if check_in.is_none() && check_out.is_some() {
        return Err(AppError::validation(
            "attendance record cannot have a check-out without a check-in",
        ));
    }

    let (worked, overtime) = match check_in {
        Some(check_in) => {
            let worked = timesheet::worked_hours(check_in, check_out, &breaks)?;
            let employees = EmployeeRepository::new(state.store()?);
            let employee = employees.find_by_id(&org, &existing.employee_id).await?;
            let policy = WorkPolicyRepository::new(state.store()?).active(&org).await?;
            let schedule = EffectiveSchedule::resolve(
                policy.as_ref(),
                employee.as_ref().and_then(|e| e.schedule_override.as_ref()),
            );
            (worked, timesheet::overtime_hours(worked, schedule.standard_daily_hours))
        }
        None => (0.0, 0.0),
    };

    let patch = AttendanceUpdate {
        worked_hours: Some(worked),
        overtime_hours: Some(overtime),
        breaks: Some(breaks),
        ..payload
    };
    let updated = repo.update(&org, &id, &patch).await?;

    tracing::info!(attendance_id = %id, by = %user.id, "attendance record edited");
    Ok(Json(updated))
}
