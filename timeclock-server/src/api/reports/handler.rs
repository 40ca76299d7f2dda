//! Report export handlers
//!
//! CSV documents: a header row of human-readable labels, one row per
//! record, every field quoted.

use std::collections::HashMap;

use axum::extract::{Extension, Query, State};
use axum::response::{IntoResponse, Response};
use http::header;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::{
    AttendanceRepository, DepartmentRepository, EmployeeRepository, PositionRepository,
};
use crate::utils::csv::csv_document;
use crate::utils::time;
use shared::error::AppResult;

const ATTENDANCE_HEADERS: [&str; 8] = [
    "Date",
    "Employee",
    "Code",
    "Check In",
    "Check Out",
    "Worked Hours",
    "Overtime Hours",
    "Status",
];

const EMPLOYEE_HEADERS: [&str; 8] = [
    "Code",
    "Full Name",
    "Email",
    "Phone",
    "Department",
    "Position",
    "Role",
    "Hire Date",
];

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub start_date: String,
    pub end_date: String,
    pub employee_id: Option<String>,
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/reports/attendance/export - attendance records as CSV
pub async fn export_attendance(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let org = user.context();
    let start = time::parse_date(&query.start_date)?;
    let end = time::parse_date(&query.end_date)?;
    let tz = state.config.timezone;

    let records = AttendanceRepository::new(state.store()?)
        .find_range(&org, start, end, query.employee_id.as_deref())
        .await?;

    let names: HashMap<String, (String, String)> = EmployeeRepository::new(state.store()?)
        .find_all_with_inactive(&org)
        .await?
        .into_iter()
        .map(|e| (e.id, (e.full_name, e.code)))
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let (name, code) = names
                .get(&r.employee_id)
                .cloned()
                .unwrap_or_else(|| (r.employee_id.clone(), String::new()));
            let status = serde_json::to_value(r.status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            vec![
                r.date.to_string(),
                name,
                code,
                r.check_in.map(|t| time::format_local(t, tz)).unwrap_or_default(),
                r.check_out.map(|t| time::format_local(t, tz)).unwrap_or_default(),
                format!("{:.2}", r.worked_hours),
                format!("{:.2}", r.overtime_hours),
                status,
            ]
        })
        .collect();

    let body = csv_document(&ATTENDANCE_HEADERS, &rows);
    let filename = format!("attendance_{}_{}.csv", query.start_date, query.end_date);
    Ok(csv_response(&filename, body))
}

/// GET /api/reports/employees/export - the employee table as CSV
pub async fn export_employees(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let org = user.context();

    let employees = EmployeeRepository::new(state.store()?).find_all(&org).await?;
    let departments: HashMap<String, String> = DepartmentRepository::new(state.store()?)
        .find_all(&org)
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    let positions: HashMap<String, String> = PositionRepository::new(state.store()?)
        .find_all(&org)
        .await?
        .into_iter()
        .map(|p| (p.id, p.title))
        .collect();

    let rows: Vec<Vec<String>> = employees
        .iter()
        .map(|e| {
            let role = serde_json::to_value(e.role)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            vec![
                e.code.clone(),
                e.full_name.clone(),
                e.email.clone(),
                e.phone.clone().unwrap_or_default(),
                e.department_id
                    .as_ref()
                    .and_then(|id| departments.get(id).cloned())
                    .unwrap_or_default(),
                e.position_id
                    .as_ref()
                    .and_then(|id| positions.get(id).cloned())
                    .unwrap_or_default(),
                role,
                e.hire_date.to_string(),
            ]
        })
        .collect();

    let body = csv_document(&EMPLOYEE_HEADERS, &rows);
    Ok(csv_response("employees.csv", body))
}
