//! End-to-end attendance scenarios against the in-process collaborators

mod common;

use chrono::{TimeZone, Utc};
use common::TestApp;
use http::StatusCode;
use serde_json::json;
use shared::models::EmployeeRole;

fn monday_at(h: u32, m: u32) -> chrono::DateTime<Utc> {
    // 2026-03-02 is a Monday
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

#[tokio::test]
async fn check_in_within_grace_is_on_time() {
    // Policy 09:00 + 15 min grace; check-in at 09:10
    let app = TestApp::new(monday_at(9, 10));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "present");
    assert_eq!(body["date"], "2026-03-02");
    assert!(!body["check_in"].is_null());
    assert!(body["check_out"].is_null());
}

#[tokio::test]
async fn check_in_past_grace_is_late() {
    // Same policy; check-in at 09:20
    let app = TestApp::new(monday_at(9, 20));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "late");
}

#[tokio::test]
async fn second_check_in_same_day_conflicts() {
    let app = TestApp::new(monday_at(9, 0));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, _) = app
        .request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn full_day_with_break_derives_hours_and_overtime() {
    // 08:00 check-in, 30-minute break, 17:00 check-out against an
    // 8-hour standard: 8.5 worked, 0.5 overtime
    let app = TestApp::new(monday_at(8, 0));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, _) = app
        .request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    app.clock.set(monday_at(12, 0));
    let (status, _) = app
        .request(
            "POST",
            "/api/attendance/breaks/start",
            Some(&token),
            Some(json!({"break_type": "lunch"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.clock.set(monday_at(12, 30));
    let (status, body) = app
        .request("POST", "/api/attendance/breaks/end", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breaks"].as_array().unwrap().len(), 1);

    app.clock.set(monday_at(17, 0));
    let (status, body) = app
        .request("POST", "/api/attendance/check-out", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["worked_hours"], 8.5);
    assert_eq!(body["overtime_hours"], 0.5);
    assert_eq!(body["status"], "overtime");
}

#[tokio::test]
async fn check_out_without_check_in_conflicts() {
    let app = TestApp::new(monday_at(17, 0));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request("POST", "/api/attendance/check-out", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn break_requires_open_day_and_no_open_break() {
    let app = TestApp::new(monday_at(9, 0));
    app.seed_default_policy();
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    // No check-in yet
    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/breaks/start",
            Some(&token),
            Some(json!({"break_type": "coffee"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    app.request("POST", "/api/attendance/check-in", Some(&token), Some(json!({})))
        .await;

    app.clock.set(monday_at(11, 0));
    let (status, _) = app
        .request(
            "POST",
            "/api/attendance/breaks/start",
            Some(&token),
            Some(json!({"break_type": "coffee"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Second break while one is open
    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/breaks/start",
            Some(&token),
            Some(json!({"break_type": "coffee"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4004);
}

#[tokio::test]
async fn today_without_record_is_a_valid_empty_state() {
    let app = TestApp::new(monday_at(8, 0));
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request("GET", "/api/attendance/today", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn remote_check_in_respects_policy() {
    let app = TestApp::new(monday_at(9, 0));
    app.store.seed(
        "work_policies",
        json!({
            "id": "policy-1",
            "organization_id": common::ORG,
            "start_time": "09:00:00",
            "end_time": "18:00:00",
            "break_minutes": 60,
            "late_threshold_minutes": 15,
            "working_days_per_week": 5,
            "allow_remote": false,
            "require_geolocation": false,
            "max_daily_hours": 12.0,
        }),
    );
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            Some(json!({"remote": true})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);
}

#[tokio::test]
async fn attendance_rate_for_seven_of_ten_is_seventy() {
    // 10 active employees, 7 present today
    let app = TestApp::new(monday_at(18, 0));
    app.seed_default_policy();
    let manager = app.seed_employee("mgr", "Grace Hopper", EmployeeRole::Manager);
    for i in 1..=9 {
        app.seed_employee(&format!("e{i}"), &format!("Employee {i}"), EmployeeRole::Employee);
    }
    // Manager plus six others were present
    app.seed_present_record("mgr", "2026-03-02", "2026-03-02T08:55:00Z");
    for i in 1..=6 {
        app.seed_present_record(&format!("e{i}"), "2026-03-02", "2026-03-02T09:00:00Z");
    }

    let (status, body) = app
        .request("GET", "/api/statistics?time_range=today", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"]["headcount"], 10);
    assert_eq!(body["overview"]["expected_days"], 10);
    assert_eq!(body["overview"]["present_days"], 7);
    assert_eq!(body["overview"]["attendance_rate"], 70.0);
    assert_eq!(body["overview"]["absent_days"], 3);
}

#[tokio::test]
async fn statistics_break_down_by_department() {
    let app = TestApp::new(monday_at(18, 0));
    app.seed_default_policy();
    app.store.seed(
        "departments",
        json!({
            "id": "d-eng",
            "organization_id": common::ORG,
            "name": "Engineering",
            "code": "ENG",
            "manager_id": null,
            "is_active": true,
        }),
    );
    let manager = app.seed_employee("mgr", "Grace Hopper", EmployeeRole::Manager);
    app.seed_employee_in_department("e1", "Ada Lovelace", EmployeeRole::Employee, Some("d-eng"));
    app.seed_present_record("e1", "2026-03-02", "2026-03-02T09:00:00Z");
    app.seed_present_record("mgr", "2026-03-02", "2026-03-02T08:55:00Z");

    let (status, body) = app
        .request("GET", "/api/statistics?time_range=today", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let by_department = body["by_department"].as_array().unwrap();
    assert_eq!(by_department.len(), 2);
    let eng = by_department
        .iter()
        .find(|d| d["name"] == "Engineering")
        .unwrap();
    assert_eq!(eng["present_days"], 1);
    let unassigned = by_department
        .iter()
        .find(|d| d["department_id"] == "unassigned")
        .unwrap();
    assert_eq!(unassigned["present_days"], 1);
}

#[tokio::test]
async fn csv_export_has_header_plus_row_per_record_all_quoted() {
    let app = TestApp::new(monday_at(18, 0));
    let manager = app.seed_employee("mgr", "Grace Hopper", EmployeeRole::Manager);
    app.seed_employee("e1", "Ada, the Countess", EmployeeRole::Employee);
    app.seed_present_record("e1", "2026-03-02", "2026-03-02T09:00:00Z");
    app.seed_present_record("mgr", "2026-03-02", "2026-03-02T08:55:00Z");

    let (status, bytes) = app
        .raw_request(
            "GET",
            "/api/reports/attendance/export?start_date=2026-03-01&end_date=2026-03-07",
            Some(&manager),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let body = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        r#""Date","Employee","Code","Check In","Check Out","Worked Hours","Overtime Hours","Status""#
    );
    // The comma inside the employee name survives because every field is
    // quoted.
    assert!(body.contains(r#""Ada, the Countess""#));
}

#[tokio::test]
async fn calendar_grid_is_42_cells_with_current_month_flags() {
    let app = TestApp::new(monday_at(12, 0));
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request("GET", "/api/calendar/2026/3", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let cells = body["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 42);
    let in_month = cells
        .iter()
        .filter(|c| c["is_current_month"] == true)
        .count();
    assert_eq!(in_month, 31);
}

#[tokio::test]
async fn employee_cannot_read_another_employees_calendar() {
    let app = TestApp::new(monday_at(12, 0));
    let employee = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);
    app.seed_employee("e2", "Charles Babbage", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "GET",
            "/api/calendar/2026/3?employee_id=e2",
            Some(&employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let manager = app.seed_employee("mgr", "Grace Hopper", EmployeeRole::Manager);
    let (status, _) = app
        .request(
            "GET",
            "/api/calendar/2026/3?employee_id=e2",
            Some(&manager),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
