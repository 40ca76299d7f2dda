//! Administration and session API tests

mod common;

use chrono::{TimeZone, Utc};
use common::{ORG, TestApp};
use http::StatusCode;
use serde_json::json;
use shared::models::EmployeeRole;
use timeclock_server::{Config, ServerState, build_app};

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn api_routes_require_a_session() {
    let app = TestApp::new(noon());
    let (status, body) = app.request("GET", "/api/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn admin_routes_reject_plain_employees() {
    let app = TestApp::new(noon());
    let token = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);
    let (status, body) = app.request("GET", "/api/employees", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn login_yields_a_working_session() {
    let app = TestApp::new(noon());
    app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "e1@example.com", "password": "correct-horse-battery"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["employee"]["full_name"], "Ada Lovelace");

    let (status, body) = app.request("GET", "/api/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization_id"], ORG);
    assert_eq!(body["role"], "employee");
}

#[tokio::test]
async fn login_with_bad_credentials_is_uniform_401() {
    let app = TestApp::new(noon());
    app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "e1@example.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Unknown account reads identically
    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn account_provisioning_creates_identity_and_employee() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);

    let (status, body) = app
        .request(
            "POST",
            "/api/accounts",
            Some(&admin),
            Some(json!({
                "email": "new.hire@example.com",
                "password": "a-long-password",
                "full_name": "New Hire",
                "code": "EMP-100",
                "role": "employee",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["full_name"], "New Hire");
    assert_eq!(body["organization_id"], ORG);
    assert_eq!(body["is_active"], true);
    // Hire date defaults to today in the org timezone
    assert_eq!(body["hire_date"], "2026-03-02");

    // The provisioned identity can sign in immediately
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "new.hire@example.com", "password": "a-long-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Same email again conflicts before any identity is created
    let (status, body) = app
        .request(
            "POST",
            "/api/accounts",
            Some(&admin),
            Some(json!({
                "email": "new.hire@example.com",
                "password": "a-long-password",
                "full_name": "Duplicate",
                "code": "EMP-101",
                "role": "employee",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5002);
}

#[tokio::test]
async fn account_provisioning_validates_before_any_network_call() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);

    let (status, body) = app
        .request(
            "POST",
            "/api/accounts",
            Some(&admin),
            Some(json!({
                "email": "not-an-email",
                "password": "short",
                "full_name": "",
                "code": "X",
                "role": "employee",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("password").is_some());
}

#[tokio::test]
async fn employee_lifecycle_update_deactivate_delete() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);
    app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "PUT",
            "/api/employees/e1",
            Some(&admin),
            Some(json!({"full_name": "Ada King"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Ada King");

    let (status, body) = app
        .request("POST", "/api/employees/e1/deactivate", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    // Active listing no longer contains them; /all does
    let (_, body) = app.request("GET", "/api/employees", Some(&admin), None).await;
    assert!(body.as_array().unwrap().iter().all(|e| e["id"] != "e1"));
    let (_, body) = app.request("GET", "/api/employees/all", Some(&admin), None).await;
    assert!(body.as_array().unwrap().iter().any(|e| e["id"] == "e1"));

    let (status, body) = app.request("DELETE", "/api/employees/e1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, _) = app.request("GET", "/api/employees/e1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn department_crud_with_code_uniqueness() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);
    let employee = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/departments",
            Some(&admin),
            Some(json!({"name": "Engineering", "code": "ENG"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    // Duplicate code conflicts
    let (status, body) = app
        .request(
            "POST",
            "/api/departments",
            Some(&admin),
            Some(json!({"name": "Engine Room", "code": "ENG"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5003);

    // Writes are admin-only, reads are not
    let (status, _) = app
        .request(
            "POST",
            "/api/departments",
            Some(&employee),
            Some(json!({"name": "Shadow", "code": "SHD"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = app.request("GET", "/api/departments", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/departments/{id}"),
            Some(&admin),
            Some(json!({"is_active": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (status, _) = app
        .request("DELETE", &format!("/api/departments/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn policy_upsert_then_read_back() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);
    let employee = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    // No policy yet
    let (status, body) = app.request("GET", "/api/policy", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, body) = app
        .request(
            "PUT",
            "/api/policy",
            Some(&admin),
            Some(json!({"start_time": "08:30:00", "late_threshold_minutes": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_time"], "08:30:00");
    assert_eq!(body["late_threshold_minutes"], 10);
    // Unpatched fields come from the defaults
    assert_eq!(body["working_days_per_week"], 5);

    let (status, body) = app.request("GET", "/api/policy", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_time"], "08:30:00");

    // Inverted times are rejected
    let (status, _) = app
        .request(
            "PUT",
            "/api/policy",
            Some(&admin),
            Some(json!({"start_time": "18:00:00", "end_time": "09:00:00"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_visibility_follows_role() {
    let app = TestApp::new(noon());
    let admin = app.seed_employee("adm", "Site Admin", EmployeeRole::Admin);
    let employee = app.seed_employee("e1", "Ada Lovelace", EmployeeRole::Employee);

    app.request(
        "PUT",
        "/api/settings/branding/company_name",
        Some(&admin),
        Some(json!({"value": "Acme Corp", "is_public": true})),
    )
    .await;
    app.request(
        "PUT",
        "/api/settings/payroll/export_day",
        Some(&admin),
        Some(json!({"value": 25, "is_public": false})),
    )
    .await;

    let (_, body) = app.request("GET", "/api/settings", Some(&admin), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = app.request("GET", "/api/settings", Some(&employee), None).await;
    let visible = body.as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["key"], "company_name");

    // Employees cannot write settings
    let (status, _) = app
        .request(
            "PUT",
            "/api/settings/branding/company_name",
            Some(&employee),
            Some(json!({"value": "Evil Corp", "is_public": true})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_backend_configuration_is_reported_not_fatal() {
    // State built without collaborators: health reports it, data routes
    // answer 503 with the not-configured code.
    let config = Config::for_tests();
    let state = ServerState::initialize(&config);
    let app = build_app(state.clone());

    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(
            http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["baas_configured"], false);

    // An authenticated data route reports "not configured" instead of
    // crashing
    let helper = TestApp::new(noon());
    let token = helper.token_for("e1", "e1@example.com", EmployeeRole::Employee);
    let response = app
        .oneshot(
            http::Request::builder()
                .uri("/api/attendance/today")
                .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 9004);
}
