//! Shared test harness
//!
//! Drives the fully assembled app (router + middleware) against the
//! in-process collaborators, with a pinned clock.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use shared::models::EmployeeRole;
use timeclock_server::auth::jwt::{self, Claims};
use timeclock_server::baas::{Identity, MemoryAuthGateway, MemoryStore};
use timeclock_server::{Clock, Config, ServerState, build_app};

pub const ORG: &str = "org-1";

pub struct TestApp {
    pub state: ServerState,
    pub store: Arc<MemoryStore>,
    pub auth: Arc<MemoryAuthGateway>,
    pub clock: Clock,
}

impl TestApp {
    /// App with a pinned clock and empty collaborators
    pub fn new(now: DateTime<Utc>) -> Self {
        let config = Config::for_tests();
        let store = Arc::new(MemoryStore::new());
        let auth = Arc::new(MemoryAuthGateway::new(config.jwt_secret.clone()));
        let clock = Clock::fixed(now);
        let state =
            ServerState::with_collaborators(config, store.clone(), auth.clone(), clock.clone());
        Self {
            state,
            store,
            auth,
            clock,
        }
    }

    pub fn app(&self) -> Router {
        build_app(self.state.clone())
    }

    /// Seed an employee row and return a session token for them
    pub fn seed_employee(&self, id: &str, name: &str, role: EmployeeRole) -> String {
        self.seed_employee_in_department(id, name, role, None)
    }

    pub fn seed_employee_in_department(
        &self,
        id: &str,
        name: &str,
        role: EmployeeRole,
        department_id: Option<&str>,
    ) -> String {
        let email = format!("{id}@example.com");
        self.store.seed(
            "employees",
            json!({
                "id": id,
                "organization_id": ORG,
                "code": format!("EMP-{id}"),
                "full_name": name,
                "email": email,
                "phone": null,
                "department_id": department_id,
                "position_id": null,
                "role": serde_json::to_value(role).unwrap(),
                "is_active": true,
                "hire_date": "2025-01-15",
                "schedule_override": null,
            }),
        );
        self.auth.register(
            &email,
            "correct-horse-battery",
            Identity {
                id: id.to_string(),
                email: email.clone(),
                metadata: json!({"organization_id": ORG, "role": serde_json::to_value(role).unwrap()}),
            },
        );
        self.token_for(id, &email, role)
    }

    /// Mint a session token directly (same secret the verifier uses)
    pub fn token_for(&self, id: &str, email: &str, role: EmployeeRole) -> String {
        let now = self.clock.now();
        let claims = Claims {
            sub: id.to_string(),
            email: email.to_string(),
            org: ORG.to_string(),
            role,
            iat: now.timestamp(),
            exp: now.timestamp() + 3600,
        };
        jwt::sign(&self.state.config.jwt_secret, &claims).expect("token signing")
    }

    /// Seed the organization work policy: 09:00-18:00, 60 min break,
    /// 15 min grace, Mon-Fri
    pub fn seed_default_policy(&self) {
        self.store.seed(
            "work_policies",
            json!({
                "id": "policy-1",
                "organization_id": ORG,
                "start_time": "09:00:00",
                "end_time": "18:00:00",
                "break_minutes": 60,
                "late_threshold_minutes": 15,
                "working_days_per_week": 5,
                "allow_remote": true,
                "require_geolocation": false,
                "max_daily_hours": 12.0,
            }),
        );
    }

    /// Seed a bare attendance record (status present, 8 worked hours)
    pub fn seed_present_record(&self, employee_id: &str, date: &str, check_in: &str) {
        self.store.seed(
            "attendances",
            json!({
                "id": format!("att-{employee_id}-{date}"),
                "organization_id": ORG,
                "employee_id": employee_id,
                "date": date,
                "check_in": check_in,
                "check_out": null,
                "worked_hours": 8.0,
                "overtime_hours": 0.0,
                "status": "present",
                "notes": null,
                "location": null,
                "breaks": [],
            }),
        );
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.raw_request(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn raw_request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request build");

        let response = self.app().oneshot(request).await.expect("request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes()
            .to_vec();
        (status, bytes)
    }
}
