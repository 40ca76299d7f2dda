//! Health check routes
//!
//! Public routes (no authentication). A missing backend configuration is
//! reported here as a state, not an error.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health routes - public (no authentication)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    /// Whether the backend collaborators are configured
    baas_configured: bool,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    baas_configured: bool,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    backend: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }

    fn not_configured() -> Self {
        Self {
            status: "not_configured",
            latency_ms: None,
            message: None,
        }
    }
}

/// Basic health check
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        baas_configured: state.is_configured(),
    })
}

/// Detailed health check including backend reachability
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let backend = match state.store() {
        Ok(store) => {
            let started = std::time::Instant::now();
            match store.ping().await {
                Ok(()) => CheckResult::ok_with_latency(started.elapsed().as_millis() as u64),
                Err(e) => CheckResult::error(e.to_string()),
            }
        }
        Err(_) => CheckResult::not_configured(),
    };

    let status = if backend.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(DetailedHealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        baas_configured: state.is_configured(),
        checks: HealthChecks { backend },
    })
}
