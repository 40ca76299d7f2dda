//! Attendance API module
//!
//! Personal check-in/out and break flows, plus organization-wide
//! listing (manager) and record editing (admin).

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/today", get(handler::today))
        .route("/me", get(handler::my_history))
        .route("/check-in", post(handler::check_in))
        .route("/check-out", post(handler::check_out))
        .route("/breaks/start", post(handler::break_start))
        .route("/breaks/end", post(handler::break_end))
        .route("/{id}", put(handler::admin_update))
}
