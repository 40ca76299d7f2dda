//! API routes
//!
//! # Structure
//!
//! - [`health`] - health checks (public)
//! - [`auth`] - login, session, logout
//! - [`accounts`] - identity provisioning (admin)
//! - [`employees`] - employee administration (admin)
//! - [`departments`] - department management
//! - [`positions`] - position management
//! - [`attendance`] - check-in/out, breaks, record listing
//! - [`policy`] - organization work policy
//! - [`settings`] - organization settings
//! - [`statistics`] - aggregate dashboard (manager)
//! - [`calendar`] - month grid projection
//! - [`reports`] - CSV exports (manager)

pub mod accounts;
pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod departments;
pub mod employees;
pub mod health;
pub mod policy;
pub mod positions;
pub mod reports;
pub mod settings;
pub mod statistics;

use axum::Router;

use crate::core::ServerState;

/// All routes, without middleware or state
pub fn router() -> Router<ServerState> {
    Router::new()
        // Public routes
        .merge(health::router())
        // Authenticated routes
        .merge(auth::router())
        .merge(attendance::router())
        .merge(calendar::router())
        .merge(departments::router())
        .merge(positions::router())
        .merge(policy::router())
        .merge(settings::router())
        // Manager routes
        .merge(statistics::router())
        .merge(reports::router())
        // Admin routes
        .merge(accounts::router())
        .merge(employees::router())
}
