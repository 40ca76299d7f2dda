//! Employee API module (admin)
//!
//! Creation goes through `/api/accounts` (it provisions the auth
//! identity too); this module covers the rest of the lifecycle.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/employees", routes())
        .route_layer(middleware::from_fn(require_admin))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/all", get(handler::list_with_inactive))
        .route("/{id}", get(handler::get_by_id).put(handler::update).delete(handler::delete))
        .route("/{id}/deactivate", post(handler::deactivate))
}
