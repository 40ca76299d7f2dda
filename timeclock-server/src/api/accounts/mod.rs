//! Account provisioning API module (admin)
//!
//! Identity creation talks to the privileged backend endpoint and must
//! never run outside an admin session.

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/accounts", routes())
        .route_layer(middleware::from_fn(require_admin))
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create))
}
