//! Statistics API module (manager)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/statistics", routes())
        .route_layer(middleware::from_fn(require_manager))
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get_statistics))
}
