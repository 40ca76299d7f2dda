//! Calendar API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/calendar", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{year}/{month}", get(handler::month))
}
