//! Core module - server configuration, state, and HTTP server
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared collaborator handles
//! - [`Server`] - HTTP server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::{BaasConfig, Config};
pub use server::{Server, build_app};
pub use state::{Clock, ServerState};
