//! Data-access and authentication collaborators
//!
//! Persistence, authentication, and row-level authorization live in a
//! hosted backend service; this module is the only place that talks to
//! it. Everything above works against the [`DataStore`] and
//! [`AuthGateway`] traits:
//!
//! - [`rest::RestStore`] / [`rest::RestAuthGateway`] - HTTP clients for
//!   the hosted service (PostgREST-style rows API + auth endpoints)
//! - [`memory::MemoryStore`] / [`memory::MemoryAuthGateway`] - in-process
//!   implementations used by the test suite

pub mod auth;
pub mod filter;
pub mod memory;
pub mod rest;

pub use auth::{AuthGateway, Identity, Session};
pub use filter::{Filter, Query, SortDir};
pub use memory::{MemoryAuthGateway, MemoryStore};
pub use rest::{RestAuthGateway, RestStore};

use async_trait::async_trait;
use serde_json::Value;
use shared::AppError;
use thiserror::Error;

/// Errors surfaced by the remote collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service could not be reached (network, timeout)
    #[error("remote service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a server-side failure
    #[error("remote operation failed: {0}")]
    Remote(String),

    /// The service rejected the request (4xx)
    #[error("remote service rejected the request: {0}")]
    Rejected(String),

    /// A returned row did not match the expected shape
    #[error("row decode failed: {0}")]
    Decode(String),

    /// No row matched
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was hit
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result type for collaborator operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::remote_unavailable(msg),
            StoreError::Remote(msg) => AppError::remote(msg),
            StoreError::Rejected(msg) => AppError::invalid(msg),
            StoreError::Decode(msg) => {
                AppError::remote("unexpected row shape from backend").with_detail("decode", msg)
            }
            StoreError::NotFound(what) => AppError::not_found(what),
            StoreError::Conflict(what) => AppError::already_exists(what),
        }
    }
}

/// Resolution strategy when an upsert hits an existing row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Keep the existing row untouched (first write wins)
    Ignore,
    /// Merge the new values over the existing row
    Merge,
}

/// Generic "rows in / rows out" data-access collaborator
///
/// Filtering supports equality, range, set membership, and ordering. No
/// transactions span multiple entities; every write is independent.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch rows matching the query
    async fn query(&self, entity: &str, query: Query) -> StoreResult<Vec<Value>>;

    /// Insert a row, returning the stored representation
    async fn insert(&self, entity: &str, row: Value) -> StoreResult<Value>;

    /// Insert a row unless one with the same `conflict_keys` values
    /// exists; returns the row now present. With [`OnConflict::Ignore`]
    /// the existing row wins atomically - this closes the check-then-act
    /// race on first check-in of the day.
    async fn upsert(
        &self,
        entity: &str,
        conflict_keys: &[&str],
        row: Value,
        on_conflict: OnConflict,
    ) -> StoreResult<Value>;

    /// Patch a row by id, returning the updated representation
    async fn update(&self, entity: &str, id: &str, patch: Value) -> StoreResult<Value>;

    /// Delete a row by id, returning the removed rows
    async fn delete(&self, entity: &str, id: &str) -> StoreResult<Vec<Value>>;

    /// Cheap reachability probe for health reporting
    async fn ping(&self) -> StoreResult<()>;
}
