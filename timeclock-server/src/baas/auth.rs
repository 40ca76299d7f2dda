//! Authentication-session collaborator interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StoreResult;

/// An authentication identity held by the backend auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    /// Application claims attached at provisioning time
    /// (organization id, role)
    #[serde(default)]
    pub metadata: Value,
}

/// A signed-in session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub identity: Identity,
}

/// Authentication collaborator
///
/// Credential storage and verification live in the backend service; the
/// application only exchanges credentials for sessions and provisions
/// identities from privileged (server-side) handlers.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange email/password for a session
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session>;

    /// Resolve the identity behind an access token
    async fn current_identity(&self, access_token: &str) -> StoreResult<Identity>;

    /// Invalidate a session
    async fn sign_out(&self, access_token: &str) -> StoreResult<()>;

    /// Provision a new identity (privileged; never callable from the
    /// browser-facing surface without the admin layer)
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> StoreResult<Identity>;
}
