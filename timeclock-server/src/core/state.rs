//! Server state
//!
//! Shared handles to configuration and the backend collaborators. Arc
//! everywhere, so cloning the state into handlers is cheap.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use shared::error::{AppResult, ErrorCode};
use shared::AppError;

use crate::auth::JwtVerifier;
use crate::baas::{AuthGateway, DataStore, RestAuthGateway, RestStore};
use crate::core::Config;

/// Time source
///
/// Production reads the system clock; tests pin it to exercise
/// punctuality and duration math deterministically.
#[derive(Clone, Default)]
pub struct Clock(Arc<Mutex<Option<DateTime<Utc>>>>);

impl Clock {
    /// System clock
    pub fn system() -> Self {
        Self::default()
    }

    /// Clock pinned to a fixed instant (tests)
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(Some(instant))))
    }

    /// Re-pin a fixed clock (tests)
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.0.lock().expect("clock lock") = Some(instant);
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.0.lock().expect("clock lock").unwrap_or_else(Utc::now)
    }
}

/// Server state - shared handles to all collaborators
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Session token verifier
    pub jwt: Arc<JwtVerifier>,
    /// Time source
    pub clock: Clock,
    /// Rows collaborator; `None` when the backend is not configured
    store: Option<Arc<dyn DataStore>>,
    /// Auth collaborator; `None` when the backend is not configured
    auth: Option<Arc<dyn AuthGateway>>,
}

impl ServerState {
    /// Initialize state from configuration
    ///
    /// A missing backend configuration leaves the collaborators unset;
    /// data routes then answer "not configured" instead of crashing the
    /// process at startup.
    pub fn initialize(config: &Config) -> Self {
        let (store, auth): (Option<Arc<dyn DataStore>>, Option<Arc<dyn AuthGateway>>) =
            match &config.baas {
                Some(baas) => {
                    let store = RestStore::new(baas.url.clone(), baas.anon_key.clone());
                    let gateway = RestAuthGateway::new(
                        baas.url.clone(),
                        baas.anon_key.clone(),
                        baas.service_key.clone(),
                    );
                    (Some(Arc::new(store)), Some(Arc::new(gateway)))
                }
                None => {
                    tracing::warn!(
                        "BAAS_URL / BAAS_ANON_KEY not set - data routes will report 'not configured'"
                    );
                    (None, None)
                }
            };

        Self {
            jwt: Arc::new(JwtVerifier::new(&config.jwt_secret)),
            clock: Clock::system(),
            config: config.clone(),
            store,
            auth,
        }
    }

    /// Build state around explicit collaborators (tests)
    pub fn with_collaborators(
        config: Config,
        store: Arc<dyn DataStore>,
        auth: Arc<dyn AuthGateway>,
        clock: Clock,
    ) -> Self {
        Self {
            jwt: Arc::new(JwtVerifier::new(&config.jwt_secret)),
            clock,
            config,
            store: Some(store),
            auth: Some(auth),
        }
    }

    /// The rows collaborator, or a "not configured" error
    pub fn store(&self) -> AppResult<Arc<dyn DataStore>> {
        self.store
            .clone()
            .ok_or_else(|| AppError::new(ErrorCode::NotConfigured))
    }

    /// The auth collaborator, or a "not configured" error
    pub fn auth_gateway(&self) -> AppResult<Arc<dyn AuthGateway>> {
        self.auth
            .clone()
            .ok_or_else(|| AppError::new(ErrorCode::NotConfigured))
    }

    /// Whether the backend collaborators are configured
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }
}
