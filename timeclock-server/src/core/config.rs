//! Server configuration
//!
//! All configuration is read from environment variables at startup.
//! A missing backend configuration is a reportable state surfaced by the
//! health endpoints and by data routes - never a startup crash.
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | BAAS_URL | (unset) | Backend service base URL |
//! | BAAS_ANON_KEY | (unset) | Backend anonymous API key |
//! | BAAS_SERVICE_KEY | (unset) | Privileged key for identity provisioning |
//! | BAAS_JWT_SECRET | (dev fallback) | Session token signing secret |
//! | PUBLIC_BASE_URL | (unset) | Application public base URL |
//! | ORG_TIMEZONE | UTC | Organization timezone (IANA name) |
//! | ENVIRONMENT | development | development / staging / production |
//! | LOG_LEVEL | info | tracing env-filter directive |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |

use chrono_tz::Tz;

/// Backend service endpoint configuration
#[derive(Debug, Clone)]
pub struct BaasConfig {
    pub url: String,
    pub anon_key: String,
    pub service_key: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Backend service endpoint; `None` means "not configured"
    pub baas: Option<BaasConfig>,
    /// Session token signing secret (shared with the backend auth service)
    pub jwt_secret: String,
    /// Application public base URL (links in exports, emails)
    pub public_base_url: Option<String>,
    /// Organization timezone; all stored instants are UTC, this is the
    /// display/day-boundary zone
    pub timezone: Tz,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let baas = match (std::env::var("BAAS_URL"), std::env::var("BAAS_ANON_KEY")) {
            (Ok(url), Ok(anon_key)) if !url.is_empty() && !anon_key.is_empty() => {
                Some(BaasConfig {
                    url,
                    anon_key,
                    service_key: std::env::var("BAAS_SERVICE_KEY").ok().filter(|k| !k.is_empty()),
                })
            }
            _ => None,
        };

        let timezone = std::env::var("ORG_TIMEZONE")
            .ok()
            .map(|name| {
                name.parse().unwrap_or_else(|_| {
                    tracing::warn!("Unknown ORG_TIMEZONE '{}', falling back to UTC", name);
                    chrono_tz::UTC
                })
            })
            .unwrap_or(chrono_tz::UTC);

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            baas,
            jwt_secret: load_jwt_secret(),
            public_base_url: std::env::var("PUBLIC_BASE_URL").ok().filter(|u| !u.is_empty()),
            timezone,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Test configuration with fixed values and no backend endpoint
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            baas: None,
            jwt_secret: "test-signing-secret-at-least-32-chars".into(),
            public_base_url: None,
            timezone: chrono_tz::UTC,
            environment: "test".into(),
            log_level: "warn".into(),
            log_dir: None,
        }
    }

    /// Whether the backend collaborators are configured
    pub fn baas_configured(&self) -> bool {
        self.baas.is_some()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn load_jwt_secret() -> String {
    match std::env::var("BAAS_JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            tracing::warn!("BAAS_JWT_SECRET is shorter than 32 characters; sessions will not verify against the backend");
            "insecure-development-secret-do-not-deploy".into()
        }
        Err(_) => {
            tracing::warn!("BAAS_JWT_SECRET not set; using an insecure development secret");
            "insecure-development-secret-do-not-deploy".into()
        }
    }
}
