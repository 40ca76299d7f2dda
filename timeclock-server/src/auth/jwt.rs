//! Session token verification
//!
//! Tokens are minted by the backend auth service and verified here with
//! the shared signing secret. The application never issues production
//! tokens itself; [`sign`] exists for the in-memory gateway and tests.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::OrgContext;
use shared::models::EmployeeRole;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id; equals the employee row id
    pub sub: String,
    pub email: String,
    /// Organization (tenant) id
    pub org: String,
    pub role: EmployeeRole,
    pub iat: i64,
    pub exp: i64,
}

/// Token verification errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Verifies backend-issued session tokens (HS256, shared secret)
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Verify and decode a token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            }
        })?;
        Ok(data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Sign claims with the shared secret (in-memory gateway and tests)
pub fn sign(secret: &str, claims: &Claims) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::Invalid(e.to_string()))
}

/// Current user context (from verified session claims)
///
/// Injected into request extensions by the authentication middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Employee id (identity subject)
    pub id: String,
    pub email: String,
    pub organization_id: String,
    pub role: EmployeeRole,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            organization_id: claims.org,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    /// Administrator-level session
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Manager-level session (aggregate views, other employees' data)
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Tenant context for repository calls
    pub fn context(&self) -> OrgContext {
        OrgContext::new(&self.organization_id, &self.id)
    }

    /// Guard for admin-only operations inside mixed routers
    pub fn ensure_admin(&self) -> Result<(), shared::AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(shared::AppError::new(shared::ErrorCode::AdminRequired))
        }
    }

    /// Guard for manager-level operations inside mixed routers
    pub fn ensure_manager(&self) -> Result<(), shared::AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(shared::AppError::new(shared::ErrorCode::ManagerRequired))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "test-signing-secret-at-least-32-chars";

    fn claims(role: EmployeeRole, exp_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "emp-1".into(),
            email: "ada@example.com".into(),
            org: "org-1".into(),
            role,
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn signs_and_verifies() {
        let token = sign(SECRET, &claims(EmployeeRole::Manager, 600)).unwrap();
        let verified = JwtVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(verified.sub, "emp-1");
        assert_eq!(verified.org, "org-1");
        assert_eq!(verified.role, EmployeeRole::Manager);
    }

    #[test]
    fn rejects_expired_tokens() {
        let token = sign(SECRET, &claims(EmployeeRole::Employee, -600)).unwrap();
        assert!(matches!(
            JwtVerifier::new(SECRET).verify(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign(SECRET, &claims(EmployeeRole::Employee, 600)).unwrap();
        assert!(matches!(
            JwtVerifier::new("another-secret-of-sufficient-length").verify(&token),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn role_gates() {
        let admin = CurrentUser::from(claims(EmployeeRole::Admin, 600));
        let manager = CurrentUser::from(claims(EmployeeRole::Manager, 600));
        let employee = CurrentUser::from(claims(EmployeeRole::Employee, 600));
        assert!(admin.is_admin() && admin.is_manager());
        assert!(!manager.is_admin() && manager.is_manager());
        assert!(!employee.is_admin() && !employee.is_manager());
    }
}
