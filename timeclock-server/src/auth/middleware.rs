//! Authentication middleware
//!
//! Verifies the bearer token on every `/api/` request and injects
//! [`CurrentUser`] into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtVerifier};
use crate::core::ServerState;
use shared::AppError;

/// Authentication middleware - requires a signed-in session
///
/// Reads `Authorization: Bearer <token>`, verifies the signature and
/// expiry, then injects [`CurrentUser`].
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (health endpoints, 404s)
/// - `/api/auth/login`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtVerifier::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "missing authorization header");
            return Err(AppError::not_authenticated());
        }
    };

    match state.jwt.verify(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "token rejected");
            match e {
                JwtError::Expired => Err(AppError::token_expired()),
                JwtError::Invalid(_) => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Admin middleware - requires an admin or super_admin session
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            role = ?user.role,
            "admin route denied"
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }
    Ok(next.run(req).await)
}

/// Manager middleware - requires manager, admin, or super_admin
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;
    if !user.is_manager() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            role = ?user.role,
            "manager route denied"
        );
        return Err(AppError::new(shared::ErrorCode::ManagerRequired));
    }
    Ok(next.run(req).await)
}
