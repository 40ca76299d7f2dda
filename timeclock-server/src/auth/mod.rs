//! Session verification and authorization
//!
//! Sessions are issued by the backend auth service as signed JWTs; this
//! module verifies them locally and injects a [`CurrentUser`] into
//! request extensions - the explicit identity context every handler and
//! repository call receives.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtError, JwtVerifier};
pub use middleware::{require_admin, require_auth, require_manager};
