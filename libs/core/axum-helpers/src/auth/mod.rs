//! JWT authentication and role guards.
//!
//! Tokens are stateless HS256 JWTs carrying the user's identity and role
//! flags. [`jwt_auth_middleware`] verifies the token and inserts
//! [`JwtClaims`] into request extensions; [`require_seller_or_admin`] and
//! [`require_admin`] gate routes on those claims.

mod config;
mod jwt;
mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL_SECS};
pub use middleware::{jwt_auth_middleware, require_admin, require_seller_or_admin};
