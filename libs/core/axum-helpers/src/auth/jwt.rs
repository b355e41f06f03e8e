use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 30 days
pub const TOKEN_TTL_SECS: i64 = 2_592_000;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,     // Subject (user ID)
    pub name: String,    // User display name
    pub email: String,   // User email
    pub is_seller: bool, // Seller flag
    pub is_admin: bool,  // Admin flag
    pub exp: i64,        // Expiration time
    pub iat: i64,        // Issued at
}

impl JwtClaims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Stateless JWT authentication (HS256)
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create a signed token for a user.
    pub fn create_token(
        &self,
        user_id: Uuid,
        name: &str,
        email: &str,
        is_seller: bool,
        is_admin: bool,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp();
        let iat = now.timestamp();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            is_seller,
            is_admin,
            exp,
            iat,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
