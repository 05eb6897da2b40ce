use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::models::UserId;

/// JWT service for access token validation
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: Option<String>,
    leeway_seconds: u64,
}

/// Claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Result<Self, AppError> {
        let secret = config.secret.expose_secret();
        if secret.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT secret must not be empty"
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: config.issuer.clone(),
            leeway_seconds: config.leeway_seconds,
        })
    }

    /// Mint an HS256 access token for `user_id`.
    ///
    /// Token issuance belongs to the identity provider; this exists for local
    /// tooling and tests that share the secret.
    pub fn issue_access_token(&self, user_id: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Validate and decode an access token
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_seconds;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Token subject is empty"
            )));
        }

        Ok(token_data.claims)
    }
}
