use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::convert::Infallible;

use crate::models::UserId;
use crate::services::JwtService;

/// Caller identity resolved from `Authorization: Bearer <jwt>`.
///
/// Never rejects: a missing, malformed or invalid token resolves to `None`
/// and the operation decides whether an identity is required.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<UserId>);

impl Caller {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    JwtService: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Caller(None));
        };

        let jwt = JwtService::from_ref(state);
        match jwt.validate_access_token(token) {
            Ok(claims) => {
                let user_id = claims.user_id();
                tracing::Span::current().record("user_id", user_id.as_str());
                Ok(Caller(Some(user_id)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token");
                Ok(Caller(None))
            }
        }
    }
}
