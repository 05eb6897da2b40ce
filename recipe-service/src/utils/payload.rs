use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// Request body decoded from JSON or `application/x-www-form-urlencoded`.
///
/// Decoding failures surface as `AppError::BadRequest`. Handlers take
/// `Result<Payload<T>, AppError>` so they can authenticate before reporting
/// a bad body.
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Form parse error: {}", e)))?;
            return Ok(Payload(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e)))?;
        Ok(Payload(value))
    }
}
