use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Paths serving the Swagger UI and its OpenAPI document.
fn is_docs_route(path: &str) -> bool {
    path.starts_with("/docs") || path == "/.well-known/openapi.json"
}

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let docs_route = is_docs_route(req.uri().path());

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        header::HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    // Swagger UI needs inline scripts and styles from the same origin.
    if docs_route {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self' 'unsafe-inline'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:",
            ),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("SAMEORIGIN"),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_docs_routes() {
        assert!(is_docs_route("/docs"));
        assert!(is_docs_route("/docs/index.html"));
        assert!(is_docs_route("/.well-known/openapi.json"));
        assert!(!is_docs_route("/ingredients/"));
    }
}
