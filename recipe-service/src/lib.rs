pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    extract::FromRef,
    middleware::from_fn,
    routing::get,
    Json, Router,
};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{http_request_span, request_id_middleware},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::{openapi::security::SecurityScheme, Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::services::{IngredientRepository, IngredientService, JwtService};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::ingredients::list_ingredients,
        handlers::ingredients::create_ingredient,
    ),
    components(schemas(
        dtos::ErrorResponse,
        dtos::ingredients::CreateIngredientRequest,
        dtos::ingredients::IngredientResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Ingredients", description = "Per-user ingredient catalogue"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub ingredients: IngredientService,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(repository: Arc<dyn IngredientRepository>, jwt: JwtService) -> Self {
        Self {
            ingredients: IngredientService::new(repository),
            jwt,
        }
    }
}

impl FromRef<AppState> for JwtService {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

pub fn build_router(state: AppState, swagger_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route(
            "/ingredients",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/ingredients/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        );

    if swagger_enabled {
        app = app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    app.with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}
