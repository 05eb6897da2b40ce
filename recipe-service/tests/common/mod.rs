#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use recipe_service::{
    build_router,
    config::JwtConfig,
    models::UserId,
    services::{InMemoryRepository, IngredientRepository, JwtService},
    AppState,
};
use secrecy::Secret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const INGREDIENTS_URL: &str = "/ingredients/";
pub const TEST_USER_ID: &str = "test@outlook.com";
pub const OTHER_USER_ID: &str = "other@outlook.com";

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryRepository>,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn spawn() -> Self {
        service_core::observability::init_metrics().expect("Failed to install metrics recorder");

        let jwt = JwtService::new(&JwtConfig {
            secret: Secret::new("integration-test-secret".to_string()),
            issuer: None,
            leeway_seconds: 0,
        })
        .expect("Failed to create JWT service");

        let repository = Arc::new(InMemoryRepository::new());
        let state = AppState::new(repository.clone(), jwt.clone());

        TestApp {
            router: build_router(state, false),
            repository,
            jwt,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.jwt
            .issue_access_token(user_id, chrono::Duration::minutes(15))
            .expect("Failed to issue token")
    }

    pub async fn seed(&self, user_id: &str, name: &str) {
        self.repository
            .create(&UserId::new(user_id), name)
            .await
            .expect("Failed to seed ingredient");
    }

    pub async fn count_for(&self, user_id: &str) -> u64 {
        self.repository
            .count_by_owner(&UserId::new(user_id))
            .await
            .expect("Failed to count ingredients")
    }

    pub async fn exists(&self, user_id: &str, name: &str) -> bool {
        self.repository
            .exists_by_owner_and_name(&UserId::new(user_id), name)
            .await
            .expect("Failed to query ingredient")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

pub async fn read_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
