//! Shared helpers for driving the router in integration tests.

#![allow(dead_code)]

use aurum_api::{
    config::{Config, InsightsConfig},
    db::DbPool,
    handlers,
    state::AppState,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

pub const DEMO_EMAIL: &str = "demo@aurum.local";

pub struct TestClient {
    router: Router,
}

impl TestClient {
    /// Client backed by a pool that never connects.
    ///
    /// Only usable for requests rejected before the database is reached.
    pub fn offline() -> Self {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://aurum@127.0.0.1:1/unreachable")
            .expect("lazy pool");
        Self::with_pool(pool, InsightsConfig::default())
    }

    pub fn with_pool(pool: DbPool, insights: InsightsConfig) -> Self {
        let config = Config {
            database_url: String::new(),
            server_port: 0,
            cors_origin: "http://localhost:3000".to_string(),
            demo_user_email: DEMO_EMAIL.to_string(),
            insights,
        };
        let router = handlers::routes().with_state(AppState::new(pool, &config));
        Self { router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
