#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use servis_hp_api::{
    config::AppConfig,
    db,
    services::users::{LoginRequest, SignupRequest},
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const STAFF_USERNAME: &str = "rina";
pub const STAFF_PASSWORD: &str = "rina-secret";

/// Helper harness for spinning up the application against a throwaway SQLite file
pub struct TestApp {
    router: Router,
    pub state: AppState,
    admin_token: String,
    staff_token: String,
    pub staff_user_id: i32,
    _db_dir: TempDir,
}

impl TestApp {
    /// Fresh database with one admin and one employee account
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir");
        let db_path = db_dir.path().join("servis_hp_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.low_stock_threshold = 5;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg).expect("build app state");

        state
            .services
            .users
            .ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("seed admin");
        let staff = state
            .services
            .users
            .signup(SignupRequest {
                name: "Rina Teknisi".into(),
                username: STAFF_USERNAME.into(),
                password: STAFF_PASSWORD.into(),
            })
            .await
            .expect("seed employee account");

        let admin_token = login(&state, ADMIN_USERNAME, ADMIN_PASSWORD).await;
        let staff_token = login(&state, STAFF_USERNAME, STAFF_PASSWORD).await;

        let router = servis_hp_api::build_router(state.clone());

        Self {
            router,
            state,
            admin_token,
            staff_token,
            staff_user_id: staff.id,
            _db_dir: db_dir,
        }
    }

    pub fn admin_token(&self) -> &str {
        &self.admin_token
    }

    pub fn staff_token(&self) -> &str {
        &self.staff_token
    }

    /// Send a request against the router with an optional bearer token
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Request as the seeded employee
    pub async fn as_staff(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request(method, uri, body, Some(self.staff_token())).await
    }

    /// Request as the seeded admin
    pub async fn as_admin(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request(method, uri, body, Some(self.admin_token())).await
    }

    /// Creates an inventory item and returns its id
    pub async fn seed_item(&self, name: &str, stock: i32, sale_price: &str, cost_price: &str) -> i64 {
        let response = self
            .as_staff(
                Method::POST,
                "/api/v1/inventory",
                Some(json!({
                    "name": name,
                    "stock": stock,
                    "sale_price": sale_price,
                    "cost_price": cost_price,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await["data"]["id"]
            .as_i64()
            .expect("inventory id")
    }

    /// Creates a repair order and returns the response body
    pub async fn seed_order(&self, body: Value) -> Value {
        let response = self
            .as_staff(Method::POST, "/api/v1/repair-orders", Some(body))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await
    }
}

async fn login(state: &AppState, username: &str, password: &str) -> String {
    state
        .services
        .users
        .login(LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .await
        .expect("login seeded account")
        .token
}

pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("response body is json")
}

/// Decimal amounts serialize as strings; compare them numerically
pub fn amount(value: &Value) -> rust_decimal::Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        Value::Number(n) => n.to_string().parse().expect("decimal number"),
        other => panic!("not an amount: {other}"),
    }
}
