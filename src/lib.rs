//! Servis HP API Library
//!
//! Backend for a phone-repair shop: repair orders and their costing,
//! spare-part inventory, staff, financial reports and public repair tracking.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::ToSchema;

use crate::auth::{AuthConfig, AuthRouterExt, AuthService};
use crate::entities::user::UserRole;
use crate::errors::ServiceError;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, config: config::AppConfig) -> Result<Self, ServiceError> {
        let auth = Arc::new(AuthService::new(AuthConfig::from(&config)));
        let services = handlers::AppServices::new(db.clone(), &config, auth.clone())?;

        Ok(Self {
            db,
            config,
            services,
            auth,
        })
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
            meta: Some(ResponseMeta::capture()),
        }
    }
}


/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<axum::Json<ApiResponse<T>>, errors::ServiceError>;

/// Routes under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    // Public: accounts and customer tracking
    let public = Router::new()
        .route("/status", get(handlers::health::api_status))
        .route("/health", get(handlers::health::health_check))
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route(
            "/repair-orders/search",
            get(handlers::tracking::search_repairs),
        );

    let session = Router::new()
        .route("/me", get(handlers::auth::me))
        .with_auth();

    // Admin only
    let employees = Router::new()
        .route(
            "/admin/employees/available-users",
            get(handlers::employees::available_users),
        )
        .route(
            "/admin/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/admin/employees/:id",
            put(handlers::employees::update_employee).delete(handlers::employees::delete_employee),
        )
        .with_role(UserRole::Admin);

    // Shop floor: employees (and admins)
    let inventory = Router::new()
        .route(
            "/inventory",
            get(handlers::inventory::list_inventory).post(handlers::inventory::create_inventory),
        )
        .route(
            "/inventory/low-stock",
            get(handlers::inventory::get_low_stock_items),
        )
        .route(
            "/inventory/:id",
            get(handlers::inventory::get_inventory)
                .put(handlers::inventory::update_inventory)
                .delete(handlers::inventory::delete_inventory),
        )
        .with_role(UserRole::Employee);

    let repair_orders = Router::new()
        .route(
            "/repair-orders",
            get(handlers::repair_orders::list_repair_orders)
                .post(handlers::repair_orders::create_repair_order),
        )
        .route(
            "/repair-orders/:id",
            get(handlers::repair_orders::get_repair_order)
                .put(handlers::repair_orders::update_repair_order)
                .delete(handlers::repair_orders::delete_repair_order),
        )
        .route(
            "/repair-orders/:id/status",
            put(handlers::repair_orders::update_repair_status),
        )
        .route(
            "/repair-orders/:id/whatsapp",
            get(handlers::repair_orders::whatsapp_link),
        )
        .route(
            "/repair-orders/:id/line-items",
            post(handlers::repair_orders::add_line_item),
        )
        .route(
            "/line-items/:id",
            put(handlers::repair_orders::update_line_item)
                .delete(handlers::repair_orders::delete_line_item),
        )
        .with_role(UserRole::Employee);

    let reports = Router::new()
        .route(
            "/reports",
            get(handlers::reports::list_reports).post(handlers::reports::generate_report),
        )
        .route(
            "/reports/:id",
            get(handlers::reports::get_report).delete(handlers::reports::delete_report),
        )
        .with_role(UserRole::Employee);

    let dashboard = Router::new()
        .route("/dashboard", get(handlers::dashboard::overview))
        .route("/dashboard/summary", get(handlers::dashboard::summary))
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        .with_role(UserRole::Employee);

    Router::new()
        .merge(public)
        .merge(session)
        .merge(employees)
        .merge(inventory)
        .merge(repair_orders)
        .merge(reports)
        .merge(dashboard)
}

/// The complete application minus CORS, which depends on deployment
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs.max(1));

    Router::new()
        .route("/", get(handlers::health::root))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth::inject_auth_service,
        ))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        // Ensure every request carries a request id for traceability
        .layer(middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}

/// CORS from configuration; `None` when nothing is configured and permissive
/// CORS is not allowed
pub fn cors_layer(cfg: &config::AppConfig) -> Option<CorsLayer> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        let layer = CorsLayer::new().allow_origin(origins);
        // wildcards are rejected alongside credentials
        Some(if cfg.cors_allow_credentials {
            layer
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        } else {
            layer.allow_methods(Any).allow_headers(Any)
        })
    } else if cfg.should_allow_permissive_cors() {
        Some(CorsLayer::permissive())
    } else {
        None
    }
}

#[cfg(test)]
mod cors_tests {
    use super::*;

    fn cfg(environment: &str) -> config::AppConfig {
        config::AppConfig::new(
            "sqlite::memory:".into(),
            "kR8#vT2!qLm9@wXz4$pN7^bH3&jF6*dS".into(),
            "127.0.0.1".into(),
            8080,
            environment.into(),
        )
    }

    #[test]
    fn development_falls_back_to_permissive() {
        assert!(cors_layer(&cfg("development")).is_some());
    }

    #[test]
    fn production_requires_explicit_origins() {
        let mut production = cfg("production");
        assert!(cors_layer(&production).is_none());

        production.cors_allowed_origins = Some("https://servis.example.com, ".into());
        production.cors_allow_credentials = true;
        assert!(cors_layer(&production).is_some());
    }
}
