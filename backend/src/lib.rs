//! # Finance Tracker Backend
//!
//! REST backend for a personal finance tracker, layered as:
//!
//! ```text
//! REST layer (axum handlers)
//!     ↓
//! Domain layer (services + the reporting engine)
//!     ↓
//! Storage layer (SQLite persistence)
//! ```
//!
//! Every aggregate the API serves is computed by `domain::reporting` from
//! the user's full record set at request time; there is no caching layer
//! and no incremental update.

pub mod config;
pub mod domain;
pub mod rest;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::domain::{AuthService, DashboardService, ExportService, TransactionService};
use crate::storage::DbConnection;

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService,
    pub dashboard_service: DashboardService,
    pub auth_service: AuthService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services.
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain services");
    Ok(AppState {
        transaction_service: TransactionService::new(db.clone()),
        dashboard_service: DashboardService::new(db.clone()),
        auth_service: AuthService::new(db),
        export_service: ExportService::new(),
    })
}

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router {
    // CORS setup to allow the SPA frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .expect("CORS origin must be a valid header value"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/auth/signup", post(rest::auth_apis::signup))
        .route("/auth/login", post(rest::auth_apis::login))
        .route("/auth/me", get(rest::auth_apis::me))
        .route("/income/add", post(rest::transaction_apis::add_income))
        .route("/income", get(rest::transaction_apis::list_income))
        .route("/income/download", get(rest::transaction_apis::download_income))
        .route("/income/:id", delete(rest::transaction_apis::delete_income))
        .route("/expense/add", post(rest::transaction_apis::add_expense))
        .route("/expense", get(rest::transaction_apis::list_expense))
        .route("/expense/download", get(rest::transaction_apis::download_expense))
        .route("/expense/:id", delete(rest::transaction_apis::delete_expense))
        .route("/dashboard", get(rest::dashboard_apis::get_dashboard))
        .route("/reports/period", get(rest::dashboard_apis::get_period_report))
        .route(
            "/reports/income-sources",
            get(rest::dashboard_apis::get_income_sources),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

/// Application state backed by a fresh in-memory database, for tests.
#[cfg(test)]
pub(crate) async fn initialize_test_state() -> AppState {
    let db = DbConnection::init_test()
        .await
        .expect("Failed to create test database");

    AppState {
        transaction_service: TransactionService::new(db.clone()),
        dashboard_service: DashboardService::new(db.clone()),
        auth_service: AuthService::new(db),
        export_service: ExportService::new(),
    }
}
