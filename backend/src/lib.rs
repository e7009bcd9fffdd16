//! # Expense Tracker Backend
//!
//! Contains all non-UI logic for the expense tracker.
//!
//! The backend is organised in layers:
//! ```text
//! UI Layer (any frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (record store, monthly aggregation, export)
//!     ↓
//! Storage Layer (flat CSV file, atomic rewrites)
//! ```
//!
//! A frontend calls the record store and aggregator operations through the REST
//! layer and refreshes its views from their results.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{ExpenseService, ExportService, SummaryService};
use crate::storage::{CsvConnection, StoreStatus};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<CsvConnection>,
    pub summary_service: SummaryService<CsvConnection>,
    pub export_service: ExportService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(connection: CsvConnection, config: AppConfig) -> Self {
        let expense_service = ExpenseService::new(&connection);
        let summary_service = SummaryService::new(expense_service.clone());

        Self {
            expense_service,
            summary_service,
            export_service: ExportService::new(),
            config: Arc::new(config),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up expense store at {}", config.expense_file_path().display());
    let connection = CsvConnection::new(&config)?;

    info!("Setting up domain model");
    let app_state = AppState::new(connection, config);

    match app_state.expense_service.initialize()? {
        StoreStatus::Created => info!("Started with an empty expense file"),
        StoreStatus::Ready => info!("Expense file is ready"),
        StoreStatus::SchemaMismatch { found } => warn!(
            "Expense file headers might be outdated ({:?}); consider starting with a fresh file",
            found
        ),
    }

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    match HeaderValue::from_str(&app_state.config.allowed_origin) {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => warn!(
            "Ignoring invalid allowed origin {:?}: {}",
            app_state.config.allowed_origin, e
        ),
    }

    let api_routes = Router::new()
        .route("/expenses", get(io::list_expenses).post(io::create_expense))
        .route(
            "/expenses/:id",
            get(io::get_expense)
                .put(io::update_expense)
                .delete(io::delete_expense),
        )
        .route("/summary/monthly", get(io::get_monthly_summary))
        .route("/summary/series", get(io::get_monthly_series))
        .route("/export", get(io::export_expenses).post(io::export_to_path));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
