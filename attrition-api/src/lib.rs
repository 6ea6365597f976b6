//! attrition-api library - employee records and attrition risk over HTTP
//!
//! Read-only JSON service: health, paginated employee listing, point lookup,
//! risk prediction and classifier diagnostics.

use std::sync::Arc;

use attrition_common::predictor::ClassifierHandle;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Employee database (read-only)
    pub db: SqlitePool,
    /// Classifier loaded once at startup
    pub model: Arc<ClassifierHandle>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, model: ClassifierHandle) -> Self {
        Self {
            db,
            model: Arc::new(model),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::root_routes())
        .merge(api::health_routes())
        .merge(api::employee_routes())
        .merge(api::predict_routes())
        .merge(api::model_status_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
