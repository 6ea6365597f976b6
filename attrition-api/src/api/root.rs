//! Service banner

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub started_at: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub employees: &'static str,
    pub employee: &'static str,
    pub predict: &'static str,
    pub model_status: &'static str,
}

/// GET /
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "API de prédiction d'attrition des employés".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.startup_time.to_rfc3339(),
        endpoints: Endpoints {
            health: "/health",
            employees: "/employees",
            employee: "/employees/{id}",
            predict: "/predict",
            model_status: "/model-status",
        },
    })
}

pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}
