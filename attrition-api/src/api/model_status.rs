//! Classifier diagnostics

use attrition_common::predictor::ModelStatus;
use axum::{extract::State, routing::get, Json, Router};

use crate::AppState;

/// GET /model-status
pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.model.status())
}

pub fn model_status_routes() -> Router<AppState> {
    Router::new().route("/model-status", get(model_status))
}
