//! Attrition risk prediction
//!
//! The body is the employee attribute set with every field optional. Missing
//! attributes are filled by the feature normalizer before scoring.

use attrition_common::features::normalize_profile;
use attrition_common::predictor::PredictionResult;
use attrition_common::EmployeeProfile;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /predict
///
/// Any body rejection (syntax, wrong field type, content type) answers 422.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeProfile>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Json(profile) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let features = normalize_profile(&profile);
    debug!(columns = features.len(), "Normalized prediction request");

    let result = state.model.predict(&features)?;

    info!(
        risk = result.percentage,
        tier = %result.tier,
        "Attrition risk predicted"
    );
    Ok(Json(result))
}

pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}
