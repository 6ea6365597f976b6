//! Error types for the HTTP layer
//!
//! Every error body has the shape `{"detail": "..."}`.

use attrition_common::Error as CommonError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Detail returned when the classifier failed to load at startup
pub const MODEL_UNAVAILABLE_DETAIL: &str = "Modèle de prédiction non disponible";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Classifier not loaded (503)
    #[error("{0}")]
    ModelUnavailable(String),

    /// Malformed or mistyped request body (422)
    #[error("{0}")]
    Validation(String),

    /// Classifier failed on a given input (500)
    #[error("Erreur lors de la prédiction: {0}")]
    InternalPrediction(String),

    /// Database failure (500)
    #[error("Erreur de base de données: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn employee_not_found(id: i64) -> Self {
        ApiError::NotFound(format!("Employé avec l'ID {} non trouvé", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalPrediction(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::ModelUnavailable(_) => {
                ApiError::ModelUnavailable(MODEL_UNAVAILABLE_DETAIL.to_string())
            }
            CommonError::Database(e) => ApiError::Database(e),
            other => ApiError::InternalPrediction(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
