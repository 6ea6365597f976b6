//! HTTP client for the attrition API
//!
//! Thin typed wrapper: one method per endpoint, no caching, no retries.

use std::time::Duration;

use attrition_common::predictor::{ModelStatus, PredictionResult};
use attrition_common::{Employee, EmployeeList, EmployeeProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Largest page the API serves
pub const PAGE_SIZE: i64 = 100;

const USER_AGENT: &str = concat!("attrition-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure
    #[error("Erreur API : {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `detail` is the API's error message when present
    #[error("Erreur API {status} : {detail}")]
    Status { status: u16, detail: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    pub fn database_connected(&self) -> bool {
        self.database.contains("connected")
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);

        Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let url = self.url(endpoint);
        debug!(url = %url, "GET");
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        self.get("/health").await
    }

    pub async fn model_status(&self) -> Result<ModelStatus, ClientError> {
        self.get("/model-status").await
    }

    pub async fn list_employees(&self, skip: i64, limit: i64) -> Result<EmployeeList, ClientError> {
        self.get(&format!("/employees?skip={}&limit={}", skip, limit))
            .await
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee, ClientError> {
        self.get(&format!("/employees/{}", id)).await
    }

    pub async fn predict(&self, profile: &EmployeeProfile) -> Result<PredictionResult, ClientError> {
        let url = self.url("/predict");
        debug!(url = %url, "POST");
        let response = self.http.post(&url).json(profile).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://api.local:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://api.local:8000");
        assert_eq!(client.url("/health"), "http://api.local:8000/health");
        assert_eq!(client.url("employees/3"), "http://api.local:8000/employees/3");
    }

    #[test]
    fn test_health_report_flags() {
        let report = HealthReport {
            status: "healthy".to_string(),
            database: "error: unable to open database file".to_string(),
        };
        assert!(report.is_healthy());
        assert!(!report.database_connected());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::Status {
            status: 404,
            detail: "Employé avec l'ID 7 non trouvé".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Erreur API 404 : Employé avec l'ID 7 non trouvé");
    }
}
