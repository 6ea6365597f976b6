//! Dashboard client against a real API server on an ephemeral port

use std::path::Path;
use std::time::Duration;

use attrition_api::{build_router, AppState};
use attrition_common::dataset::load_employees_csv;
use attrition_common::db::replace_employees;
use attrition_common::factors::analyze;
use attrition_common::predictor::ClassifierHandle;
use attrition_common::recommendations::recommend;
use attrition_common::RiskTier;
use attrition_dash::render;
use attrition_dash::stats::WorkforceStats;
use attrition_dash::{ApiClient, ClientError};
use sqlx::sqlite::SqlitePoolOptions;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

/// Serve the shipped dataset and model; returns the base URL
async fn spawn_api(model: ClassifierHandle) -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let employees = load_employees_csv(&Path::new(DATA_DIR).join("employees.csv")).unwrap();
    replace_employees(&pool, &employees).await.unwrap();

    let app = build_router(AppState::new(pool, model));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

async fn client_with_model() -> ApiClient {
    let model = ClassifierHandle::load(&Path::new(DATA_DIR).join("attrition_model.json"));
    assert!(model.is_loaded());
    let url = spawn_api(model).await;
    ApiClient::new(&url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_health() {
    let client = client_with_model().await;
    let report = client.health().await.unwrap();

    assert!(report.is_healthy());
    assert!(report.database_connected());
}

#[tokio::test]
async fn test_list_and_get() {
    let client = client_with_model().await;

    let page = client.list_employees(0, 10).await.unwrap();
    assert_eq!(page.total, 40);
    assert_eq!(page.employees.len(), 10);
    assert_eq!(page.employees[0].id, 1);

    let employee = client.get_employee(2).await.unwrap();
    assert_eq!(employee.profile.age, Some(28));
    assert_eq!(employee.profile.poste.as_deref(), Some("Consultant"));
}

#[tokio::test]
async fn test_missing_employee_is_not_found() {
    let client = client_with_model().await;
    let err = client.get_employee(9999).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        ClientError::Status { detail, .. } => {
            assert_eq!(detail, "Employé avec l'ID 9999 non trouvé")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_prediction_page_for_stored_employee() {
    let client = client_with_model().await;
    let employee = client.get_employee(2).await.unwrap();

    let result = client.predict(&employee.profile).await.unwrap();
    assert_eq!(result.percentage, 99.81);
    assert_eq!(result.tier, RiskTier::VeryHigh);
    assert_eq!(result.class, 1);

    let factors = analyze(&employee.profile);
    let plan = recommend(&employee.profile, &factors, result.tier, result.percentage);
    assert!(!plan.urgent.is_empty());
    assert!(render::recommendations(&plan).contains("Actions Urgentes"));
}

#[tokio::test]
async fn test_model_status() {
    let client = client_with_model().await;
    let status = client.model_status().await.unwrap();

    assert!(status.model_loaded);
    assert!(status.file_exists);
    assert_eq!(status.model_name.as_deref(), Some("attrition-logistic"));
}

#[tokio::test]
async fn test_predict_without_model_is_503() {
    let url = spawn_api(ClassifierHandle::unavailable("no artifact")).await;
    let client = ApiClient::new(&url, Duration::from_secs(5)).unwrap();

    let employee = client.get_employee(1).await.unwrap();
    match client.predict(&employee.profile).await.unwrap_err() {
        ClientError::Status { status, detail } => {
            assert_eq!(status, 503);
            assert!(detail.starts_with("Modèle de prédiction non disponible"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_stats_over_first_page() {
    let client = client_with_model().await;
    let page = client.list_employees(0, 100).await.unwrap();

    let stats = WorkforceStats::compute(page.total, &page.employees);
    assert_eq!(stats.total, 40);
    assert_eq!(stats.sample_size, 40);
    assert_eq!(
        stats.departments.iter().map(|d| d.count).sum::<usize>(),
        40
    );
    assert!(render::workforce_stats(&stats).contains("👥 Total Employés: 40"));
}

#[tokio::test]
async fn test_unreachable_api_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", address), Duration::from_secs(2)).unwrap();
    assert!(matches!(client.health().await, Err(ClientError::Http(_))));
}
