//! Read-only database access against a database file on disk

use attrition_api::db::{connect_readonly, count_employees, get_employee, list_employees};
use attrition_api::pagination::PageQuery;
use attrition_common::db::{init_database, replace_employees};
use attrition_common::{Employee, EmployeeProfile};
use tempfile::TempDir;

async fn seeded_database(dir: &TempDir, rows: i64) -> std::path::PathBuf {
    let path = dir.path().join("employees.db");
    let employees: Vec<Employee> = (1..=rows)
        .map(|id| Employee {
            id,
            profile: EmployeeProfile {
                age: Some(20 + id),
                ..Default::default()
            },
        })
        .collect();

    let pool = init_database(&path).await.unwrap();
    replace_employees(&pool, &employees).await.unwrap();
    pool.close().await;
    path
}

#[tokio::test]
async fn test_readonly_pool_reads_imported_rows() {
    let dir = TempDir::new().unwrap();
    let path = seeded_database(&dir, 3).await;

    let pool = connect_readonly(&path).await.unwrap();
    assert_eq!(count_employees(&pool).await.unwrap(), 3);

    let page = PageQuery::default().page();
    let ids: Vec<i64> = list_employees(&pool, page)
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let employee = get_employee(&pool, 2).await.unwrap().unwrap();
    assert_eq!(employee.profile.age, Some(22));
}

#[tokio::test]
async fn test_readonly_pool_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let path = seeded_database(&dir, 1).await;

    let pool = connect_readonly(&path).await.unwrap();
    let result = sqlx::query("DELETE FROM employees").execute(&pool).await;
    assert!(result.is_err());
    assert_eq!(count_employees(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_database_file() {
    let dir = TempDir::new().unwrap();
    let err = connect_readonly(&dir.path().join("absent.db"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Database not found"));
}
