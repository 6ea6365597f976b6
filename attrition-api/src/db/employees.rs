//! Employee table queries

use attrition_common::Employee;
use sqlx::SqlitePool;

use crate::pagination::Page;

/// Total number of stored employees
pub async fn count_employees(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(db)
        .await
}

/// One page of employees in id order
pub async fn list_employees(db: &SqlitePool, page: Page) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id LIMIT ? OFFSET ?")
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(db)
        .await
}

/// Point lookup by id
pub async fn get_employee(db: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}
