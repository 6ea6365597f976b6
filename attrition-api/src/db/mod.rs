//! Database access layer for attrition-api
//!
//! The service never writes: the production pool is opened read-only.

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub mod employees;

pub use employees::{count_employees, get_employee, list_employees};

/// Connect to the employee database in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}\nRun attrition-import first to load the employee table.",
            db_path.display()
        );
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());

    SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database in read-only mode")
}
