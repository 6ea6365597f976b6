//! Database initialization and bulk load
//!
//! The API only ever reads the `employees` table. It is created and filled
//! offline by the import tool, which replaces the whole table in a single
//! transaction.

use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::features::{FeatureValue, CATEGORICAL_COLUMNS, FEATURE_COLUMNS};
use crate::models::Employee;
use crate::Result;

/// SQLite column type for an employee attribute
pub fn column_type(column: &str) -> &'static str {
    if CATEGORICAL_COLUMNS.contains(&column) {
        "TEXT"
    } else if column == "satisfaction_moyenne" {
        "REAL"
    } else {
        "INTEGER"
    }
}

fn create_table_sql() -> String {
    let columns: Vec<String> = FEATURE_COLUMNS
        .iter()
        .map(|c| format!("    {} {}", c, column_type(c)))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS employees (\n    id INTEGER PRIMARY KEY,\n{}\n)",
        columns.join(",\n")
    )
}

fn insert_sql() -> String {
    let placeholders = vec!["?"; FEATURE_COLUMNS.len() + 1].join(", ");
    format!(
        "INSERT INTO employees (id, {}) VALUES ({})",
        FEATURE_COLUMNS.join(", "),
        placeholders
    )
}

/// Open (creating if needed) a writable database
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_employees_table(&pool).await?;

    Ok(pool)
}

/// Create the employees table (idempotent)
pub async fn create_employees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(&create_table_sql()).execute(pool).await?;
    Ok(())
}

/// Drop and recreate the employees table, then insert every row.
///
/// All or nothing: a failing row rolls back the whole load, including the drop.
pub async fn replace_employees(pool: &SqlitePool, employees: &[Employee]) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS employees")
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_table_sql()).execute(&mut *tx).await?;

    let sql = insert_sql();
    let mut inserted = 0;

    for employee in employees {
        let attributes = employee.profile.to_feature_map();
        let mut query = sqlx::query(&sql).bind(employee.id);

        for column in FEATURE_COLUMNS {
            query = match attributes.get(column) {
                Some(FeatureValue::Int(i)) => query.bind(*i),
                Some(FeatureValue::Float(f)) => query.bind(*f),
                Some(FeatureValue::Text(s)) => query.bind(s.clone()),
                None => query.bind(None::<i64>),
            };
        }

        inserted += query.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    info!(rows = inserted, "Employee table replaced");
    Ok(inserted)
}
