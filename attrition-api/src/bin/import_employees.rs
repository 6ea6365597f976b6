//! attrition-import - load the employee table from a CSV file
//!
//! Drops and recreates `employees`, then inserts every row in a single
//! transaction. Ids come from the `id` column when present, otherwise rows are
//! numbered from 1 in file order.

use anyhow::{Context, Result};
use attrition_common::dataset::load_employees_csv;
use attrition_common::db::{init_database, replace_employees};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "attrition-import")]
#[command(about = "Bulk-load employees from CSV into the SQLite database")]
#[command(version)]
struct Args {
    /// Source CSV file with a header row
    #[arg(long)]
    csv: PathBuf,

    /// Target SQLite database (created if missing)
    #[arg(long, env = "DATABASE_PATH", default_value = "database.db")]
    database: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attrition_import=info,attrition_common=info".into()),
        )
        .init();

    let args = Args::parse();

    let employees = load_employees_csv(&args.csv)
        .with_context(|| format!("Failed to read {}", args.csv.display()))?;
    info!("Read {} employees from {}", employees.len(), args.csv.display());

    let pool = init_database(&args.database)
        .await
        .with_context(|| format!("Failed to open {}", args.database.display()))?;

    let inserted = replace_employees(&pool, &employees)
        .await
        .context("Import failed, database left unchanged")?;

    pool.close().await;
    info!(
        "✓ Imported {} employees into {}",
        inserted,
        args.database.display()
    );
    Ok(())
}
