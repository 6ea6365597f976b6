//! attrition-dash - command-line dashboard
//!
//! One subcommand per page. Pages print to stdout; diagnostics go through
//! tracing on stderr.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use attrition_common::dataset::save_employees_csv;
use attrition_common::factors::analyze;
use attrition_common::recommendations::recommend;
use attrition_common::EmployeeProfile;
use attrition_dash::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, PAGE_SIZE};
use attrition_dash::filter::EmployeeFilter;
use attrition_dash::render;
use attrition_dash::stats::WorkforceStats;
use attrition_dash::ApiClient;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "attrition_dash=warn";

/// Command-line arguments for attrition-dash
#[derive(Parser, Debug)]
#[command(name = "attrition-dash")]
#[command(about = "Employee attrition dashboard")]
#[command(version)]
struct Args {
    /// Base URL of the attrition API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    page: Page,
}

#[derive(Subcommand, Debug)]
enum Page {
    /// API status and headline figures
    Home,

    /// Browse and filter employees
    Explore {
        /// Department to keep; repeat to keep several
        #[arg(long = "department")]
        departments: Vec<String>,

        /// Job title
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        age_min: Option<i64>,

        #[arg(long)]
        age_max: Option<i64>,

        #[arg(long, default_value_t = 0)]
        skip: i64,

        #[arg(long, default_value_t = PAGE_SIZE)]
        limit: i64,

        /// Write the selected employees to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Full record of one employee
    Show { id: i64 },

    /// Workforce statistics
    Stats,

    /// Attrition risk, risk factors and action plan for one employee
    Predict { id: i64 },

    /// Connectivity and model checks
    Diagnose,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ApiClient::new(&args.api_url, Duration::from_secs(args.timeout))
        .context("Failed to build HTTP client")?;
    debug!(api_url = %client.base_url(), "Dashboard client ready");

    match args.page {
        Page::Home => home(&client).await,
        Page::Explore {
            departments,
            title,
            age_min,
            age_max,
            skip,
            limit,
            export,
        } => {
            let filter = EmployeeFilter {
                departments,
                title,
                age_min,
                age_max,
            };
            explore(&client, &filter, skip, limit, export.as_deref()).await
        }
        Page::Show { id } => show(&client, id).await,
        Page::Stats => stats(&client).await,
        Page::Predict { id } => predict(&client, id).await,
        Page::Diagnose => diagnose(&client).await,
    }
}

async fn home(client: &ApiClient) -> Result<()> {
    println!("🏢 Tableau de bord RH - Prédiction d'attrition\n");

    match client.health().await {
        Ok(report) => println!("{}\n", render::health(&report)),
        Err(e) => {
            println!("❌ API inaccessible ({}): {}", client.base_url(), e);
            return Ok(());
        }
    }

    let list = client
        .list_employees(0, PAGE_SIZE)
        .await
        .context("Failed to load employees")?;
    let stats = WorkforceStats::compute(list.total, &list.employees);

    println!("👥 Total Employés: {}", stats.total);
    if let Some(age) = stats.avg_age {
        println!("📅 Âge Moyen: {:.0} ans", age);
    }
    if let Some(satisfaction) = stats.avg_satisfaction {
        println!("⭐ Satisfaction Moyenne: {:.1}/4", satisfaction);
    }
    Ok(())
}

async fn explore(
    client: &ApiClient,
    filter: &EmployeeFilter,
    skip: i64,
    limit: i64,
    export: Option<&Path>,
) -> Result<()> {
    let list = client
        .list_employees(skip, limit)
        .await
        .context("Failed to load employees")?;
    let shown = filter.apply(&list.employees);

    println!("🔍 Explorateur d'Employés\n");
    println!("{}", render::employee_table(&shown));
    if filter.is_empty() {
        println!(
            "\n{} employés affichés sur {} (à partir de {})",
            shown.len(),
            list.total,
            skip
        );
    } else {
        println!(
            "\n{} employés correspondent aux filtres sur {} chargés",
            shown.len(),
            list.employees.len()
        );
    }

    if shown.is_empty() {
        return Ok(());
    }

    let selection = WorkforceStats::compute(shown.len() as i64, &shown);
    println!("\n{}", render::selection_stats(&selection));

    if let Some(path) = export {
        save_employees_csv(path, &shown)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        info!(rows = shown.len(), path = %path.display(), "Exported selection");
        println!("\n📥 {} employés exportés vers {}", shown.len(), path.display());
    }
    Ok(())
}

async fn show(client: &ApiClient, id: i64) -> Result<()> {
    match client.get_employee(id).await {
        Ok(employee) => {
            println!("{}\n", render::employee_card(&employee));
            println!("{}", render::employee_details(&employee));
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("❌ Employé avec l'ID {} non trouvé", id);
            Ok(())
        }
        Err(e) => Err(e).context("Failed to load employee"),
    }
}

async fn stats(client: &ApiClient) -> Result<()> {
    let list = client
        .list_employees(0, PAGE_SIZE)
        .await
        .context("Failed to load employees")?;
    if list.employees.is_empty() {
        println!("Aucune donnée d'employé disponible");
        return Ok(());
    }

    let stats = WorkforceStats::compute(list.total, &list.employees);
    println!("{}", render::workforce_stats(&stats));
    Ok(())
}

async fn predict(client: &ApiClient, id: i64) -> Result<()> {
    let employee = match client.get_employee(id).await {
        Ok(employee) => employee,
        Err(e) if e.is_not_found() => {
            println!("❌ Employé avec l'ID {} non trouvé", id);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load employee"),
    };

    println!("{}\n", render::employee_card(&employee));

    let result = client
        .predict(&employee.profile)
        .await
        .context("Prediction failed")?;

    println!("{}\n", render::prediction_card(&result));
    println!("{}\n", render::risk_gauge(result.percentage, result.tier));
    println!("{}\n", render::key_metrics(&employee.profile));

    let factors = analyze(&employee.profile);
    println!("{}\n", render::factor_analysis(&factors));

    let plan = recommend(&employee.profile, &factors, result.tier, result.percentage);
    println!("{}", render::recommendations(&plan));
    Ok(())
}

/// Profile used for the diagnostic prediction
fn diagnostic_profile() -> EmployeeProfile {
    EmployeeProfile {
        age: Some(30),
        revenu_mensuel: Some(3000),
        satisfaction_moyenne: Some(3.0),
        ..Default::default()
    }
}

async fn diagnose(client: &ApiClient) -> Result<()> {
    println!("🔧 Diagnostic de l'API ({})\n", client.base_url());

    let started = Instant::now();
    match client.health().await {
        Ok(report) => {
            let latency = started.elapsed();
            println!("{}", render::health(&report));
            println!("⏱️ Latence /health: {} ms\n", latency.as_millis());
        }
        Err(e) => println!("❌ /health: {}\n", e),
    }

    match client.model_status().await {
        Ok(status) => println!("{}\n", render::model_status(&status)),
        Err(e) => println!("❌ /model-status: {}\n", e),
    }

    println!("🧪 Prédiction de test");
    match client.predict(&diagnostic_profile()).await {
        Ok(result) => println!(
            "✅ Prédiction réussie: {}% ({})",
            result.percentage, result.tier
        ),
        Err(e) => {
            warn!("Test prediction failed: {}", e);
            println!("❌ Échec de la prédiction: {}", e);
        }
    }
    Ok(())
}
