//! Terminal rendering of dashboard pages
//!
//! Every function returns the rendered text so pages can be tested without a
//! terminal. Missing attributes are shown as `N/A`.

use std::fmt::Display;

use attrition_common::factors::{group_by_category, Impact, RiskFactor};
use attrition_common::predictor::{ModelStatus, PredictionResult};
use attrition_common::recommendations::{Priority, Recommendations};
use attrition_common::{Employee, EmployeeProfile, RiskTier};

use crate::client::HealthReport;
use crate::stats::{WorkforceStats, AGE_BUCKET_WIDTH};

/// Width of the risk gauge bar, in cells
pub const GAUGE_WIDTH: usize = 30;

const RULE: &str = "────────────────────────────────────────────────────────────";

fn na<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn na_ref<T: Display>(value: &Option<T>) -> String {
    na(value.as_ref())
}

fn avg(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn heading(title: &str) -> String {
    format!("{}\n{}", title, RULE)
}

fn tier_icon(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => "😊",
        RiskTier::Medium => "😐",
        RiskTier::High => "😟",
        RiskTier::VeryHigh => "😱",
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Summary card shown by search and prediction pages
pub fn employee_card(employee: &Employee) -> String {
    let p = &employee.profile;
    [
        format!("ID #{} - {}", employee.id, na_ref(&p.poste)),
        RULE.to_string(),
        format!("Département: {}", na_ref(&p.departement)),
        format!("Âge: {} ans", na(p.age)),
        format!("Genre: {}", na_ref(&p.genre)),
        format!("Revenu mensuel: {} €", na(p.revenu_mensuel)),
        format!("Satisfaction moyenne: {}/4", na(p.satisfaction_moyenne)),
        format!("Années dans l'entreprise: {}", na(p.annees_dans_l_entreprise)),
    ]
    .join("\n")
}

fn field(label: &str, value: String) -> String {
    format!("  {:<28} {}", label, value)
}

/// Full record grouped by theme, with the two stored risk flags
pub fn employee_details(employee: &Employee) -> String {
    let p = &employee.profile;
    let mut lines = vec![heading("📋 Informations Détaillées")];

    lines.push("👤 Personnel".to_string());
    lines.push(field("Genre", na_ref(&p.genre)));
    lines.push(field("Âge", na(p.age)));
    lines.push(field("Statut Marital", na_ref(&p.statut_marital)));
    lines.push(field("Enfants", na_ref(&p.ayant_enfants)));
    lines.push(field("Distance Domicile", format!("{} km", na(p.distance_domicile_travail))));
    lines.push(field("Niveau Éducation", na(p.niveau_education)));

    lines.push("💼 Professionnel".to_string());
    lines.push(field("Poste", na_ref(&p.poste)));
    lines.push(field("Département", na_ref(&p.departement)));
    lines.push(field("Domaine d'étude", na_ref(&p.domaine_etude)));
    lines.push(field("Revenu Mensuel", format!("{} €", na(p.revenu_mensuel))));
    lines.push(field("Heures Supplémentaires", na_ref(&p.heure_supplementaires)));
    lines.push(field("Niveau Hiérarchique", na(p.niveau_hierarchique_poste)));

    lines.push("📈 Carrière".to_string());
    lines.push(field("Années d'Expérience", na(p.annee_experience_totale)));
    lines.push(field("Années dans l'Entreprise", na(p.annees_dans_l_entreprise)));
    lines.push(field("Années au Poste Actuel", na(p.annees_dans_le_poste_actuel)));
    lines.push(field("Expériences Précédentes", na(p.nombre_experiences_precedentes)));
    lines.push(field("Formations Suivies", na(p.nb_formations_suivies)));
    lines.push(field(
        "Dernière Promotion",
        format!("{} ans", na(p.annees_depuis_la_derniere_promotion)),
    ));

    lines.push("😊 Satisfaction".to_string());
    lines.push(field(
        "Satisfaction Environnement",
        format!("{}/4", na(p.satisfaction_employee_environnement)),
    ));
    lines.push(field(
        "Satisfaction Travail",
        format!("{}/4", na(p.satisfaction_employee_nature_travail)),
    ));
    lines.push(field(
        "Satisfaction Équipe",
        format!("{}/4", na(p.satisfaction_employee_equipe)),
    ));
    lines.push(field(
        "Équilibre Vie Pro/Perso",
        format!("{}/4", na(p.satisfaction_employee_equilibre_pro_perso)),
    ));
    if let Some(average) = p.satisfaction_moyenne {
        lines.push(field(
            "Satisfaction Moyenne",
            format!(
                "{:.2}/4 ({:+.0}% vs moyenne)",
                average,
                (average - 2.5) / 2.5 * 100.0
            ),
        ));
    }

    lines.push(heading("⚠️ Indicateurs de Risque"));
    lines.push(if p.parent_burnout == Some(1) {
        "🔴 Burnout Parental Détecté".to_string()
    } else {
        "🟢 Pas de Burnout Parental".to_string()
    });
    lines.push(if p.sous_paye_niveau_dept == Some(1) {
        "🟠 Sous-payé par rapport au département".to_string()
    } else {
        "🟢 Salaire aligné".to_string()
    });

    lines.join("\n")
}

/// Main prediction figures
pub fn prediction_card(result: &PredictionResult) -> String {
    let verdict = if result.class == 1 {
        "Risque élevé de départ"
    } else {
        "Risque faible de départ"
    };

    [
        format!(
            "{} Résultat de la prédiction d'attrition",
            tier_icon(result.tier)
        ),
        RULE.to_string(),
        format!("Risque d'attrition: {}%", result.percentage),
        format!("Niveau de risque: {}", result.tier),
        format!("Prédiction: {}", verdict),
        format!("Probabilité: {:.4}", result.probability),
    ]
    .join("\n")
}

/// Horizontal bar proportional to the percentage, clamped to [0, 100]
pub fn risk_gauge(percentage: f64, tier: RiskTier) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * GAUGE_WIDTH as f64).round() as usize;

    format!(
        "Indicateur de risque\n[{}{}] {}% - {}",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled),
        percentage,
        tier
    )
}

pub fn key_metrics(profile: &EmployeeProfile) -> String {
    [
        format!("👤 Âge: {} ans", na(profile.age)),
        format!("😊 Satisfaction moyenne: {}/4", na(profile.satisfaction_moyenne)),
        format!(
            "🏢 Années dans l'entreprise: {}",
            na(profile.annees_dans_l_entreprise)
        ),
        format!("💰 Revenu mensuel: {}€", na(profile.revenu_mensuel)),
    ]
    .join("   ")
}

fn impact_marker(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "🔴",
        Impact::Medium => "🟡",
        Impact::Low => "🔵",
    }
}

/// Factors grouped by category, in the order categories first appear
pub fn factor_analysis(factors: &[RiskFactor]) -> String {
    let mut lines = vec![heading("📊 Analyse des facteurs de risque")];

    if factors.is_empty() {
        lines.push("✅ Excellent profil ! Aucun facteur de risque majeur identifié".to_string());
        return lines.join("\n");
    }

    for (category, members) in group_by_category(factors) {
        lines.push(format!("#### {}", category.title()));
        for factor in members {
            lines.push(format!(
                "  {} {} {} ({:.0}%)",
                impact_marker(factor.impact()),
                factor.icon,
                factor.title,
                factor.weight * 100.0
            ));
            lines.push(format!("       {}", factor.description));
        }
    }

    lines.join("\n")
}

/// Non-empty buckets in priority order, then the action plan total
pub fn recommendations(recs: &Recommendations) -> String {
    let mut lines = vec![heading("💡 Recommandations")];

    for priority in Priority::ALL {
        let bucket = recs.bucket(priority);
        if bucket.is_empty() {
            continue;
        }

        lines.push(format!("{} {}", priority.icon(), priority.title()));
        for action in bucket {
            lines.push(format!("  - {}", action));
        }
    }

    lines.push(RULE.to_string());
    lines.push(format!(
        "📋 Plan d'action : {} recommandations identifiées",
        recs.total_actions()
    ));
    lines.push(
        "Priorisez les actions urgentes pour réduire efficacement le risque d'attrition"
            .to_string(),
    );

    lines.join("\n")
}

pub fn health(report: &HealthReport) -> String {
    [
        heading("🏥 État de l'API"),
        format!(
            "{} API Status: {}",
            status_icon(report.is_healthy()),
            report.status
        ),
        format!(
            "{} Database Status: {}",
            status_icon(report.database_connected()),
            report.database
        ),
    ]
    .join("\n")
}

pub fn model_status(status: &ModelStatus) -> String {
    let mut lines = vec![heading("🤖 Modèle ML")];

    if status.model_loaded {
        lines.push(format!(
            "✅ Modèle chargé: {}",
            na_ref(&status.model_name)
        ));
    } else {
        lines.push("❌ Modèle non chargé".to_string());
    }
    lines.push(field("Chemin", na_ref(&status.model_path)));
    lines.push(field("Fichier présent", status.file_exists.to_string()));
    lines.push(field(
        "Taille",
        status
            .file_size_bytes
            .map(|b| format!("{} octets", b))
            .unwrap_or_else(|| "N/A".to_string()),
    ));
    if let Some(error) = &status.last_error {
        lines.push(field("Erreur", error.clone()));
    }

    lines.join("\n")
}

/// One row per employee, fixed-width columns
pub fn employee_table(employees: &[&Employee]) -> String {
    let mut lines = vec![format!(
        "{:>5}  {:<26} {:<20} {:>4} {:>8} {:>6} {:>6}",
        "ID", "Poste", "Département", "Âge", "Revenu", "Satis.", "Anc."
    )];

    for employee in employees {
        let p = &employee.profile;
        lines.push(format!(
            "{:>5}  {:<26} {:<20} {:>4} {:>8} {:>6} {:>6}",
            employee.id,
            na_ref(&p.poste),
            na_ref(&p.departement),
            na(p.age),
            na(p.revenu_mensuel),
            avg(p.satisfaction_moyenne, 2),
            na(p.annees_dans_l_entreprise),
        ));
    }

    lines.join("\n")
}

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "█".repeat((count * width).div_ceil(max))
}

/// Headline figures for a filtered selection
pub fn selection_stats(stats: &WorkforceStats) -> String {
    [
        heading("📊 Statistiques sur la sélection"),
        format!("Total: {}", stats.sample_size),
        format!("Âge moyen: {} ans", avg(stats.avg_age, 0)),
        format!("Satisfaction moyenne: {}/4", avg(stats.avg_satisfaction, 1)),
        format!("Ancienneté moyenne: {} ans", avg(stats.avg_tenure, 1)),
    ]
    .join("\n")
}

/// Overview, department, demographic, pay and satisfaction sections
pub fn workforce_stats(stats: &WorkforceStats) -> String {
    let mut lines = vec![heading("📊 Vue d'Ensemble")];
    lines.push(format!("👥 Total Employés: {}", stats.total));
    lines.push(format!("📅 Âge Moyen: {} ans", avg(stats.avg_age, 0)));
    lines.push(format!(
        "⭐ Satisfaction Moyenne: {}/4",
        avg(stats.avg_satisfaction, 1)
    ));
    lines.push(format!("💰 Revenu Moyen: {} €", avg(stats.avg_income, 0)));
    if stats.sample_size as i64 != stats.total {
        lines.push(format!(
            "(calculé sur {} employés sur {})",
            stats.sample_size, stats.total
        ));
    }

    lines.push(heading("🏢 Répartition par Département"));
    let max_department = stats.departments.iter().map(|d| d.count).max().unwrap_or(0);
    for department in &stats.departments {
        lines.push(format!(
            "  {:<22} {:>4} {}",
            department.name,
            department.count,
            bar(department.count, max_department, 30)
        ));
    }

    lines.push(heading("👥 Analyse Démographique"));
    for (gender, count) in &stats.genders {
        lines.push(format!("  Genre {:<16} {:>4}", gender, count));
    }
    lines.push("  Distribution des âges".to_string());
    let max_bucket = stats.age_histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &stats.age_histogram {
        lines.push(format!(
            "  {:>3}-{:<3} {:>4} {}",
            bucket.start,
            bucket.start + AGE_BUCKET_WIDTH - 1,
            bucket.count,
            bar(bucket.count, max_bucket, 30)
        ));
    }

    lines.push(heading("💰 Analyse de Rémunération"));
    for department in &stats.departments {
        lines.push(format!(
            "  {:<22} {:>8} €",
            department.name,
            avg(department.avg_income, 0)
        ));
    }

    lines.push(heading("😊 Analyse de Satisfaction"));
    for department in &stats.departments {
        lines.push(format!(
            "  {:<22} {:>5}/4",
            department.name,
            avg(department.avg_satisfaction, 2)
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrition_common::factors::analyze;
    use attrition_common::recommendations::recommend;

    fn high_risk() -> Employee {
        Employee {
            id: 2,
            profile: EmployeeProfile {
                poste: Some("Consultant".to_string()),
                age: Some(28),
                satisfaction_moyenne: Some(1.25),
                nombre_heures_travailless: Some(55),
                annees_dans_l_entreprise: Some(0),
                parent_burnout: Some(4),
                revenu_mensuel: Some(2200),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_employee_card_shows_missing_values() {
        let card = employee_card(&Employee {
            id: 7,
            profile: EmployeeProfile::default(),
        });
        assert!(card.starts_with("ID #7 - N/A"));
        assert!(card.contains("Âge: N/A ans"));
    }

    #[test]
    fn test_gauge_is_clamped() {
        let full = risk_gauge(150.0, RiskTier::VeryHigh);
        assert!(full.contains(&"█".repeat(GAUGE_WIDTH)));
        assert!(!full.contains('░'));

        let empty = risk_gauge(0.0, RiskTier::Low);
        assert!(empty.contains(&"░".repeat(GAUGE_WIDTH)));
        assert!(empty.ends_with("0% - Faible"));
    }

    #[test]
    fn test_prediction_card() {
        let card = prediction_card(&PredictionResult {
            percentage: 89.73,
            probability: 0.8973,
            class: 1,
            tier: RiskTier::VeryHigh,
        });
        assert!(card.starts_with("😱"));
        assert!(card.contains("Risque d'attrition: 89.73%"));
        assert!(card.contains("Risque élevé de départ"));
        assert!(card.contains("Probabilité: 0.8973"));
    }

    #[test]
    fn test_factor_analysis_groups_by_category() {
        let factors = analyze(&high_risk().profile);
        let text = factor_analysis(&factors);

        assert!(text.contains("#### 😊 Satisfaction et Engagement"));
        assert!(text.contains("🔴 🚨 Satisfaction très faible (25%)"));
        assert_eq!(text.matches("####").count(), 5);
    }

    #[test]
    fn test_factor_analysis_empty() {
        assert!(factor_analysis(&[]).contains("Aucun facteur de risque majeur"));
    }

    #[test]
    fn test_recommendations_skip_empty_buckets() {
        let employee = high_risk();
        let factors = analyze(&employee.profile);
        let recs = recommend(&employee.profile, &factors, RiskTier::VeryHigh, 99.81);
        let text = recommendations(&recs);

        assert!(text.contains("🚨 Actions Urgentes (24-48h)"));
        assert!(text.contains(&format!(
            "Plan d'action : {} recommandations identifiées",
            recs.total_actions()
        )));

        let low = Recommendations {
            preventive: vec!["😊 Continuer la valorisation régulière".to_string()],
            ..Default::default()
        };
        let text = recommendations(&low);
        assert!(!text.contains("Actions Urgentes"));
        assert!(text.contains("Plan d'action : 1 recommandations"));
    }

    #[test]
    fn test_details_risk_flags() {
        let mut employee = high_risk();
        employee.profile.parent_burnout = Some(1);
        employee.profile.sous_paye_niveau_dept = Some(0);

        let text = employee_details(&employee);
        assert!(text.contains("🔴 Burnout Parental Détecté"));
        assert!(text.contains("🟢 Salaire aligné"));
        assert!(text.contains("-50% vs moyenne"));
    }

    #[test]
    fn test_selection_stats() {
        let employees = vec![
            Employee {
                id: 1,
                profile: EmployeeProfile {
                    age: Some(30),
                    satisfaction_moyenne: Some(3.0),
                    annees_dans_l_entreprise: Some(2),
                    ..Default::default()
                },
            },
            Employee {
                id: 2,
                profile: EmployeeProfile {
                    age: Some(41),
                    satisfaction_moyenne: Some(2.5),
                    annees_dans_l_entreprise: Some(7),
                    ..Default::default()
                },
            },
        ];
        let selection: Vec<&Employee> = employees.iter().collect();
        let text = selection_stats(&WorkforceStats::compute(2, &selection));

        assert!(text.contains("Total: 2"));
        assert!(text.contains("Âge moyen: 36 ans"));
        assert!(text.contains("Satisfaction moyenne: 2.8/4"));
        assert!(text.contains("Ancienneté moyenne: 4.5 ans"));
    }
}
