//! Risk factor analysis
//!
//! Heuristic explanation of why a profile looks risky, independent of the
//! classifier. Seven rule blocks are evaluated independently; inside a block
//! the first matching threshold wins. Weights are standalone scores and are
//! never normalized against each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EmployeeProfile;

/// Weight at or above which a factor is shown as high impact
pub const HIGH_IMPACT_WEIGHT: f64 = 0.18;
/// Weight at or above which a factor is shown as medium impact
pub const MEDIUM_IMPACT_WEIGHT: f64 = 0.12;

/// Fallbacks used when the profile does not carry an attribute
pub mod defaults {
    pub const SATISFACTION: f64 = 4.0;
    pub const WEEKLY_HOURS: i64 = 40;
    pub const YEARS_AT_COMPANY: i64 = 0;
    pub const AGE: i64 = 30;
    pub const BURNOUT: i64 = 0;
    pub const YEARS_SINCE_PROMOTION: i64 = 0;
    pub const HIERARCHY_LEVEL: i64 = 1;
    pub const MONTHLY_INCOME: i64 = 0;
    pub const EXPERIENCE_YEARS: i64 = 0;
    pub const WORK_LIFE_BALANCE: i64 = 3;
    pub const HAS_CHILDREN: &str = "Non";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorCategory {
    Satisfaction,
    Workload,
    Tenure,
    Career,
    Compensation,
    Wellbeing,
    Worklife,
}

impl FactorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorCategory::Satisfaction => "satisfaction",
            FactorCategory::Workload => "workload",
            FactorCategory::Tenure => "tenure",
            FactorCategory::Career => "career",
            FactorCategory::Compensation => "compensation",
            FactorCategory::Wellbeing => "wellbeing",
            FactorCategory::Worklife => "worklife",
        }
    }

    /// Section heading used by the dashboard
    pub fn title(&self) -> &'static str {
        match self {
            FactorCategory::Satisfaction => "😊 Satisfaction et Engagement",
            FactorCategory::Workload => "⏰ Charge de Travail",
            FactorCategory::Tenure => "📅 Ancienneté et Expérience",
            FactorCategory::Career => "📈 Développement de Carrière",
            FactorCategory::Compensation => "💰 Rémunération",
            FactorCategory::Wellbeing => "🧘 Bien-être et Santé",
            FactorCategory::Worklife => "👨‍👩‍👧‍👦 Équilibre Vie Pro/Perso",
        }
    }
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual impact band of a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One weighted explanation of risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub weight: f64,
    pub category: FactorCategory,
}

impl RiskFactor {
    fn new(
        icon: &str,
        title: &str,
        description: String,
        weight: f64,
        category: FactorCategory,
    ) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description,
            weight,
            category,
        }
    }

    pub fn impact(&self) -> Impact {
        if self.weight >= HIGH_IMPACT_WEIGHT {
            Impact::High
        } else if self.weight >= MEDIUM_IMPACT_WEIGHT {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

/// Expected monthly income for an experience/level pair
pub fn expected_income(experience_years: i64, hierarchy_level: i64) -> f64 {
    2500.0 + 200.0 * experience_years as f64 + 500.0 * hierarchy_level as f64
}

/// Evaluate every rule block and return the active factors, heaviest first.
///
/// Ties keep rule order. An empty result means no major risk was identified.
pub fn analyze(profile: &EmployeeProfile) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    let satisfaction = profile.satisfaction_moyenne.unwrap_or(defaults::SATISFACTION);
    if satisfaction < 2.0 {
        factors.push(RiskFactor::new(
            "🚨",
            "Satisfaction très faible",
            format!("Satisfaction critique: {}/4", satisfaction),
            0.25,
            FactorCategory::Satisfaction,
        ));
    } else if satisfaction < 2.5 {
        factors.push(RiskFactor::new(
            "⚠️",
            "Satisfaction faible",
            format!("Satisfaction moyenne: {}/4", satisfaction),
            0.15,
            FactorCategory::Satisfaction,
        ));
    }

    let hours = profile.nombre_heures_travailless.unwrap_or(defaults::WEEKLY_HOURS);
    if hours > 50 {
        factors.push(RiskFactor::new(
            "⏰",
            "Surcharge de travail",
            format!("{}h/semaine (charge excessive)", hours),
            0.20,
            FactorCategory::Workload,
        ));
    } else if hours > 45 {
        factors.push(RiskFactor::new(
            "⚖️",
            "Charge de travail élevée",
            format!("{}h/semaine", hours),
            0.10,
            FactorCategory::Workload,
        ));
    }

    let tenure = profile.annees_dans_l_entreprise.unwrap_or(defaults::YEARS_AT_COMPANY);
    let age = profile.age.unwrap_or(defaults::AGE);
    if tenure < 1 {
        factors.push(RiskFactor::new(
            "🆕",
            "Nouvel employé",
            "Moins d'1 an dans l'entreprise (période critique)".to_string(),
            0.18,
            FactorCategory::Tenure,
        ));
    } else if tenure < 2 && age < 30 {
        factors.push(RiskFactor::new(
            "👶",
            "Jeune talent",
            format!("{} ans, {} an(s) d'ancienneté (risque de départ)", age, tenure),
            0.12,
            FactorCategory::Tenure,
        ));
    }

    let promotion_gap = profile
        .annees_depuis_la_derniere_promotion
        .unwrap_or(defaults::YEARS_SINCE_PROMOTION);
    let level = profile
        .niveau_hierarchique_poste
        .unwrap_or(defaults::HIERARCHY_LEVEL);
    if promotion_gap > 3 && level < 3 {
        factors.push(RiskFactor::new(
            "📈",
            "Stagnation professionnelle",
            format!(
                "Dernière promotion il y a {} ans, niveau {}",
                promotion_gap, level
            ),
            0.15,
            FactorCategory::Career,
        ));
    } else if promotion_gap > 2 {
        factors.push(RiskFactor::new(
            "⏳",
            "Carrière en pause",
            format!("Dernière promotion il y a {} ans", promotion_gap),
            0.08,
            FactorCategory::Career,
        ));
    }

    let income = profile.revenu_mensuel.unwrap_or(defaults::MONTHLY_INCOME);
    if income > 0 {
        let experience = profile
            .annee_experience_totale
            .unwrap_or(defaults::EXPERIENCE_YEARS);
        let expected = expected_income(experience, level);

        if (income as f64) < expected * 0.8 {
            factors.push(RiskFactor::new(
                "💰",
                "Rémunération sous le marché",
                format!("{}€ vs {:.0}€ attendu", income, expected),
                0.12,
                FactorCategory::Compensation,
            ));
        }
    }

    let burnout = profile.parent_burnout.unwrap_or(defaults::BURNOUT);
    if burnout >= 3 {
        factors.push(RiskFactor::new(
            "🔥",
            "Risque de burnout élevé",
            format!("Score burnout: {}/4 (niveau critique)", burnout),
            0.20,
            FactorCategory::Wellbeing,
        ));
    } else if burnout >= 2 {
        factors.push(RiskFactor::new(
            "😰",
            "Stress important",
            format!("Score burnout: {}/4", burnout),
            0.10,
            FactorCategory::Wellbeing,
        ));
    }

    let balance = profile
        .satisfaction_employee_equilibre_pro_perso
        .unwrap_or(defaults::WORK_LIFE_BALANCE);
    let has_children = profile
        .ayant_enfants
        .as_deref()
        .unwrap_or(defaults::HAS_CHILDREN);
    if balance <= 2 && has_children == "Oui" {
        factors.push(RiskFactor::new(
            "👨‍👩‍👧‍👦",
            "Conflit travail/famille",
            format!("Équilibre {}/4 avec enfants à charge", balance),
            0.15,
            FactorCategory::Worklife,
        ));
    } else if balance <= 2 {
        factors.push(RiskFactor::new(
            "⚖️",
            "Déséquilibre vie pro/perso",
            format!("Équilibre {}/4", balance),
            0.08,
            FactorCategory::Worklife,
        ));
    }

    // sort_by is stable: equal weights keep rule order
    factors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    factors
}

/// Group factors by category, preserving first-seen category order
pub fn group_by_category(factors: &[RiskFactor]) -> Vec<(FactorCategory, Vec<&RiskFactor>)> {
    let mut groups: Vec<(FactorCategory, Vec<&RiskFactor>)> = Vec::new();

    for factor in factors {
        match groups.iter_mut().find(|(c, _)| *c == factor.category) {
            Some((_, members)) => members.push(factor),
            None => groups.push((factor.category, vec![factor])),
        }
    }

    groups
}
