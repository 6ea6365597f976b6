//! Recommendation generation
//!
//! Turns the analyzed risk factors and the classifier tier into HR actions
//! grouped by time horizon. Purely rule-based; the same inputs always yield
//! the same buckets in the same order.

use serde::{Deserialize, Serialize};

use crate::factors::{defaults, FactorCategory, RiskFactor, HIGH_IMPACT_WEIGHT};
use crate::models::EmployeeProfile;
use crate::risk::RiskTier;

/// Percentage above which the urgent alert fires regardless of tier
pub const URGENT_PERCENTAGE: f64 = 80.0;

/// Time horizon of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    ShortTerm,
    MediumTerm,
    Preventive,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::ShortTerm,
        Priority::MediumTerm,
        Priority::Preventive,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            Priority::Urgent => "🚨",
            Priority::ShortTerm => "⏰",
            Priority::MediumTerm => "📅",
            Priority::Preventive => "🛡️",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Priority::Urgent => "Actions Urgentes (24-48h)",
            Priority::ShortTerm => "Court Terme (1-4 semaines)",
            Priority::MediumTerm => "Moyen Terme (1-3 mois)",
            Priority::Preventive => "Préventif (Continu)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub urgent: Vec<String>,
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub preventive: Vec<String>,
}

impl Recommendations {
    pub fn bucket(&self, priority: Priority) -> &[String] {
        match priority {
            Priority::Urgent => &self.urgent,
            Priority::ShortTerm => &self.short_term,
            Priority::MediumTerm => &self.medium_term,
            Priority::Preventive => &self.preventive,
        }
    }

    fn push(&mut self, priority: Priority, action: &str) {
        let bucket = match priority {
            Priority::Urgent => &mut self.urgent,
            Priority::ShortTerm => &mut self.short_term,
            Priority::MediumTerm => &mut self.medium_term,
            Priority::Preventive => &mut self.preventive,
        };
        bucket.push(action.to_string());
    }

    fn extend(&mut self, priority: Priority, actions: &[&str]) {
        for action in actions {
            self.push(priority, action);
        }
    }

    /// Number of actions across every bucket
    pub fn total_actions(&self) -> usize {
        Priority::ALL.iter().map(|p| self.bucket(*p).len()).sum()
    }
}

fn has_high_impact(factors: &[RiskFactor], category: FactorCategory) -> bool {
    factors
        .iter()
        .any(|f| f.category == category && f.weight >= HIGH_IMPACT_WEIGHT)
}

/// Build the action plan for one employee.
///
/// `factors` is the output of [`crate::factors::analyze`] for `profile`;
/// `tier` and `percentage` come from the classifier.
pub fn recommend(
    profile: &EmployeeProfile,
    factors: &[RiskFactor],
    tier: RiskTier,
    percentage: f64,
) -> Recommendations {
    use Priority::*;

    let mut recs = Recommendations::default();
    let present = |category: FactorCategory| factors.iter().any(|f| f.category == category);

    if tier == RiskTier::VeryHigh || percentage > URGENT_PERCENTAGE {
        recs.extend(
            Urgent,
            &[
                "🚨 ALERTE : Risque de départ imminent",
                "🎯 Planifier un entretien individuel sous 48h",
                "💬 Évaluer immédiatement les sources d'insatisfaction principales",
            ],
        );
    }

    if has_high_impact(factors, FactorCategory::Satisfaction) {
        recs.push(Urgent, "🔍 Audit complet de satisfaction avec questionnaire détaillé");
        recs.extend(
            ShortTerm,
            &[
                "💰 Évaluer la rémunération par rapport au marché",
                "🏡 Discuter des conditions de travail et environnement",
            ],
        );
    }

    if present(FactorCategory::Workload) {
        let hours = profile
            .nombre_heures_travailless
            .unwrap_or(defaults::WEEKLY_HOURS);

        if hours > 50 {
            recs.push(Urgent, "⚖️ Réduction immédiate de la charge de travail");
            recs.push(ShortTerm, "📋 Révision des priorités et délégation");
        } else if hours > 45 {
            recs.push(ShortTerm, "📊 Analyse et optimisation de la charge de travail");
        }

        recs.push(MediumTerm, "🛠️ Formation sur la gestion du temps et priorisation");
    }

    if present(FactorCategory::Career) {
        let gap = profile
            .annees_depuis_la_derniere_promotion
            .unwrap_or(defaults::YEARS_SINCE_PROMOTION);
        let level = profile
            .niveau_hierarchique_poste
            .unwrap_or(defaults::HIERARCHY_LEVEL);

        if gap > 3 {
            recs.push(ShortTerm, "📈 Élaborer un plan de développement de carrière");
            recs.push(MediumTerm, "🎓 Identifier les compétences à développer pour promotion");
            if level < 3 {
                recs.push(MediumTerm, "🎯 Préparer un objectif de promotion dans les 6-12 mois");
            }
        }

        recs.push(ShortTerm, "👥 Assigner un mentor si pas déjà fait");
    }

    if present(FactorCategory::Compensation) {
        recs.push(ShortTerm, "💰 Révision salariale avec benchmark marché");
        recs.push(
            MediumTerm,
            "🎁 Envisager avantages complémentaires (flexibilité, formation)",
        );
    }

    if present(FactorCategory::Wellbeing) {
        if has_high_impact(factors, FactorCategory::Wellbeing) {
            recs.push(Urgent, "🏥 Proposer un accompagnement psychologique");
            recs.push(ShortTerm, "🏖️ Encourager une pause/congé si possible");
        }

        recs.push(ShortTerm, "🧘 Programme de prévention du stress");
        recs.extend(
            MediumTerm,
            &[
                "🏃‍♂️ Promouvoir activités bien-être",
                "📱 Encourager déconnexion hors travail heures",
            ],
        );
    }

    if present(FactorCategory::Worklife) {
        let balance = profile
            .satisfaction_employee_equilibre_pro_perso
            .unwrap_or(defaults::WORK_LIFE_BALANCE);
        let has_children = profile
            .ayant_enfants
            .as_deref()
            .unwrap_or(defaults::HAS_CHILDREN);

        if has_children == "Oui" && balance <= 2 {
            recs.extend(
                ShortTerm,
                &[
                    "👨‍👩‍👧‍👦 Discuter aménagements horaires si possible",
                    "🏠 Évaluer options de télétravail",
                ],
            );
        }

        recs.push(MediumTerm, "⚖️ Politique d'équilibre vie pro/perso personnalisée");
    }

    match tier {
        RiskTier::Medium => recs.extend(
            Preventive,
            &[
                "👂 Maintenir des points réguliers (mensuels)",
                "📊 Suivi des indicateurs de satisfaction",
                "🎉 Reconnaître et célébrer les contributions",
            ],
        ),
        RiskTier::Low => recs.extend(
            Preventive,
            &[
                "😊 Continuer la valorisation régulière",
                "🌟 Identifier opportunités de développement",
                "👥 Proposer du mentorat inversé",
            ],
        ),
        RiskTier::High | RiskTier::VeryHigh => recs.extend(
            Preventive,
            &[
                "📈 Mettre en place un plan de suivi hebdomadaire",
                "🤝 Impliquer l'équipe dans le plan d'action",
                "📝 Documenter les actions et progrès",
            ],
        ),
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::analyze;

    fn high_risk_profile() -> EmployeeProfile {
        EmployeeProfile {
            satisfaction_moyenne: Some(1.25),
            nombre_heures_travailless: Some(55),
            annees_dans_l_entreprise: Some(0),
            parent_burnout: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn test_low_risk_gets_only_preventive_valorisation() {
        let profile = EmployeeProfile {
            satisfaction_moyenne: Some(4.0),
            nombre_heures_travailless: Some(40),
            annees_dans_l_entreprise: Some(5),
            ..Default::default()
        };
        let factors = analyze(&profile);
        let recs = recommend(&profile, &factors, RiskTier::Low, 1.02);

        assert!(recs.urgent.is_empty());
        assert!(recs.short_term.is_empty());
        assert!(recs.medium_term.is_empty());
        assert_eq!(recs.preventive.len(), 3);
        assert_eq!(recs.preventive[0], "😊 Continuer la valorisation régulière");
        assert_eq!(recs.total_actions(), 3);
    }

    #[test]
    fn test_high_risk_plan() {
        let profile = high_risk_profile();
        let factors = analyze(&profile);
        let recs = recommend(&profile, &factors, RiskTier::VeryHigh, 99.81);

        assert_eq!(
            recs.urgent,
            vec![
                "🚨 ALERTE : Risque de départ imminent",
                "🎯 Planifier un entretien individuel sous 48h",
                "💬 Évaluer immédiatement les sources d'insatisfaction principales",
                "🔍 Audit complet de satisfaction avec questionnaire détaillé",
                "⚖️ Réduction immédiate de la charge de travail",
                "🏥 Proposer un accompagnement psychologique",
            ]
        );
        assert_eq!(recs.short_term.len(), 5);
        assert_eq!(recs.medium_term.len(), 3);
        assert_eq!(recs.preventive[0], "📈 Mettre en place un plan de suivi hebdomadaire");
        assert_eq!(recs.total_actions(), 17);
    }

    #[test]
    fn test_percentage_alone_triggers_alert() {
        let profile = EmployeeProfile::default();
        let recs = recommend(&profile, &[], RiskTier::High, 80.5);
        assert_eq!(recs.urgent.len(), 3);

        let recs = recommend(&profile, &[], RiskTier::High, 80.0);
        assert!(recs.urgent.is_empty());
    }

    #[test]
    fn test_medium_satisfaction_factor_does_not_escalate() {
        let profile = EmployeeProfile {
            satisfaction_moyenne: Some(2.2),
            annees_dans_l_entreprise: Some(4),
            ..Default::default()
        };
        let factors = analyze(&profile);
        let recs = recommend(&profile, &factors, RiskTier::Medium, 42.0);

        assert!(recs.urgent.is_empty());
        assert!(recs.short_term.is_empty());
        assert_eq!(recs.preventive[0], "👂 Maintenir des points réguliers (mensuels)");
    }

    #[test]
    fn test_career_stagnation_plan() {
        let profile = EmployeeProfile {
            annees_dans_l_entreprise: Some(6),
            annees_depuis_la_derniere_promotion: Some(5),
            niveau_hierarchique_poste: Some(2),
            ..Default::default()
        };
        let factors = analyze(&profile);
        let recs = recommend(&profile, &factors, RiskTier::Medium, 35.0);

        assert_eq!(
            recs.short_term,
            vec![
                "📈 Élaborer un plan de développement de carrière",
                "👥 Assigner un mentor si pas déjà fait",
            ]
        );
        assert_eq!(recs.medium_term.len(), 2);
    }

    #[test]
    fn test_worklife_with_children() {
        let profile = EmployeeProfile {
            annees_dans_l_entreprise: Some(6),
            satisfaction_employee_equilibre_pro_perso: Some(1),
            ayant_enfants: Some("Oui".to_string()),
            ..Default::default()
        };
        let factors = analyze(&profile);
        let recs = recommend(&profile, &factors, RiskTier::Low, 12.0);

        assert_eq!(recs.short_term.len(), 2);
        assert_eq!(
            recs.medium_term,
            vec!["⚖️ Politique d'équilibre vie pro/perso personnalisée"]
        );
    }

    #[test]
    fn test_priority_order_and_titles() {
        let titles: Vec<&str> = Priority::ALL.iter().map(|p| p.title()).collect();
        assert_eq!(titles[0], "Actions Urgentes (24-48h)");
        assert_eq!(titles[3], "Préventif (Continu)");
    }
}
