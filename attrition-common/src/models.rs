//! Employee record types
//!
//! One `EmployeeProfile` shape serves three roles: the stored row (with an id),
//! the `/predict` request body and the input of the risk factor analyzer.
//! Every attribute is optional; keys the record does not know are ignored on
//! deserialization.

use serde::{Deserialize, Serialize};

use crate::features::{FeatureMap, FeatureValue};

/// Attribute set of one employee, all fields optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EmployeeProfile {
    // Personal
    pub genre: Option<String>,
    pub age: Option<i64>,
    pub statut_marital: Option<String>,
    pub ayant_enfants: Option<String>,
    pub distance_domicile_travail: Option<i64>,
    pub niveau_education: Option<i64>,

    // Job
    pub poste: Option<String>,
    pub domaine_etude: Option<String>,
    pub departement: Option<String>,
    pub niveau_hierarchique_poste: Option<i64>,

    // Career
    pub nombre_experiences_precedentes: Option<i64>,
    pub annee_experience_totale: Option<i64>,
    pub annees_dans_l_entreprise: Option<i64>,
    pub annees_dans_le_poste_actuel: Option<i64>,
    pub annees_depuis_la_derniere_promotion: Option<i64>,
    pub annes_sous_responsable_actuel: Option<i64>,
    pub nombre_employee_sous_responsabilite: Option<i64>,

    // Working conditions
    pub revenu_mensuel: Option<i64>,
    pub heure_supplementaires: Option<String>,
    pub nombre_heures_travailless: Option<i64>,
    pub distance_categorie: Option<String>,
    pub frequence_deplacement: Option<String>,

    // Satisfaction and evaluation
    pub satisfaction_employee_environnement: Option<i64>,
    pub satisfaction_employee_nature_travail: Option<i64>,
    pub satisfaction_employee_equipe: Option<i64>,
    pub satisfaction_employee_equilibre_pro_perso: Option<i64>,
    pub satisfaction_moyenne: Option<f64>,
    pub note_evaluation_precedente: Option<i64>,
    pub note_evaluation_actuelle: Option<i64>,

    // Training
    pub nb_formations_suivies: Option<i64>,
    pub nombre_participation_pee: Option<i64>,

    // Risk indicators
    pub parent_burnout: Option<i64>,
    pub sous_paye_niveau_dept: Option<i64>,
    pub augementation_salaire_precedente: Option<i64>,
}

impl EmployeeProfile {
    /// Attributes that are present, keyed by column name.
    ///
    /// Integers stay `Int`, `satisfaction_moyenne` stays `Float`, strings are
    /// passed through untouched. Absent fields are simply not in the map.
    pub fn to_feature_map(&self) -> FeatureMap {
        let mut map = FeatureMap::new();

        let value = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(object)) => object,
            _ => return map,
        };

        for (name, raw) in value {
            let feature = match raw {
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => FeatureValue::Int(i),
                    None => FeatureValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                serde_json::Value::String(s) => FeatureValue::Text(s),
                _ => continue,
            };
            map.insert(name, feature);
        }

        map
    }
}

/// Stored employee row: immutable integer id plus the attribute set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub profile: EmployeeProfile,
}

/// Paginated employee listing returned by `GET /employees`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeList {
    pub total: i64,
    pub employees: Vec<Employee>,
}
