//! Feature normalization
//!
//! Maps an arbitrary partial attribute set onto the exact, ordered column
//! schema the classifier was trained with. Numeric columns default to `0`,
//! every other column defaults to the `"Inconnu"` token. The classifier is
//! order-sensitive, so the output is always reindexed to [`FEATURE_COLUMNS`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EmployeeProfile;

/// Sentinel used for missing non-numeric columns
pub const UNKNOWN_TOKEN: &str = "Inconnu";

/// Column order expected by the classifier
pub const FEATURE_COLUMNS: [&str; 34] = [
    "genre",
    "statut_marital",
    "heure_supplementaires",
    "ayant_enfants",
    "poste",
    "domaine_etude",
    "distance_categorie",
    "frequence_deplacement",
    "departement",
    "age",
    "revenu_mensuel",
    "nombre_experiences_precedentes",
    "nombre_heures_travailless",
    "annee_experience_totale",
    "annees_dans_l_entreprise",
    "annees_dans_le_poste_actuel",
    "satisfaction_employee_environnement",
    "note_evaluation_precedente",
    "niveau_hierarchique_poste",
    "satisfaction_employee_nature_travail",
    "satisfaction_employee_equipe",
    "satisfaction_employee_equilibre_pro_perso",
    "note_evaluation_actuelle",
    "nombre_participation_pee",
    "nb_formations_suivies",
    "nombre_employee_sous_responsabilite",
    "distance_domicile_travail",
    "niveau_education",
    "annees_depuis_la_derniere_promotion",
    "annes_sous_responsable_actuel",
    "satisfaction_moyenne",
    "parent_burnout",
    "sous_paye_niveau_dept",
    "augementation_salaire_precedente",
];

/// Columns whose missing value defaults to `0`
pub const NUMERIC_COLUMNS: [&str; 24] = [
    "age",
    "revenu_mensuel",
    "distance_domicile_travail",
    "niveau_education",
    "niveau_hierarchique_poste",
    "nombre_experiences_precedentes",
    "annee_experience_totale",
    "annees_dans_l_entreprise",
    "annees_dans_le_poste_actuel",
    "annees_depuis_la_derniere_promotion",
    "annes_sous_responsable_actuel",
    "nombre_employee_sous_responsabilite",
    "nombre_heures_travailless",
    "satisfaction_employee_environnement",
    "note_evaluation_precedente",
    "satisfaction_employee_nature_travail",
    "satisfaction_employee_equipe",
    "satisfaction_employee_equilibre_pro_perso",
    "note_evaluation_actuelle",
    "nombre_participation_pee",
    "nb_formations_suivies",
    "parent_burnout",
    "sous_paye_niveau_dept",
    "augementation_salaire_precedente",
];

/// Columns whose missing value defaults to [`UNKNOWN_TOKEN`]
pub const CATEGORICAL_COLUMNS: [&str; 9] = [
    "genre",
    "statut_marital",
    "heure_supplementaires",
    "ayant_enfants",
    "poste",
    "domaine_etude",
    "distance_categorie",
    "frequence_deplacement",
    "departement",
];

/// A single cell of a feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value; `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(i) => Some(*i as f64),
            FeatureValue::Float(f) => Some(*f),
            FeatureValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(i) => write!(f, "{}", i),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Partial, unordered attribute mapping
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// Complete feature row in classifier column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    cells: Vec<(&'static str, FeatureValue)>,
}

impl FeatureVector {
    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(name, _)| *name)
    }

    /// (column, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.cells.iter().map(|(name, value)| (*name, value))
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Back to an unordered mapping (used to check idempotence)
    pub fn to_map(&self) -> FeatureMap {
        self.cells
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

/// Whether a missing value for `column` defaults to `0`
pub fn is_numeric_column(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
}

/// Default for a missing column.
///
/// Only the numeric table yields `0`; any other column, including ones outside
/// both tables, yields the unknown token.
pub fn default_value(column: &str) -> FeatureValue {
    if is_numeric_column(column) {
        FeatureValue::Int(0)
    } else {
        FeatureValue::Text(UNKNOWN_TOKEN.to_string())
    }
}

/// Complete and reorder a partial mapping. Extra keys are ignored and supplied
/// values are kept as-is.
pub fn normalize(partial: &FeatureMap) -> FeatureVector {
    let cells = FEATURE_COLUMNS
        .iter()
        .map(|&column| {
            let value = partial
                .get(column)
                .cloned()
                .unwrap_or_else(|| default_value(column));
            (column, value)
        })
        .collect();

    FeatureVector { cells }
}

/// Normalize a structured request body
pub fn normalize_profile(profile: &EmployeeProfile) -> FeatureVector {
    normalize(&profile.to_feature_map())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_subsets_of_schema() {
        for column in NUMERIC_COLUMNS.iter().chain(CATEGORICAL_COLUMNS.iter()) {
            assert!(FEATURE_COLUMNS.contains(column), "{} missing from schema", column);
        }
        for column in CATEGORICAL_COLUMNS {
            assert!(!is_numeric_column(column));
        }
    }

    #[test]
    fn test_normalize_empty_uses_defaults() {
        let vector = normalize(&FeatureMap::new());

        assert_eq!(vector.len(), FEATURE_COLUMNS.len());
        for column in NUMERIC_COLUMNS {
            assert_eq!(vector.get(column), Some(&FeatureValue::Int(0)), "{}", column);
        }
        for column in CATEGORICAL_COLUMNS {
            assert_eq!(
                vector.get(column),
                Some(&FeatureValue::Text(UNKNOWN_TOKEN.to_string())),
                "{}",
                column
            );
        }
    }

    #[test]
    fn test_normalize_keeps_classifier_order() {
        let mut partial = FeatureMap::new();
        partial.insert("parent_burnout".to_string(), FeatureValue::Int(2));
        partial.insert("genre".to_string(), FeatureValue::Text("M".to_string()));

        let vector = normalize(&partial);
        let columns: Vec<&str> = vector.columns().collect();
        assert_eq!(columns, FEATURE_COLUMNS.to_vec());
        assert_eq!(vector.get("parent_burnout"), Some(&FeatureValue::Int(2)));
    }

    #[test]
    fn test_normalize_ignores_extras_and_passes_values_through() {
        let mut partial = FeatureMap::new();
        partial.insert("not_a_column".to_string(), FeatureValue::Int(1));
        partial.insert("age".to_string(), FeatureValue::Text("trente".to_string()));

        let vector = normalize(&partial);
        assert!(vector.get("not_a_column").is_none());
        assert_eq!(vector.get("age"), Some(&FeatureValue::Text("trente".to_string())));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let profile = EmployeeProfile {
            age: Some(35),
            departement: Some("Consulting".to_string()),
            satisfaction_moyenne: Some(2.75),
            ..Default::default()
        };

        let once = normalize_profile(&profile);
        let twice = normalize(&once.to_map());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_average_satisfaction_falls_back_to_unknown() {
        let vector = normalize(&FeatureMap::new());
        assert_eq!(
            vector.get("satisfaction_moyenne"),
            Some(&FeatureValue::Text(UNKNOWN_TOKEN.to_string()))
        );
    }
}
