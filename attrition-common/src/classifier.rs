//! Classifier capability boundary
//!
//! The attrition model is opaque to the rest of the service: anything that can
//! turn a complete [`FeatureVector`] into a class and a two-class probability
//! implements [`Classifier`]. [`LogisticModel`] is the artifact format shipped
//! with the service: a standardized logistic regression with one-hot
//! categorical weights, serialized as JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::{FeatureValue, FeatureVector, FEATURE_COLUMNS};
use crate::{Error, Result};

/// Binary attrition classifier
pub trait Classifier: Send + Sync {
    /// Human-readable model identifier
    fn name(&self) -> &str;

    /// Class probabilities `[stay, leave]`
    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2]>;

    /// Predicted class: 1 = will leave
    fn predict(&self, row: &FeatureVector) -> Result<u8> {
        let [stay, leave] = self.predict_proba(row)?;
        Ok(u8::from(leave > stay))
    }
}

/// One input column of the logistic model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Standardized numeric column: `weight * (x - mean) / scale`
    Numeric {
        name: String,
        mean: f64,
        scale: f64,
        weight: f64,
    },
    /// One-hot column; unseen categories contribute nothing
    Categorical {
        name: String,
        #[serde(default)]
        weights: BTreeMap<String, f64>,
    },
}

impl FeatureSpec {
    pub fn name(&self) -> &str {
        match self {
            FeatureSpec::Numeric { name, .. } | FeatureSpec::Categorical { name, .. } => name,
        }
    }
}

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub intercept: f64,
    /// Probability above which the positive class is predicted
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Input columns, in training order
    pub features: Vec<FeatureSpec>,
}

impl LogisticModel {
    /// Parse and validate an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let model: LogisticModel =
            serde_json::from_str(json).map_err(|e| Error::ModelArtifact(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate an artifact file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The artifact must declare exactly the normalizer's columns, in order,
    /// with usable scaling parameters.
    pub fn validate(&self) -> Result<()> {
        let declared: Vec<&str> = self.features.iter().map(|f| f.name()).collect();
        if declared != FEATURE_COLUMNS {
            return Err(Error::ModelArtifact(format!(
                "feature columns do not match the expected schema ({} declared, {} expected)",
                declared.len(),
                FEATURE_COLUMNS.len()
            )));
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::ModelArtifact(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }

        if !self.intercept.is_finite() {
            return Err(Error::ModelArtifact("intercept is not finite".to_string()));
        }

        for spec in &self.features {
            match spec {
                FeatureSpec::Numeric { name, mean, scale, weight } => {
                    if !(scale.is_finite() && *scale > 0.0) {
                        return Err(Error::ModelArtifact(format!(
                            "column {} has invalid scale {}",
                            name, scale
                        )));
                    }
                    if !mean.is_finite() || !weight.is_finite() {
                        return Err(Error::ModelArtifact(format!(
                            "column {} has non-finite parameters",
                            name
                        )));
                    }
                }
                FeatureSpec::Categorical { name, weights } => {
                    if weights.values().any(|w| !w.is_finite()) {
                        return Err(Error::ModelArtifact(format!(
                            "column {} has non-finite category weights",
                            name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Linear score before the sigmoid
    pub fn decision_function(&self, row: &FeatureVector) -> Result<f64> {
        if row.len() != self.features.len() {
            return Err(Error::Prediction(format!(
                "expected {} columns, got {}",
                self.features.len(),
                row.len()
            )));
        }

        let mut z = self.intercept;

        for (spec, (column, value)) in self.features.iter().zip(row.iter()) {
            if spec.name() != column {
                return Err(Error::Prediction(format!(
                    "column order mismatch: expected {}, got {}",
                    spec.name(),
                    column
                )));
            }

            match spec {
                FeatureSpec::Numeric { mean, scale, weight, .. } => {
                    let x = value.as_f64().ok_or_else(|| {
                        Error::Prediction(format!(
                            "could not convert string to float: '{}' (column {})",
                            value, column
                        ))
                    })?;
                    z += weight * (x - mean) / scale;
                }
                FeatureSpec::Categorical { weights, .. } => {
                    let category = match value {
                        FeatureValue::Text(s) => s.clone(),
                        other => other.to_string(),
                    };
                    z += weights.get(&category).copied().unwrap_or(0.0);
                }
            }
        }

        if !z.is_finite() {
            return Err(Error::Prediction(format!("non-finite score {}", z)));
        }

        Ok(z)
    }
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_proba(&self, row: &FeatureVector) -> Result<[f64; 2]> {
        let z = self.decision_function(row)?;
        let leave = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - leave, leave])
    }

    fn predict(&self, row: &FeatureVector) -> Result<u8> {
        let [_, leave] = self.predict_proba(row)?;
        Ok(u8::from(leave > self.threshold))
    }
}
