//! Risk classifier adapter
//!
//! Wraps a [`Classifier`] loaded once at process start. A failed load is not
//! fatal: the handle remembers why and every prediction then fails with
//! `ModelUnavailable` until the process restarts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::classifier::{Classifier, LogisticModel};
use crate::features::FeatureVector;
use crate::risk::{round_to, RiskTier};
use crate::{Error, Result};

/// Outcome of one prediction, in the shape served by `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of leaving, as a percentage rounded to 2 decimals
    #[serde(rename = "attrition_risk")]
    pub percentage: f64,
    /// Probability of leaving, rounded to 4 decimals
    #[serde(rename = "attrition_probability")]
    pub probability: f64,
    /// Predicted class (1 = will leave)
    #[serde(rename = "prediction")]
    pub class: u8,
    #[serde(rename = "risk_level")]
    pub tier: RiskTier,
}

/// Diagnostic view of the classifier for `GET /model-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub model_path: Option<String>,
    pub file_exists: bool,
    pub file_size_bytes: Option<u64>,
    pub model_name: Option<String>,
    pub last_error: Option<String>,
}

/// Process-wide, read-only classifier handle
pub struct ClassifierHandle {
    source: Option<PathBuf>,
    file_size: Option<u64>,
    classifier: std::result::Result<Arc<dyn Classifier>, String>,
}

impl ClassifierHandle {
    /// Load a [`LogisticModel`] artifact. Never fails; see [`Self::status`].
    pub fn load(path: &Path) -> Self {
        let file_size = std::fs::metadata(path).ok().map(|m| m.len());

        let classifier = match LogisticModel::from_path(path) {
            Ok(model) => {
                info!(
                    model = %model.name,
                    path = %path.display(),
                    "Attrition model loaded"
                );
                Ok(Arc::new(model) as Arc<dyn Classifier>)
            }
            Err(e) => {
                error!(path = %path.display(), "Failed to load attrition model: {}", e);
                Err(e.to_string())
            }
        };

        Self {
            source: Some(path.to_path_buf()),
            file_size,
            classifier,
        }
    }

    /// Wrap an already constructed classifier
    pub fn from_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            source: None,
            file_size: None,
            classifier: Ok(classifier),
        }
    }

    /// A handle whose every prediction fails with `ModelUnavailable`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            source: None,
            file_size: None,
            classifier: Err(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_ok()
    }

    /// Score a normalized feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let classifier = self
            .classifier
            .as_ref()
            .map_err(|reason| Error::ModelUnavailable(reason.clone()))?;

        let class = classifier.predict(features)?;
        let [_, leave] = classifier.predict_proba(features)?;

        let tier = RiskTier::from_probability(leave)?;

        Ok(PredictionResult {
            percentage: round_to(leave * 100.0, 2),
            probability: round_to(leave, 4),
            class,
            tier,
        })
    }

    pub fn status(&self) -> ModelStatus {
        let model_path = self.source.as_ref().map(|p| p.display().to_string());
        let file_exists = self.source.as_ref().map(|p| p.exists()).unwrap_or(false);

        match &self.classifier {
            Ok(classifier) => ModelStatus {
                model_loaded: true,
                model_path,
                file_exists,
                file_size_bytes: self.file_size,
                model_name: Some(classifier.name().to_string()),
                last_error: None,
            },
            Err(reason) => ModelStatus {
                model_loaded: false,
                model_path,
                file_exists,
                file_size_bytes: self.file_size,
                model_name: None,
                last_error: Some(reason.clone()),
            },
        }
    }
}
