//! Risk tier bucketing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lower bound of the `Moyen` tier
pub const MEDIUM_THRESHOLD: f64 = 0.30;
/// Lower bound of the `Élevé` tier
pub const HIGH_THRESHOLD: f64 = 0.60;
/// Lower bound of the `Très élevé` tier
pub const VERY_HIGH_THRESHOLD: f64 = 0.80;

/// Four ordered labels bucketing the predicted probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Faible")]
    Low,
    #[serde(rename = "Moyen")]
    Medium,
    #[serde(rename = "Élevé")]
    High,
    #[serde(rename = "Très élevé")]
    VeryHigh,
}

impl RiskTier {
    /// Bucket a probability over half-open intervals.
    ///
    /// Fails with `InvalidProbability` for NaN or values outside [0, 1].
    pub fn from_probability(p: f64) -> Result<Self> {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability(p));
        }

        let tier = if p < MEDIUM_THRESHOLD {
            RiskTier::Low
        } else if p < HIGH_THRESHOLD {
            RiskTier::Medium
        } else if p < VERY_HIGH_THRESHOLD {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        };

        Ok(tier)
    }

    /// Display label as served over HTTP
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Faible",
            RiskTier::Medium => "Moyen",
            RiskTier::High => "Élevé",
            RiskTier::VeryHigh => "Très élevé",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (0.0, RiskTier::Low),
            (0.1, RiskTier::Low),
            (0.29, RiskTier::Low),
            (0.29999, RiskTier::Low),
            (0.3, RiskTier::Medium),
            (0.5, RiskTier::Medium),
            (0.59999, RiskTier::Medium),
            (0.6, RiskTier::High),
            (0.79, RiskTier::High),
            (0.79999, RiskTier::High),
            (0.8, RiskTier::VeryHigh),
            (0.9, RiskTier::VeryHigh),
            (1.0, RiskTier::VeryHigh),
        ];

        for (p, expected) in cases {
            assert_eq!(RiskTier::from_probability(p).unwrap(), expected, "p = {}", p);
        }
    }

    #[test]
    fn test_tier_rejects_invalid_probabilities() {
        for p in [-0.1, 1.1, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(RiskTier::from_probability(p), Err(Error::InvalidProbability(_))),
                "p = {}",
                p
            );
        }
    }

    #[test]
    fn test_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&RiskTier::VeryHigh).unwrap();
        assert_eq!(json, "\"Très élevé\"");
        let tier: RiskTier = serde_json::from_str("\"Élevé\"").unwrap();
        assert_eq!(tier, RiskTier::High);
        assert_eq!(tier.to_string(), "Élevé");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(11.4849, 2), 11.48);
        assert_eq!(round_to(0.114849, 4), 0.1148);
    }
}
