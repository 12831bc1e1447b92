//! Regressor families and persisted selection metadata.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GrowthError;

/// Candidate regressor families, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Bagged CART trees
    RandomForest,
    /// Boosted shallow CART trees on squared loss
    GradientBoosting,
    /// Ordinary least squares with intercept
    LinearRegression,
}

impl Algorithm {
    /// All algorithms in evaluation order. Ties during selection keep this order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::RandomForest,
        Algorithm::GradientBoosting,
        Algorithm::LinearRegression,
    ];

    /// Name used as the model store key.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::RandomForest => "RandomForest",
            Algorithm::GradientBoosting => "GradientBoosting",
            Algorithm::LinearRegression => "LinearRegression",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GrowthError::InvalidParameter {
                name: "algorithm".to_string(),
                reason: format!("unknown algorithm '{}'", s),
            })
    }
}

/// Selection record persisted next to the model artifacts.
///
/// Loading goes through this record, so the chosen model never depends on the
/// order in which the store lists its contents. Metrics that were not finite
/// are stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Selected algorithm (also the artifact key)
    pub algorithm: Algorithm,
    /// Held-out coefficient of determination
    pub r2: Option<f64>,
    /// Held-out mean absolute error
    pub mae: Option<f64>,
    /// Held-out mean squared error
    pub mse: Option<f64>,
    /// Training time, RFC 3339
    pub trained_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::RandomForest.to_string(), "RandomForest");
        assert_eq!(Algorithm::GradientBoosting.to_string(), "GradientBoosting");
        assert_eq!(Algorithm::LinearRegression.to_string(), "LinearRegression");
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(
            "randomforest".parse::<Algorithm>().unwrap(),
            Algorithm::RandomForest
        );
        assert_eq!(
            "LinearRegression".parse::<Algorithm>().unwrap(),
            Algorithm::LinearRegression
        );
        assert!("xgboost".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_metadata_serializes_missing_metric_as_null() {
        let meta = ModelMetadata {
            algorithm: Algorithm::GradientBoosting,
            r2: None,
            mae: Some(12.5),
            mse: Some(156.25),
            trained_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"r2\":null"));

        let back: ModelMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
