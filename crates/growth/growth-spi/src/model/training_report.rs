//! Training diagnostics.

use serde::{Deserialize, Serialize};

use super::Algorithm;

/// Held-out evaluation of one candidate regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub algorithm: Algorithm,
    /// Mean absolute error
    #[serde(with = "null_as_nan")]
    pub mae: f64,
    /// Mean squared error
    #[serde(with = "null_as_nan")]
    pub mse: f64,
    /// Coefficient of determination; `NaN` (JSON `null`) below two held-out rows
    #[serde(with = "null_as_nan")]
    pub r2: f64,
    /// First held-out predictions
    pub predictions: Vec<f64>,
    /// Matching held-out targets
    pub actual: Vec<f64>,
}

/// JSON has no NaN: non-finite metrics are written as `null` and read back as NaN.
mod null_as_nan {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Importance of one feature in the selected model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Algorithm selected and persisted
    pub best_model: Algorithm,
    /// Evaluations of every candidate that could be fitted, in evaluation order
    pub results: Vec<ModelEvaluation>,
    /// Feature importances of the selected model, in feature order
    pub feature_importance: Vec<FeatureImportance>,
}

impl TrainingReport {
    /// Evaluation of the selected model.
    pub fn best(&self) -> Option<&ModelEvaluation> {
        self.results.iter().find(|r| r.algorithm == self.best_model)
    }

    /// Evaluation of a specific algorithm.
    pub fn evaluation(&self, algorithm: Algorithm) -> Option<&ModelEvaluation> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(r2: f64) -> TrainingReport {
        TrainingReport {
            best_model: Algorithm::RandomForest,
            results: vec![ModelEvaluation {
                algorithm: Algorithm::RandomForest,
                mae: 12.5,
                mse: 156.25,
                r2,
                predictions: vec![110.0],
                actual: vec![100.0],
            }],
            feature_importance: vec![FeatureImportance {
                feature: "stargazers_count".to_string(),
                importance: 1.0,
            }],
        }
    }

    #[test]
    fn test_report_roundtrip() {
        let original = report(0.75);
        let json = serde_json::to_string(&original).unwrap();
        let restored: TrainingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_undefined_r2_survives_json() {
        let json = serde_json::to_string(&report(f64::NAN)).unwrap();
        assert!(json.contains("\"r2\":null"));

        let restored: TrainingReport = serde_json::from_str(&json).unwrap();
        let best = restored.best().unwrap();
        assert!(best.r2.is_nan());
        assert_eq!(best.mae, 12.5);
        assert_eq!(best.mse, 156.25);
    }
}
