//! Persisted model: fitted scaler plus fitted regressor

use growth_spi::{Algorithm, FeatureVector, GrowthError, Regressor, Result};
use serde::{Deserialize, Serialize};

use crate::regression::TrainedModel;
use crate::scaler::StandardScaler;

/// Everything inference needs, stored under the algorithm name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub scaler: StandardScaler,
    pub model: TrainedModel,
}

impl ModelArtifact {
    pub fn new(scaler: StandardScaler, model: TrainedModel) -> Self {
        Self { scaler, model }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.model.algorithm()
    }

    /// Scale one feature vector and predict its star count.
    pub fn predict_one(&self, features: &FeatureVector) -> Result<f64> {
        let row = self.scaler.transform_row(&features.to_row())?;
        self.model
            .predict(&[row])?
            .into_iter()
            .next()
            .ok_or_else(|| GrowthError::PredictionFailure("model returned no prediction".to_string()))
    }
}
