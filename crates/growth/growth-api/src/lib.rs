//! Growth Consumer API
//!
//! Configuration types for training and forecasting, plus re-exports of the
//! SPI contracts and domain types.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use growth_spi::{
    Algorithm, Clock, ConfidenceBand, FeatureImportance, FeatureVector, GrowthError,
    LanguageShare, MlInsights, ModelEvaluation, ModelMetadata, ModelStore, PredictionResult,
    Regressor, RepositoryFeatures, RepositoryRecord, Result, SnapshotSource, TopPerformer,
    TrainingReport, TrendSummary, FEATURE_COUNT, FEATURE_NAMES,
};

/// Configuration for the model trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Held-out fraction used for model selection
    pub test_ratio: f64,
    /// Seed for the split shuffle and forest bootstraps
    pub random_state: u64,
    /// Trees per forest and boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to each boosting stage
    pub learning_rate: f64,
    /// Depth of each boosting tree
    pub boosting_max_depth: usize,
    /// Depth limit for forest trees (`None` grows until leaves are pure)
    pub forest_max_depth: Option<usize>,
    /// Held-out prediction/actual pairs kept in the report
    pub sample_size: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            random_state: 42,
            n_estimators: 100,
            learning_rate: 0.1,
            boosting_max_depth: 3,
            forest_max_depth: None,
            sample_size: 5,
        }
    }
}

impl TrainerConfig {
    /// Set the held-out fraction
    pub fn test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio.clamp(0.1, 0.5);
        self
    }

    /// Set the random seed
    pub fn random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Set the number of trees / boosting stages
    pub fn n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n.max(1);
        self
    }

    /// Set the boosting learning rate
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate.clamp(1e-3, 1.0);
        self
    }

    /// Set the boosting tree depth
    pub fn boosting_max_depth(mut self, depth: usize) -> Self {
        self.boosting_max_depth = depth.max(1);
        self
    }

    /// Limit forest tree depth
    pub fn forest_max_depth(mut self, depth: usize) -> Self {
        self.forest_max_depth = Some(depth.max(1));
        self
    }

    /// Set how many held-out pairs the report keeps
    pub fn sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }
}

/// Configuration for forecasting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Default forecast horizon in days
    pub days_ahead: u32,
    /// Default number of repositories returned by top-performer prediction
    pub top_n: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            days_ahead: 30,
            top_n: 10,
        }
    }
}

impl ForecastConfig {
    /// Set the default horizon
    pub fn days_ahead(mut self, days: u32) -> Self {
        self.days_ahead = days.max(1);
        self
    }

    /// Set the default top-performer count
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = n.max(1);
        self
    }
}

/// Configuration for the growth predictor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub trainer: TrainerConfig,
    pub forecast: ForecastConfig,
}

impl PredictorConfig {
    /// Replace the trainer configuration
    pub fn with_trainer(mut self, trainer: TrainerConfig) -> Self {
        self.trainer = trainer;
        self
    }

    /// Replace the forecast configuration
    pub fn with_forecast(mut self, forecast: ForecastConfig) -> Self {
        self.forecast = forecast;
        self
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, PredictorConfig, TrainerConfig};
    pub use growth_spi::{
        Algorithm, Clock, GrowthError, ModelStore, PredictionResult, Regressor,
        RepositoryFeatures, RepositoryRecord, Result, SnapshotSource, TrainingReport,
        TrendSummary,
    };
}
