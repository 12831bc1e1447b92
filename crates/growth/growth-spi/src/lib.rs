//! Growth Service Provider Interface
//!
//! Defines the contracts and domain types for repository growth prediction:
//! - Regressors over repository feature vectors
//! - Model persistence
//! - Snapshot sources and clocks injected into the predictor

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at the crate root for convenience
pub use contract::{Clock, ModelStore, Regressor, SnapshotSource};
pub use error::{GrowthError, Result};
pub use model::{
    Algorithm, ConfidenceBand, FeatureImportance, FeatureVector, LanguageShare, MlInsights,
    ModelEvaluation, ModelMetadata, PredictionResult, RepositoryFeatures, RepositoryRecord,
    TopPerformer, TrainingReport, TrendSummary, FEATURE_COUNT, FEATURE_NAMES,
};
