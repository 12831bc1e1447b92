//! Growth Core
//!
//! Core implementations for repository growth prediction:
//! - Feature building from raw repository records
//! - Random forest, gradient boosting and least-squares regressors
//! - Model training with held-out selection and persistence
//! - Forecasting and trend analysis
//! - File and in-memory model stores, directory snapshot loading

mod artifact;
mod clock;
mod features;
mod forecaster;
mod predictor;
mod scaler;
mod snapshot;
mod split;
mod store;
mod trainer;
mod trends;

pub mod metrics;
pub mod regression;

pub use artifact::ModelArtifact;
pub use clock::{FixedClock, SystemClock};
pub use features::{encode_language, parse_created_at, FeatureBuilder, OTHER_LANGUAGE_CODE};
pub use forecaster::{build_prediction, Forecaster, CONFIDENCE_BAND_FRACTION};
pub use predictor::GrowthPredictor;
pub use scaler::StandardScaler;
pub use snapshot::{parse_snapshot, DirectorySnapshotSource, SNAPSHOT_PREFIX};
pub use split::{train_test_split, SplitIndices};
pub use store::{FileModelStore, MemoryModelStore, SELECTION_RECORD};
pub use trainer::ModelTrainer;
pub use trends::TrendAnalyzer;

// Re-export from API for convenience
pub use growth_api::{
    Algorithm, ConfidenceBand, FeatureImportance, FeatureVector, ForecastConfig, GrowthError,
    LanguageShare, MlInsights, ModelEvaluation, ModelMetadata, PredictionResult, PredictorConfig,
    RepositoryFeatures, RepositoryRecord, Result, TopPerformer, TrainerConfig, TrainingReport,
    TrendSummary, FEATURE_COUNT, FEATURE_NAMES,
};

// Re-export SPI traits
pub use growth_spi::{Clock, ModelStore, Regressor, SnapshotSource};
