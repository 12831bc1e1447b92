//! Model module containing growth prediction data structures.
//!
//! - [`RepositoryRecord`] - raw repository as collected from a snapshot
//! - [`FeatureVector`] / [`RepositoryFeatures`] - derived model inputs
//! - [`Algorithm`] / [`ModelMetadata`] - regressor families and persisted selection
//! - [`PredictionResult`] - single-repository forecast
//! - [`TrendSummary`] - batch statistics and insights
//! - [`TrainingReport`] / [`MlInsights`] - training diagnostics and combined output

mod algorithm;
mod feature_vector;
mod insights;
mod prediction_result;
mod repository_record;
mod training_report;
mod trend_summary;

pub use algorithm::{Algorithm, ModelMetadata};
pub use feature_vector::{FeatureVector, RepositoryFeatures, FEATURE_COUNT, FEATURE_NAMES};
pub use insights::MlInsights;
pub use prediction_result::{ConfidenceBand, PredictionResult};
pub use repository_record::RepositoryRecord;
pub use training_report::{FeatureImportance, ModelEvaluation, TrainingReport};
pub use trend_summary::{LanguageShare, TopPerformer, TrendSummary};
