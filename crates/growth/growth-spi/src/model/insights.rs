//! Combined dashboard output.

use serde::{Deserialize, Serialize};

use super::{PredictionResult, TrainingReport, TrendSummary};

/// Training outcome, top predictions and trends for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlInsights {
    /// Present when this call trained a model; `None` when a stored model was reused
    pub training_results: Option<TrainingReport>,
    /// Highest predicted growth first
    pub top_predictions: Vec<PredictionResult>,
    pub trends: TrendSummary,
    /// Generation time, RFC 3339
    pub timestamp: String,
}
