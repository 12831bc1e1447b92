//! Single-repository forecast.

use serde::{Deserialize, Serialize};

/// Band around a point prediction.
///
/// This is a fixed percentage of the prediction, not a statistically derived
/// prediction interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Lower bound
    pub lower: i64,
    /// Upper bound
    pub upper: i64,
}

/// Forecast for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Repository name
    pub repository: String,
    /// Star count at prediction time
    pub current_stars: u64,
    /// Predicted star count `days_ahead` days from now
    #[serde(rename = "predicted_stars_30d")]
    pub predicted_stars: i64,
    /// Predicted minus current stars
    pub predicted_growth: i64,
    /// Predicted growth as a percentage of current stars (0 when current is 0)
    pub growth_rate_percent: f64,
    /// Heuristic band around the prediction
    pub confidence_interval: ConfidenceBand,
    /// Forecast horizon in days
    pub days_ahead: u32,
    /// Target date, `YYYY-MM-DD`
    pub prediction_date: String,
}
