//! Per-repository forecasting with the selected model

use chrono::{Days, NaiveDate, NaiveDateTime};
use growth_spi::{
    Algorithm, ConfidenceBand, GrowthError, ModelStore, PredictionResult, RepositoryRecord,
    Result,
};
use tracing::debug;

use crate::artifact::ModelArtifact;
use crate::features::FeatureBuilder;

/// Half-width of the confidence band as a fraction of the prediction.
///
/// A fixed heuristic, not a statistical interval.
pub const CONFIDENCE_BAND_FRACTION: f64 = 0.15;

/// Assemble a [`PredictionResult`] from a raw model output.
///
/// Growth is measured on the raw prediction; integer fields truncate toward
/// zero only when emitted. Growth percent is rounded to two decimals and is 0
/// when the repository has no stars yet.
pub fn build_prediction(
    repository: &str,
    current_stars: u64,
    predicted: f64,
    days_ahead: u32,
    prediction_date: NaiveDate,
) -> Result<PredictionResult> {
    if !predicted.is_finite() {
        return Err(GrowthError::PredictionFailure(format!(
            "model produced non-finite prediction for '{}'",
            repository
        )));
    }

    let current = current_stars as f64;
    let growth = predicted - current;
    let growth_rate_percent = if current_stars == 0 {
        0.0
    } else {
        round2(growth / current * 100.0)
    };
    let margin = predicted * CONFIDENCE_BAND_FRACTION;

    Ok(PredictionResult {
        repository: repository.to_string(),
        current_stars,
        predicted_stars: predicted.trunc() as i64,
        predicted_growth: growth.trunc() as i64,
        growth_rate_percent,
        confidence_interval: ConfidenceBand {
            lower: (predicted - margin).trunc() as i64,
            upper: (predicted + margin).trunc() as i64,
        },
        days_ahead,
        prediction_date: prediction_date.format("%Y-%m-%d").to_string(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applies a loaded artifact to individual records
#[derive(Debug, Clone)]
pub struct Forecaster {
    artifact: ModelArtifact,
    builder: FeatureBuilder,
}

impl Forecaster {
    pub fn new(artifact: ModelArtifact, now: NaiveDateTime) -> Self {
        Self {
            artifact,
            builder: FeatureBuilder::new(now),
        }
    }

    /// Load the selected artifact from `store`.
    ///
    /// Returns `NoModelAvailable` when nothing has been trained; other store
    /// failures become `PredictionFailure`.
    pub fn load<S: ModelStore>(store: &S, now: NaiveDateTime) -> Result<Self> {
        let selection = store
            .selection()
            .map_err(|e| e.into_prediction_failure("reading model selection"))?
            .ok_or(GrowthError::NoModelAvailable)?;
        let artifact: ModelArtifact = store
            .load(selection.algorithm.name())
            .map_err(|e| e.into_prediction_failure("loading model"))?
            .ok_or(GrowthError::NoModelAvailable)?;
        if artifact.algorithm() != selection.algorithm {
            return Err(GrowthError::PredictionFailure(format!(
                "stored artifact is {} but selection names {}",
                artifact.algorithm(),
                selection.algorithm
            )));
        }
        debug!(model = %selection.algorithm, "loaded model");
        Ok(Self::new(artifact, now))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.artifact.algorithm()
    }

    /// Forecast one repository `days_ahead` days out.
    pub fn forecast(&self, record: &RepositoryRecord, days_ahead: u32) -> Result<PredictionResult> {
        let built = self.builder.build(record)?;
        let predicted = self
            .artifact
            .predict_one(&built.features)
            .map_err(|e| e.into_prediction_failure("applying model"))?;
        let date = self
            .builder
            .now()
            .date()
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .ok_or_else(|| {
                GrowthError::PredictionFailure(format!("{} days ahead is out of range", days_ahead))
            })?;

        build_prediction(&built.name, built.stargazers_count, predicted, days_ahead, date)
    }
}
