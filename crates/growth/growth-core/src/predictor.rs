//! Growth predictor orchestration

use growth_api::PredictorConfig;
use growth_spi::{
    Clock, GrowthError, MlInsights, ModelStore, PredictionResult, RepositoryFeatures,
    RepositoryRecord, Result, TrainingReport, TrendSummary,
};
use tracing::{info, warn};

use crate::features::FeatureBuilder;
use crate::forecaster::Forecaster;
use crate::trainer::ModelTrainer;
use crate::trends::TrendAnalyzer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Entry point for training, forecasting and trend analysis.
///
/// Holds no model in memory: every forecast reads the selected model back from
/// the injected store, so several predictors can share one store.
///
/// # Example
///
/// ```ignore
/// use growth_core::{GrowthPredictor, MemoryModelStore, SystemClock};
///
/// let predictor = GrowthPredictor::new(MemoryModelStore::new(), SystemClock);
/// predictor.train(&records)?;
/// let forecast = predictor.predict_future_growth(&records[0], 30)?;
/// ```
#[derive(Debug, Clone)]
pub struct GrowthPredictor<S, C> {
    store: S,
    clock: C,
    config: PredictorConfig,
}

impl<S: ModelStore, C: Clock> GrowthPredictor<S, C> {
    /// Create a predictor with default configuration
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            config: PredictorConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: PredictorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn features(&self, records: &[RepositoryRecord]) -> Result<Vec<RepositoryFeatures>> {
        if records.is_empty() {
            return Err(GrowthError::EmptyInput("no repositories given".to_string()));
        }
        let features = FeatureBuilder::new(self.clock.now()).build_all(records);
        if features.is_empty() {
            return Err(GrowthError::EmptyInput(format!(
                "none of {} repositories are well-formed",
                records.len()
            )));
        }
        Ok(features)
    }

    fn timestamp(&self) -> String {
        self.clock.now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Train all candidates on `records`, persist the best and report.
    pub fn train(&self, records: &[RepositoryRecord]) -> Result<TrainingReport> {
        let features = self.features(records)?;
        info!(repositories = features.len(), "training models");
        ModelTrainer::new(self.config.trainer.clone()).train_and_persist(
            &features,
            &self.store,
            self.timestamp(),
        )
    }

    /// Whether a selected model is available in the store.
    pub fn has_model(&self) -> Result<bool> {
        Ok(self.store.selection()?.is_some())
    }

    /// Forecast one repository `days_ahead` days out.
    pub fn predict_future_growth(
        &self,
        record: &RepositoryRecord,
        days_ahead: u32,
    ) -> Result<PredictionResult> {
        Forecaster::load(&self.store, self.clock.now())?.forecast(record, days_ahead)
    }

    /// Forecast one repository with the configured default horizon.
    pub fn predict(&self, record: &RepositoryRecord) -> Result<PredictionResult> {
        self.predict_future_growth(record, self.config.forecast.days_ahead)
    }

    /// Forecast every record and return the `top_n` with the highest growth percent.
    ///
    /// Records that cannot be forecast are skipped.
    pub fn predict_top_performers(
        &self,
        records: &[RepositoryRecord],
        top_n: usize,
    ) -> Result<Vec<PredictionResult>> {
        let forecaster = Forecaster::load(&self.store, self.clock.now())?;
        let days_ahead = self.config.forecast.days_ahead;

        let mut predictions: Vec<PredictionResult> = records
            .iter()
            .filter_map(|record| match forecaster.forecast(record, days_ahead) {
                Ok(prediction) => Some(prediction),
                Err(e) => {
                    warn!(repository = %record.name, error = %e, "skipping forecast");
                    None
                }
            })
            .collect();

        predictions.sort_by(|a, b| b.growth_rate_percent.total_cmp(&a.growth_rate_percent));
        predictions.truncate(top_n);
        Ok(predictions)
    }

    /// [`predict_top_performers`](Self::predict_top_performers) with the configured count.
    pub fn top_performers(&self, records: &[RepositoryRecord]) -> Result<Vec<PredictionResult>> {
        self.predict_top_performers(records, self.config.forecast.top_n)
    }

    /// Summarize growth trends across `records`.
    pub fn analyze_trends(&self, records: &[RepositoryRecord]) -> Result<TrendSummary> {
        let features = self.features(records)?;
        TrendAnalyzer::new().analyze(&features)
    }

    /// Train if no model exists yet, then gather top forecasts and trends.
    pub fn ml_insights(&self, records: &[RepositoryRecord]) -> Result<MlInsights> {
        let training_results = if self.has_model()? {
            None
        } else {
            Some(self.train(records)?)
        };

        Ok(MlInsights {
            training_results,
            top_predictions: self.top_performers(records)?,
            trends: self.analyze_trends(records)?,
            timestamp: self.timestamp(),
        })
    }
}
