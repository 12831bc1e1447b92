//! Model training and held-out selection

use growth_api::TrainerConfig;
use growth_spi::{
    Algorithm, FeatureImportance, GrowthError, ModelEvaluation, ModelMetadata, ModelStore,
    Regressor, RepositoryFeatures, Result, TrainingReport, FEATURE_NAMES,
};
use tracing::{debug, info, warn};

use crate::artifact::ModelArtifact;
use crate::metrics::{mae, mse, r_squared};
use crate::regression::TrainedModel;
use crate::scaler::StandardScaler;
use crate::split::train_test_split;

/// Fits every candidate algorithm and keeps the one with the best held-out R²
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    config: TrainerConfig,
}

struct Candidate {
    model: TrainedModel,
    evaluation: ModelEvaluation,
}

impl ModelTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train all candidates and return the report with the selected artifact.
    ///
    /// The target is the current star count. Candidates that fail to fit are
    /// logged and skipped.
    pub fn train(
        &self,
        repositories: &[RepositoryFeatures],
    ) -> Result<(TrainingReport, ModelArtifact)> {
        if repositories.is_empty() {
            return Err(GrowthError::EmptyInput(
                "no repositories to train on".to_string(),
            ));
        }

        let rows: Vec<Vec<f64>> = repositories.iter().map(|r| r.features.to_row()).collect();
        let target: Vec<f64> = repositories
            .iter()
            .map(|r| r.stargazers_count as f64)
            .collect();

        let split = train_test_split(rows.len(), self.config.test_ratio, self.config.random_state)?;
        let train_rows: Vec<Vec<f64>> = split.train.iter().map(|&i| rows[i].clone()).collect();
        let train_y: Vec<f64> = split.train.iter().map(|&i| target[i]).collect();
        let test_rows: Vec<Vec<f64>> = split.test.iter().map(|&i| rows[i].clone()).collect();
        let test_y: Vec<f64> = split.test.iter().map(|&i| target[i]).collect();

        let scaler = StandardScaler::fit(&train_rows)?;
        let train_x = scaler.transform(&train_rows)?;
        let test_x = scaler.transform(&test_rows)?;

        let mut candidates = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            match self.evaluate(algorithm, &train_x, &train_y, &test_x, &test_y) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => warn!(%algorithm, error = %e, "candidate failed"),
            }
        }

        let best = select_best(&candidates).ok_or_else(|| {
            GrowthError::FitError("no candidate model could be fitted".to_string())
        })?;
        let best_model = candidates[best].model.clone();
        let best_algorithm = best_model.algorithm();

        let feature_importance = best_model
            .feature_importances()
            .map(|values| {
                FEATURE_NAMES
                    .iter()
                    .zip(values)
                    .map(|(name, importance)| FeatureImportance {
                        feature: (*name).to_string(),
                        importance,
                    })
                    .collect()
            })
            .unwrap_or_default();

        info!(
            best_model = %best_algorithm,
            r2 = candidates[best].evaluation.r2,
            train = split.train.len(),
            test = split.test.len(),
            "model selected"
        );

        let report = TrainingReport {
            best_model: best_algorithm,
            results: candidates.into_iter().map(|c| c.evaluation).collect(),
            feature_importance,
        };
        Ok((report, ModelArtifact::new(scaler, best_model)))
    }

    /// Train, then persist the selected artifact and its selection record.
    pub fn train_and_persist<S: ModelStore>(
        &self,
        repositories: &[RepositoryFeatures],
        store: &S,
        trained_at: String,
    ) -> Result<TrainingReport> {
        let (report, artifact) = self.train(repositories)?;
        let algorithm = artifact.algorithm();
        store.save(algorithm.name(), &artifact)?;

        let evaluation = report.best();
        let metadata = ModelMetadata {
            algorithm,
            r2: evaluation.and_then(|e| finite(e.r2)),
            mae: evaluation.and_then(|e| finite(e.mae)),
            mse: evaluation.and_then(|e| finite(e.mse)),
            trained_at,
        };
        store.save_selection(&metadata)?;
        info!(model = %algorithm, "model persisted");

        Ok(report)
    }

    fn evaluate(
        &self,
        algorithm: Algorithm,
        train_x: &[Vec<f64>],
        train_y: &[f64],
        test_x: &[Vec<f64>],
        test_y: &[f64],
    ) -> Result<Candidate> {
        let mut model = TrainedModel::candidate(algorithm, &self.config);
        model.fit(train_x, train_y)?;
        let predictions = model.predict(test_x)?;

        let evaluation = ModelEvaluation {
            algorithm,
            mae: mae(test_y, &predictions),
            mse: mse(test_y, &predictions),
            r2: r_squared(test_y, &predictions),
            predictions: predictions
                .iter()
                .take(self.config.sample_size)
                .copied()
                .collect(),
            actual: test_y.iter().take(self.config.sample_size).copied().collect(),
        };
        debug!(
            %algorithm,
            mae = evaluation.mae,
            mse = evaluation.mse,
            r2 = evaluation.r2,
            "candidate evaluated"
        );

        Ok(Candidate { model, evaluation })
    }
}

/// Highest R² wins; non-finite scores rank last and ties keep the earlier candidate.
fn select_best(candidates: &[Candidate]) -> Option<usize> {
    let score = |c: &Candidate| {
        if c.evaluation.r2.is_finite() {
            c.evaluation.r2
        } else {
            f64::NEG_INFINITY
        }
    };

    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        match best {
            Some(b) if score(candidate) <= score(&candidates[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
