//! Regressors over repository feature rows
//!
//! - [`RegressionTree`] - CART building block
//! - [`RandomForest`] - bagged trees
//! - [`GradientBoosting`] - boosted shallow trees
//! - [`LinearRegression`] - least squares
//! - [`TrainedModel`] - serializable union of the three candidates

mod boosting;
mod forest;
mod linear;
mod tree;

pub use boosting::GradientBoosting;
pub use forest::RandomForest;
pub use linear::LinearRegression;
pub use tree::{RegressionTree, TreeNode};

use growth_api::TrainerConfig;
use growth_spi::{Algorithm, Regressor, Result};
use serde::{Deserialize, Serialize};

/// One of the candidate regressors, tagged by algorithm when serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "model")]
pub enum TrainedModel {
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
    LinearRegression(LinearRegression),
}

impl TrainedModel {
    /// Unfitted candidate configured from `config`.
    pub fn candidate(algorithm: Algorithm, config: &TrainerConfig) -> Self {
        match algorithm {
            Algorithm::RandomForest => TrainedModel::RandomForest(
                RandomForest::new(config.n_estimators)
                    .with_max_depth(config.forest_max_depth)
                    .with_random_state(config.random_state),
            ),
            Algorithm::GradientBoosting => TrainedModel::GradientBoosting(
                GradientBoosting::new()
                    .with_n_estimators(config.n_estimators)
                    .with_learning_rate(config.learning_rate)
                    .with_max_depth(config.boosting_max_depth),
            ),
            Algorithm::LinearRegression => {
                TrainedModel::LinearRegression(LinearRegression::new())
            }
        }
    }

    fn as_regressor(&self) -> &dyn Regressor {
        match self {
            TrainedModel::RandomForest(m) => m,
            TrainedModel::GradientBoosting(m) => m,
            TrainedModel::LinearRegression(m) => m,
        }
    }

    fn as_regressor_mut(&mut self) -> &mut dyn Regressor {
        match self {
            TrainedModel::RandomForest(m) => m,
            TrainedModel::GradientBoosting(m) => m,
            TrainedModel::LinearRegression(m) => m,
        }
    }
}

impl Regressor for TrainedModel {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        self.as_regressor_mut().fit(x, y)
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.as_regressor().predict(x)
    }

    fn is_fitted(&self) -> bool {
        self.as_regressor().is_fitted()
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.as_regressor().feature_importances()
    }

    fn algorithm(&self) -> Algorithm {
        self.as_regressor().algorithm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_match_algorithm() {
        let config = TrainerConfig::default().n_estimators(5);
        for algorithm in Algorithm::ALL {
            let model = TrainedModel::candidate(algorithm, &config);
            assert_eq!(model.algorithm(), algorithm);
            assert!(!model.is_fitted());
        }
    }

    #[test]
    fn test_trained_model_serde_keeps_predictions() {
        let x: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64 * 0.37, 1.0 / (i + 1) as f64]).collect();
        let y: Vec<f64> = x.iter().map(|r| r[0] * 3.1 + r[1]).collect();
        let config = TrainerConfig::default().n_estimators(5);

        for algorithm in Algorithm::ALL {
            let mut model = TrainedModel::candidate(algorithm, &config);
            model.fit(&x, &y).unwrap();

            let json = serde_json::to_string(&model).unwrap();
            assert!(json.contains(algorithm.name()));
            let back: TrainedModel = serde_json::from_str(&json).unwrap();

            assert_eq!(back.predict(&x).unwrap(), model.predict(&x).unwrap());
        }
    }
}
