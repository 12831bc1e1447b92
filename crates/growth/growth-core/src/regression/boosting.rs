//! Gradient boosting regressor

use growth_spi::{Algorithm, GrowthError, Regressor, Result};
use serde::{Deserialize, Serialize};

use super::forest::average_importances;
use super::tree::{check_width, validate, RegressionTree};

/// Least-squares gradient boosting over shallow CART trees.
///
/// Starts from the target mean; each stage fits a tree to the current residuals
/// and adds it scaled by the learning rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: usize,
    init: f64,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl GradientBoosting {
    pub fn new() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            init: 0.0,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators.max(1);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        let mut value = self.init;
        for tree in &self.trees {
            value += self.learning_rate * tree.predict_row(row)?;
        }
        Ok(value)
    }
}

impl Default for GradientBoosting {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for GradientBoosting {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let n_features = validate(x, y)?;
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(GrowthError::InvalidParameter {
                name: "learning_rate".to_string(),
                reason: format!("must be positive, got {}", self.learning_rate),
            });
        }

        let init = y.iter().sum::<f64>() / y.len() as f64;
        let mut current = vec![init; y.len()];
        let mut trees = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let residuals: Vec<f64> = y.iter().zip(&current).map(|(t, p)| t - p).collect();
            let mut tree = RegressionTree::new().with_max_depth(Some(self.max_depth));
            tree.fit(x, &residuals)?;
            for (c, row) in current.iter_mut().zip(x) {
                *c += self.learning_rate * tree.predict_row(row)?;
            }
            trees.push(tree);
        }

        self.init = init;
        self.trees = trees;
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(GrowthError::PredictionFailure(
                "gradient boosting is not fitted".to_string(),
            ));
        }
        x.iter()
            .map(|row| {
                check_width(row, self.n_features)?;
                self.predict_row(row)
            })
            .collect()
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        if self.trees.is_empty() {
            return None;
        }
        Some(average_importances(&self.trees, self.n_features))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::GradientBoosting
    }
}
