//! Random forest regressor

use growth_spi::{Algorithm, GrowthError, Regressor, Result};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::tree::{check_width, validate, RegressionTree};

/// Bagged ensemble of CART trees.
///
/// Tree `i` is grown on a bootstrap sample drawn with seed `random_state + i`
/// and considers every feature at every split. Predictions are the tree mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: u64,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            n_estimators: n_estimators.max(1),
            max_depth: None,
            random_state: 42,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(100)
    }
}

fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

impl Regressor for RandomForest {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let n_features = validate(x, y)?;

        let mut trees = Vec::with_capacity(self.n_estimators);
        for i in 0..self.n_estimators {
            let seed = self.random_state.wrapping_add(i as u64);
            let rows = bootstrap_sample(x.len(), seed);
            let mut tree = RegressionTree::new().with_max_depth(self.max_depth);
            tree.fit_rows(x, y, rows)?;
            trees.push(tree);
        }

        self.trees = trees;
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(GrowthError::PredictionFailure(
                "random forest is not fitted".to_string(),
            ));
        }
        let n_trees = self.trees.len() as f64;
        x.iter()
            .map(|row| {
                check_width(row, self.n_features)?;
                let mut sum = 0.0;
                for tree in &self.trees {
                    sum += tree.predict_row(row)?;
                }
                Ok(sum / n_trees)
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
        Algorithm::RandomForest
    }
}

/// Mean of per-tree normalized importances, renormalized to sum to 1.
pub(crate) fn average_importances(trees: &[RegressionTree], n_features: usize) -> Vec<f64> {
    let mut total = vec![0.0; n_features];
    for tree in trees {
        for (t, v) in total.iter_mut().zip(tree.feature_importances()) {
            *t += v;
        }
    }
    let n_trees = trees.len() as f64;
    for t in &mut total {
        *t /= n_trees;
    }
    let sum: f64 = total.iter().sum();
    if sum > 0.0 {
        for t in &mut total {
            *t /= sum;
        }
    }
    total
}
