//! Regressor trait.

use crate::error::Result;
use crate::model::Algorithm;

/// A supervised regressor over dense feature rows.
pub trait Regressor {
    /// Fit the model to rows `x` and targets `y`.
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict one value per row.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;

    /// Per-feature importances, if the model can provide them.
    fn feature_importances(&self) -> Option<Vec<f64>>;

    /// The family this regressor belongs to.
    fn algorithm(&self) -> Algorithm;
}
