//! Ordinary least squares

use growth_spi::{Algorithm, GrowthError, Regressor, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::tree::{check_width, validate};

/// Linear regression with intercept.
///
/// Solved by SVD on centered data, giving the minimum-norm solution when the
/// design matrix is rank deficient (constant or collinear features).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
    fitted: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let n_features = validate(x, y)?;
        let n = x.len();

        let x_mean: Vec<f64> = (0..n_features)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        let xc = DMatrix::from_fn(n, n_features, |i, j| x[i][j] - x_mean[j]);
        let yc = DVector::from_iterator(n, y.iter().map(|v| v - y_mean));

        let svd = xc.svd(true, true);
        let max_singular = svd.singular_values.iter().copied().fold(0.0, f64::max);
        let eps = 1e-10 * max_singular;
        let solution = svd
            .solve(&yc, eps)
            .map_err(|e| GrowthError::FitError(format!("least squares failed: {}", e)))?;

        let coefficients: Vec<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(GrowthError::FitError(
                "least squares produced non-finite coefficients".to_string(),
            ));
        }
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        self.coefficients = coefficients;
        self.intercept = intercept;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(GrowthError::PredictionFailure(
                "linear regression is not fitted".to_string(),
            ));
        }
        x.iter()
            .map(|row| {
                check_width(row, self.coefficients.len())?;
                Ok(self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(v, c)| v * c)
                        .sum::<f64>())
            })
            .collect()
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Absolute coefficient values (not normalized).
    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.fitted
            .then(|| self.coefficients.iter().map(|c| c.abs()).collect())
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::LinearRegression
    }
}
