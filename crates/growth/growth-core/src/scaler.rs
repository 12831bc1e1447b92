//! Per-feature standardization

use growth_spi::{GrowthError, Result};
use serde::{Deserialize, Serialize};

/// Zero mean, unit variance scaling per column.
///
/// Uses the population standard deviation. Constant columns keep a scale of 1
/// so they map to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and scales.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| GrowthError::FitError("cannot fit scaler on zero rows".to_string()))?;
        let width = first.len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(GrowthError::FitError(
                "rows have inconsistent widths".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut scale = vec![0.0; width];
        for row in rows {
            for ((s, v), m) in scale.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut scale {
            let std_dev = (*s / n).sqrt();
            *s = if std_dev > 0.0 { std_dev } else { 1.0 };
        }

        Ok(Self { mean, scale })
    }

    /// Number of columns the scaler was fitted on
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Scale a single row.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.width() {
            return Err(GrowthError::InvalidParameter {
                name: "row".to_string(),
                reason: format!("expected {} features, got {}", self.width(), row.len()),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    /// Scale many rows.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}
