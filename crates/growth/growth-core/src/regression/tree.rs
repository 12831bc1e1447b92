//! CART regression tree
//!
//! Nodes live in a flat arena and are built with an explicit work stack, so
//! deep trees neither recurse on the call stack nor nest in the serialized form.

use growth_spi::{GrowthError, Result};
use serde::{Deserialize, Serialize};

/// One node of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Squared-error regression tree.
///
/// Rows with `x[feature] <= threshold` go left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    max_depth: Option<usize>,
    min_samples_split: usize,
    nodes: Vec<TreeNode>,
    n_features: usize,
    /// Total squared-error reduction credited to each feature
    impurity_decrease: Vec<f64>,
}

struct Pending {
    node: usize,
    rows: Vec<usize>,
    depth: usize,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl RegressionTree {
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            nodes: Vec::new(),
            n_features: 0,
            impurity_decrease: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest leaf (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split { left, right, .. }) => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
                Some(TreeNode::Leaf { .. }) => max = max.max(depth),
                None => {}
            }
        }
        max
    }

    /// Fit on all rows.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let rows: Vec<usize> = (0..x.len()).collect();
        self.fit_rows(x, y, rows)
    }

    /// Fit on the given row indices (duplicates allowed, as in a bootstrap sample).
    pub fn fit_rows(&mut self, x: &[Vec<f64>], y: &[f64], rows: Vec<usize>) -> Result<()> {
        let n_features = validate(x, y)?;
        if rows.is_empty() {
            return Err(GrowthError::FitError(
                "cannot fit tree on zero rows".to_string(),
            ));
        }
        if rows.iter().any(|&r| r >= x.len()) {
            return Err(GrowthError::FitError("row index out of range".to_string()));
        }

        self.n_features = n_features;
        self.nodes = vec![TreeNode::Leaf { value: 0.0 }];
        self.impurity_decrease = vec![0.0; n_features];

        let mut stack = vec![Pending {
            node: 0,
            rows,
            depth: 0,
        }];

        while let Some(Pending { node, rows, depth }) = stack.pop() {
            let value = mean_of(y, &rows);
            self.nodes[node] = TreeNode::Leaf { value };

            let at_max_depth = self.max_depth.is_some_and(|max| depth >= max);
            if at_max_depth || rows.len() < self.min_samples_split {
                continue;
            }

            let Some(best) = best_split(x, y, &rows, n_features) else {
                continue;
            };

            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .copied()
                .partition(|&r| x[r][best.feature] <= best.threshold);
            if left_rows.is_empty() || right_rows.is_empty() {
                continue;
            }

            let left = self.nodes.len();
            let right = left + 1;
            self.nodes.push(TreeNode::Leaf { value: 0.0 });
            self.nodes.push(TreeNode::Leaf { value: 0.0 });
            self.nodes[node] = TreeNode::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };
            self.impurity_decrease[best.feature] += best.gain;

            stack.push(Pending {
                node: right,
                rows: right_rows,
                depth: depth + 1,
            });
            stack.push(Pending {
                node: left,
                rows: left_rows,
                depth: depth + 1,
            });
        }

        Ok(())
    }

    /// Predict a single row.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if !self.is_fitted() {
            return Err(GrowthError::PredictionFailure(
                "tree is not fitted".to_string(),
            ));
        }
        check_width(row, self.n_features)?;

        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => {
                    return Err(GrowthError::PredictionFailure(format!(
                        "tree node {} out of range",
                        idx
                    )))
                }
            }
        }
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Impurity-decrease importances normalized to sum to 1.
    ///
    /// All zeros when the tree is a single leaf.
    pub fn feature_importances(&self) -> Vec<f64> {
        let total: f64 = self.impurity_decrease.iter().sum();
        if total > 0.0 {
            self.impurity_decrease.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; self.n_features]
        }
    }
}

impl Default for RegressionTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Check shapes and finiteness, returning the feature count.
pub(crate) fn validate(x: &[Vec<f64>], y: &[f64]) -> Result<usize> {
    let first = x
        .first()
        .ok_or_else(|| GrowthError::FitError("cannot fit with zero samples".to_string()))?;
    if x.len() != y.len() {
        return Err(GrowthError::FitError(format!(
            "number of rows ({}) and targets ({}) must match",
            x.len(),
            y.len()
        )));
    }
    let width = first.len();
    if width == 0 {
        return Err(GrowthError::FitError("rows have no features".to_string()));
    }
    if x.iter().any(|r| r.len() != width) {
        return Err(GrowthError::FitError(
            "rows have inconsistent widths".to_string(),
        ));
    }
    if x.iter().flatten().chain(y).any(|v| !v.is_finite()) {
        return Err(GrowthError::FitError(
            "input contains non-finite values".to_string(),
        ));
    }
    Ok(width)
}

pub(crate) fn check_width(row: &[f64], expected: usize) -> Result<()> {
    if row.len() != expected {
        return Err(GrowthError::PredictionFailure(format!(
            "expected {} features, got {}",
            expected,
            row.len()
        )));
    }
    Ok(())
}

fn mean_of(y: &[f64], rows: &[usize]) -> f64 {
    rows.iter().map(|&r| y[r]).sum::<f64>() / rows.len() as f64
}

/// Exhaustive search over features and midpoints between distinct values.
///
/// Gain is the reduction in summed squared error, computed from prefix sums:
/// `sum_l^2 / n_l + sum_r^2 / n_r - sum^2 / n`.
fn best_split(x: &[Vec<f64>], y: &[f64], rows: &[usize], n_features: usize) -> Option<BestSplit> {
    let n = rows.len();
    let total: f64 = rows.iter().map(|&r| y[r]).sum();
    let mean = total / n as f64;
    let parent_sse: f64 = rows.iter().map(|&r| (y[r] - mean).powi(2)).sum();
    let sum_sq: f64 = rows.iter().map(|&r| y[r] * y[r]).sum();
    // gains below this are rounding noise from the prefix sums
    let min_gain = 1e-12 * sum_sq;
    if parent_sse <= min_gain {
        return None;
    }
    let parent_score = total * mean;

    let mut best: Option<BestSplit> = None;
    let mut order = rows.to_vec();

    for feature in 0..n_features {
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0;
        for k in 1..n {
            left_sum += y[order[k - 1]];
            let lo = x[order[k - 1]][feature];
            let hi = x[order[k]][feature];
            if lo >= hi {
                continue;
            }

            let n_left = k as f64;
            let n_right = (n - k) as f64;
            let right_sum = total - left_sum;
            let gain =
                left_sum * left_sum / n_left + right_sum * right_sum / n_right - parent_score;

            if gain > min_gain && best.as_ref().map_or(true, |b| gain > b.gain) {
                let mid = lo + (hi - lo) / 2.0;
                let threshold = if mid < hi { mid } else { lo };
                best = Some(BestSplit {
                    feature,
                    threshold,
                    gain,
                });
            }
        }
    }

    best
}
