//! Seeded train/test split

use growth_spi::{GrowthError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices on each side of a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(test_ratio * n)` rows.
///
/// Both sides always get at least one row.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> Result<SplitIndices> {
    if n < 2 {
        return Err(GrowthError::InsufficientData {
            required: 2,
            actual: n,
        });
    }
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(GrowthError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: format!("must be in (0, 1), got {}", test_ratio),
        });
    }

    let n_test = ((test_ratio * n as f64).ceil() as usize).clamp(1, n - 1);
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: indices,
    })
}
