//! Derived feature types.

use serde::{Deserialize, Serialize};

/// Number of features fed to a regressor.
pub const FEATURE_COUNT: usize = 6;

/// Feature names, in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "days_since_creation",
    "stars_per_day",
    "growth_rate",
    "language_encoded",
    "has_description",
    "description_length",
];

/// Six numeric features derived from a repository record.
///
/// `growth_rate` and `stars_per_day` are computed from the star count that
/// training also uses as its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Whole days since creation, never below 1
    pub days_since_creation: i64,
    /// Stars divided by `days_since_creation`
    pub stars_per_day: f64,
    /// Stars divided by `days_since_creation + 1`
    pub growth_rate: f64,
    /// Language code, 1..=10 for known languages, 11 otherwise
    pub language_encoded: u8,
    /// 1 when a description is present
    pub has_description: u8,
    /// Description length in characters
    pub description_length: usize,
}

impl FeatureVector {
    /// Features as a model input row, ordered as [`FEATURE_NAMES`].
    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.days_since_creation as f64,
            self.stars_per_day,
            self.growth_rate,
            f64::from(self.language_encoded),
            f64::from(self.has_description),
            self.description_length as f64,
        ]
    }
}

/// A repository's identity and target alongside its features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFeatures {
    /// Repository name
    pub name: String,
    /// Current star count (the training target)
    pub stargazers_count: u64,
    /// Primary language as reported by the snapshot
    pub language: Option<String>,
    /// Derived features
    pub features: FeatureVector,
}
