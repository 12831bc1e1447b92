//! Batch trend statistics.

use serde::{Deserialize, Serialize};

/// Number of repositories using a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
}

/// A high-growth repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub name: String,
    pub stargazers_count: u64,
    pub growth_rate: f64,
}

/// Distributional statistics over a batch of repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Up to ten most frequent languages, most frequent first
    pub language_distribution: Vec<LanguageShare>,
    /// Repositories strictly above the batch's 75th growth-rate percentile
    pub high_growth_repos: usize,
    /// Repositories strictly below the batch's 25th growth-rate percentile
    pub low_growth_repos: usize,
    /// Mean growth rate
    pub avg_growth_rate: f64,
    /// Median growth rate
    pub median_growth_rate: f64,
    /// Pearson correlation between age and growth rate, `None` when undefined
    pub age_growth_correlation: Option<f64>,
    /// Up to five high-growth repositories, fastest first
    pub top_performers: Vec<TopPerformer>,
    /// Templated insight sentences, in rule order
    pub insights: Vec<String>,
}

impl TrendSummary {
    /// Most frequent language, if any repository reported one.
    pub fn top_language(&self) -> Option<&str> {
        self.language_distribution
            .first()
            .map(|share| share.language.as_str())
    }
}
