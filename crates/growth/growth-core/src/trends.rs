//! Trend analysis over a batch of repositories

use std::collections::HashMap;

use growth_spi::{
    GrowthError, LanguageShare, RepositoryFeatures, Result, TopPerformer, TrendSummary,
};
use tracing::debug;

use crate::metrics::{mean, median, pearson, quantile};

const TOP_LANGUAGES: usize = 10;
const TOP_PERFORMERS: usize = 5;
const HIGH_GROWTH_MEAN: f64 = 10.0;
const LOW_GROWTH_MEAN: f64 = 5.0;
const YOUNG_AGE_DAYS: i64 = 365;
const YOUNG_SHARE: f64 = 0.3;

/// Summarizes growth-rate distribution, languages and age effects.
///
/// Quartiles come from the batch itself, so "high" and "low" growth are
/// relative to the other repositories analyzed together.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, repositories: &[RepositoryFeatures]) -> Result<TrendSummary> {
        if repositories.is_empty() {
            return Err(GrowthError::EmptyInput(
                "no repositories to analyze".to_string(),
            ));
        }

        let growth: Vec<f64> = repositories
            .iter()
            .map(|r| r.features.growth_rate)
            .collect();
        let ages: Vec<f64> = repositories
            .iter()
            .map(|r| r.features.days_since_creation as f64)
            .collect();

        let q75 = quantile(&growth, 0.75);
        let q25 = quantile(&growth, 0.25);
        let mut high: Vec<&RepositoryFeatures> = repositories
            .iter()
            .filter(|r| r.features.growth_rate > q75)
            .collect();
        let low_growth_repos = growth.iter().filter(|&&g| g < q25).count();

        high.sort_by(|a, b| b.features.growth_rate.total_cmp(&a.features.growth_rate));
        let top_performers = high
            .iter()
            .take(TOP_PERFORMERS)
            .map(|r| TopPerformer {
                name: r.name.clone(),
                stargazers_count: r.stargazers_count,
                growth_rate: r.features.growth_rate,
            })
            .collect();

        let avg_growth_rate = mean(&growth);
        let young = repositories
            .iter()
            .filter(|r| r.features.days_since_creation < YOUNG_AGE_DAYS)
            .count();

        let language_distribution = language_distribution(repositories);
        let insights = insights(
            language_distribution.first().map(|s| s.language.as_str()),
            avg_growth_rate,
            young,
            repositories.len(),
        );

        debug!(
            repositories = repositories.len(),
            high = high.len(),
            low = low_growth_repos,
            "trends analyzed"
        );

        Ok(TrendSummary {
            language_distribution,
            high_growth_repos: high.len(),
            low_growth_repos,
            avg_growth_rate,
            median_growth_rate: median(&growth),
            age_growth_correlation: pearson(&ages, &growth),
            top_performers,
            insights,
        })
    }
}

/// Language counts, most common first; ties keep first-seen order.
fn language_distribution(repositories: &[RepositoryFeatures]) -> Vec<LanguageShare> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for lang in repositories.iter().filter_map(|r| r.language.as_deref()) {
        let count = counts.entry(lang).or_insert(0);
        if *count == 0 {
            order.push(lang);
        }
        *count += 1;
    }

    let mut shares: Vec<LanguageShare> = order
        .into_iter()
        .map(|lang| LanguageShare {
            language: lang.to_string(),
            count: counts.get(lang).copied().unwrap_or(0),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares.truncate(TOP_LANGUAGES);
    shares
}

fn insights(top_language: Option<&str>, avg_growth: f64, young: usize, total: usize) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(lang) = top_language {
        insights.push(format!(
            "🔥 {} repositories dominate with highest growth potential",
            lang
        ));
    }

    if avg_growth > HIGH_GROWTH_MEAN {
        insights.push(
            "📈 High growth environment - excellent opportunities for new projects".to_string(),
        );
    } else if avg_growth < LOW_GROWTH_MEAN {
        insights.push("📊 Mature ecosystem - focus on quality over quantity".to_string());
    }

    if young as f64 > YOUNG_SHARE * total as f64 {
        insights.push("🌱 Young ecosystem - great time for early adoption".to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_spi::FeatureVector;

    fn repo(name: &str, language: Option<&str>, days: i64, growth_rate: f64) -> RepositoryFeatures {
        RepositoryFeatures {
            name: name.to_string(),
            stargazers_count: (growth_rate * (days as f64 + 1.0)) as u64,
            language: language.map(str::to_string),
            features: FeatureVector {
                days_since_creation: days,
                stars_per_day: growth_rate,
                growth_rate,
                language_encoded: 11,
                has_description: 0,
                description_length: 0,
            },
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            TrendAnalyzer::new().analyze(&[]),
            Err(GrowthError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_two_repositories() {
        let repos = vec![
            repo("slow", Some("Go"), 1000, 2.0),
            repo("fast", Some("Rust"), 2000, 8.0),
        ];
        let summary = TrendAnalyzer::new().analyze(&repos).unwrap();

        assert_eq!(summary.high_growth_repos, 1);
        assert_eq!(summary.low_growth_repos, 1);
        assert_eq!(summary.avg_growth_rate, 5.0);
        assert_eq!(summary.median_growth_rate, 5.0);
        assert!((summary.age_growth_correlation.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(summary.top_performers.len(), 1);
        assert_eq!(summary.top_performers[0].name, "fast");
    }

    #[test]
    fn test_single_repository() {
        let summary = TrendAnalyzer::new()
            .analyze(&[repo("solo", None, 10, 3.0)])
            .unwrap();

        assert_eq!(summary.high_growth_repos, 0);
        assert_eq!(summary.low_growth_repos, 0);
        assert!(summary.age_growth_correlation.is_none());
        assert!(summary.language_distribution.is_empty());
        assert_eq!(
            summary.insights,
            vec![
                "📊 Mature ecosystem - focus on quality over quantity".to_string(),
                "🌱 Young ecosystem - great time for early adoption".to_string(),
            ]
        );
    }

    #[test]
    fn test_language_distribution_order() {
        let repos = vec![
            repo("a", Some("Python"), 400, 1.0),
            repo("b", Some("Rust"), 400, 1.0),
            repo("c", Some("Rust"), 400, 1.0),
            repo("d", None, 400, 1.0),
            repo("e", Some("Go"), 400, 1.0),
            repo("f", Some("Python"), 400, 1.0),
        ];
        let summary = TrendAnalyzer::new().analyze(&repos).unwrap();
        let languages: Vec<(&str, usize)> = summary
            .language_distribution
            .iter()
            .map(|s| (s.language.as_str(), s.count))
            .collect();

        assert_eq!(languages, vec![("Python", 2), ("Rust", 2), ("Go", 1)]);
        assert_eq!(summary.top_language(), Some("Python"));
        assert_eq!(
            summary.insights[0],
            "🔥 Python repositories dominate with highest growth potential"
        );
    }

    #[test]
    fn test_language_distribution_keeps_top_ten() {
        let repos: Vec<RepositoryFeatures> = (0..15)
            .map(|i| repo(&format!("r{}", i), Some(format!("Lang{}", i).as_str()), 400, 1.0))
            .collect();
        let summary = TrendAnalyzer::new().analyze(&repos).unwrap();
        assert_eq!(summary.language_distribution.len(), 10);
        assert_eq!(summary.language_distribution[0].language, "Lang0");
    }

    #[test]
    fn test_high_growth_insight_and_top_performers() {
        let repos: Vec<RepositoryFeatures> = (1..=20)
            .map(|i| repo(&format!("r{}", i), Some("Rust"), 500, i as f64 * 2.0))
            .collect();
        let summary = TrendAnalyzer::new().analyze(&repos).unwrap();

        assert_eq!(summary.high_growth_repos, 5);
        assert_eq!(summary.low_growth_repos, 5);
        let names: Vec<&str> = summary.top_performers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["r20", "r19", "r18", "r17", "r16"]);
        assert!(summary
            .insights
            .contains(&"📈 High growth environment - excellent opportunities for new projects".to_string()));
        assert!(!summary.insights.iter().any(|s| s.starts_with("🌱")));
        assert!(summary.age_growth_correlation.is_none());
    }

    #[test]
    fn test_middle_growth_has_no_growth_insight() {
        let repos = vec![
            repo("a", None, 800, 6.0),
            repo("b", None, 900, 8.0),
        ];
        let summary = TrendAnalyzer::new().analyze(&repos).unwrap();
        assert!(summary.insights.is_empty());
    }
}
