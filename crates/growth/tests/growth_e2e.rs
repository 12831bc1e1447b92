//! End-to-end tests for the growth crate
//!
//! Tests complete workflows from a snapshot directory to forecasts and insights.

use chrono::NaiveDate;
use growth::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )
}

fn write_snapshot(dir: &std::path::Path) {
    let languages = [
        json!("JavaScript"),
        json!("Python"),
        json!("TypeScript"),
        json!("Rust"),
        json!(null),
    ];
    let items: Vec<serde_json::Value> = (0..35)
        .map(|i| {
            json!({
                "id": 1000 + i,
                "name": format!("repo-{}", i),
                "full_name": format!("org/repo-{}", i),
                "stargazers_count": 10_000 + (i * 3_571) % 150_000,
                "created_at": format!("{}-{:02}-10T08:00:00Z", 2009 + i % 16, 1 + i % 12),
                "language": languages[i % languages.len()].clone(),
                "description": if i % 4 == 0 { json!(null) } else { json!(format!("Project number {}", i)) },
            })
        })
        .collect();
    let response = json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items,
    });

    std::fs::write(
        dir.join("github_top_20250101_000000.json"),
        r#"{"items": [{"name": "stale", "stargazers_count": 1, "created_at": "2020-01-01"}]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("github_top_20250907_124243.json"),
        serde_json::to_string_pretty(&response).unwrap(),
    )
    .unwrap();
}

fn config() -> PredictorConfig {
    PredictorConfig::default().with_trainer(TrainerConfig::default().n_estimators(20))
}

#[test]
fn e2e_snapshot_train_forecast_workflow() {
    let data = TempDir::new().unwrap();
    write_snapshot(data.path());
    let records = DirectorySnapshotSource::new(data.path()).load_latest().unwrap();
    assert_eq!(records.len(), 35);

    let model_dir = data.path().join("models");
    let predictor =
        GrowthPredictor::new(FileModelStore::new(&model_dir), clock()).with_config(config());
    let report = predictor.train(&records).unwrap();

    assert_eq!(report.results.len(), 3);
    assert!(model_dir.join("selection.json").exists());
    assert!(model_dir.join(format!("{}.json", report.best_model)).exists());

    let importance_sum: f64 = report.feature_importance.iter().map(|f| f.importance).sum();
    if report.best_model != Algorithm::LinearRegression {
        assert!((importance_sum - 1.0).abs() < 1e-9);
    }

    let forecast = predictor.predict_future_growth(&records[0], 30).unwrap();
    assert_eq!(forecast.repository, "repo-0");
    assert_eq!(forecast.prediction_date, "2026-03-03");
    if forecast.predicted_stars > 0 {
        assert!(forecast.confidence_interval.lower <= forecast.predicted_stars);
        assert!(forecast.predicted_stars <= forecast.confidence_interval.upper);
    }

    // a fresh process sees the same model through the same directory
    let reopened =
        GrowthPredictor::new(FileModelStore::new(&model_dir), clock()).with_config(config());
    assert_eq!(
        reopened.predict_future_growth(&records[0], 30).unwrap(),
        forecast
    );
}

#[test]
fn e2e_ml_insights_workflow() {
    let data = TempDir::new().unwrap();
    write_snapshot(data.path());
    let records = DirectorySnapshotSource::new(data.path()).load_latest().unwrap();

    let predictor = GrowthPredictor::new(MemoryModelStore::new(), clock()).with_config(config());
    let insights = predictor.ml_insights(&records).unwrap();

    let training = insights.training_results.as_ref().unwrap();
    assert_eq!(training.results.len(), 3);
    assert_eq!(insights.top_predictions.len(), 10);
    assert_eq!(insights.timestamp, "2026-02-01T08:00:00");

    let trends = &insights.trends;
    let counted: usize = trends.language_distribution.iter().map(|s| s.count).sum();
    assert_eq!(counted, 28);
    assert!(trends.top_performers.len() <= 5);
    assert!(trends.insights[0].starts_with("🔥 "));

    let json = serde_json::to_value(&insights).unwrap();
    assert!(json["top_predictions"][0].get("predicted_stars_30d").is_some());
    assert!(json["trends"]["insights"].is_array());
}

#[test]
fn e2e_trends_without_model() {
    let data = TempDir::new().unwrap();
    write_snapshot(data.path());
    let records = DirectorySnapshotSource::new(data.path()).load_latest().unwrap();

    let predictor = GrowthPredictor::new(MemoryModelStore::new(), clock());
    let trends = predictor.analyze_trends(&records).unwrap();

    assert!(trends.high_growth_repos > 0);
    assert!(trends.low_growth_repos > 0);
    assert_eq!(trends.top_language(), Some("JavaScript"));
    assert!(trends.age_growth_correlation.is_some());
    assert!(!predictor.has_model().unwrap());
}

#[test]
fn e2e_empty_data_directory() {
    let data = TempDir::new().unwrap();
    let result = DirectorySnapshotSource::new(data.path()).load_latest();
    assert!(matches!(result, Err(GrowthError::EmptyInput(_))));
}
