//! # stargrowth
//!
//! Command-line interface for training growth models on collected GitHub
//! snapshots and printing forecasts, trends and insights as JSON.

use clap::{Parser, Subcommand};
use growth::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "stargrowth")]
#[command(about = "GitHub repository growth forecasting CLI", long_about = None)]
struct Cli {
    /// Directory holding github_top_*.json snapshots
    #[arg(long, global = true, env = "STARGROWTH_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Directory for trained models (default: <data-dir>/models)
    #[arg(long, global = true, env = "STARGROWTH_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train all candidate models on the latest snapshot and keep the best
    Train,

    /// Forecast a single repository from the latest snapshot
    Predict {
        /// Repository name
        name: String,

        /// Forecast horizon in days
        #[arg(short, long, default_value = "30")]
        days: u32,
    },

    /// Repositories with the highest forecast growth
    Top {
        /// Number of repositories to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Language, growth-rate and age trends of the latest snapshot
    Trends,

    /// Train if needed, then print top forecasts and trends
    Insights,
}

struct App {
    predictor: GrowthPredictor<FileModelStore, SystemClock>,
    source: DirectorySnapshotSource,
}

impl App {
    fn new(data_dir: PathBuf, model_dir: Option<PathBuf>) -> Self {
        let model_dir = model_dir.unwrap_or_else(|| data_dir.join("models"));
        tracing::debug!(data_dir = %data_dir.display(), model_dir = %model_dir.display(), "paths");
        Self {
            predictor: GrowthPredictor::new(FileModelStore::new(model_dir), SystemClock),
            source: DirectorySnapshotSource::new(data_dir),
        }
    }

    fn records(&self) -> CliResult<Vec<RepositoryRecord>> {
        self.source.load_latest().map_err(|e| e.to_string())
    }
}

/// Print a value as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn run_train(app: &App) -> CliResult<()> {
    let records = app.records()?;
    let report = app.predictor.train(&records).map_err(|e| e.to_string())?;
    tracing::info!(best_model = %report.best_model, "training finished");
    print_json(&report)
}

fn run_predict(app: &App, name: &str, days: u32) -> CliResult<()> {
    let records = app.records()?;
    let record = records
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| format!("Repository '{}' not found in snapshot", name))?;
    let prediction = app
        .predictor
        .predict_future_growth(record, days)
        .map_err(|e| e.to_string())?;
    print_json(&prediction)
}

fn run_top(app: &App, limit: usize) -> CliResult<()> {
    let records = app.records()?;
    let top = app
        .predictor
        .predict_top_performers(&records, limit)
        .map_err(|e| e.to_string())?;
    print_json(&top)
}

fn run_trends(app: &App) -> CliResult<()> {
    let records = app.records()?;
    let trends = app
        .predictor
        .analyze_trends(&records)
        .map_err(|e| e.to_string())?;
    print_json(&trends)
}

fn run_insights(app: &App) -> CliResult<()> {
    let records = app.records()?;
    let insights = app
        .predictor
        .ml_insights(&records)
        .map_err(|e| e.to_string())?;
    print_json(&insights)
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stargrowth=info,growth_core=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let app = App::new(cli.data_dir, cli.model_dir);

    let result = match cli.command {
        Commands::Train => run_train(&app),
        Commands::Predict { name, days } => run_predict(&app, &name, days),
        Commands::Top { limit } => run_top(&app, limit),
        Commands::Trends => run_trends(&app),
        Commands::Insights => run_insights(&app),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "stargrowth",
            "predict",
            "react",
            "--days",
            "14",
            "--data-dir",
            "/tmp/snapshots",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, PathBuf::from("/tmp/snapshots"));
        match cli.command {
            Commands::Predict { name, days } => {
                assert_eq!(name, "react");
                assert_eq!(days, 14);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_parse_top_default_limit() {
        let cli = Cli::try_parse_from(["stargrowth", "top"]).unwrap();
        assert!(matches!(cli.command, Commands::Top { limit: 10 }));
    }

    #[test]
    fn test_model_dir_defaults_under_data_dir() {
        let app = App::new(PathBuf::from("snapshots"), None);
        assert_eq!(
            app.predictor.store().dir(),
            PathBuf::from("snapshots").join("models").as_path()
        );
        assert_eq!(app.source.dir(), PathBuf::from("snapshots").as_path());
    }
}
