//! Growth Facade
//!
//! High-level API for repository growth prediction. Re-exports all public
//! types from the growth stack for convenient usage.
//!
//! # Example
//!
//! ```ignore
//! use growth_facade::prelude::*;
//!
//! let predictor = GrowthPredictor::new(FileModelStore::new("data/models"), SystemClock);
//! let records = DirectorySnapshotSource::new("data").load_latest()?;
//! let report = predictor.train(&records)?;
//! println!("Best model: {}", report.best_model);
//! ```

// Re-export everything from core (which includes API and SPI)
pub use growth_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Traits
    pub use growth_spi::{Clock, ModelStore, Regressor, SnapshotSource};

    // Configuration
    pub use growth_api::{ForecastConfig, PredictorConfig, TrainerConfig};

    // Domain and error types
    pub use growth_spi::{
        Algorithm, GrowthError, MlInsights, PredictionResult, RepositoryRecord, Result,
        TrainingReport, TrendSummary,
    };

    // Implementations
    pub use growth_core::{
        DirectorySnapshotSource, FileModelStore, FixedClock, GrowthPredictor, MemoryModelStore,
        SystemClock,
    };
}
