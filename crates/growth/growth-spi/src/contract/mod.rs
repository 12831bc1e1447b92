//! Contract module containing growth prediction traits.
//!
//! - [`Regressor`] - supervised regressors over feature rows
//! - [`ModelStore`] - durable storage for fitted models and the selection record
//! - [`SnapshotSource`] - supplier of collected repository records
//! - [`Clock`] - source of "now" for feature building and forecast dates

mod clock;
mod model_store;
mod regressor;
mod snapshot_source;

pub use clock::Clock;
pub use model_store::ModelStore;
pub use regressor::Regressor;
pub use snapshot_source::SnapshotSource;
