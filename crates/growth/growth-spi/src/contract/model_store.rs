//! Model store trait.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::model::ModelMetadata;

/// Durable storage for fitted models.
///
/// Artifacts are keyed by name (the algorithm name) and overwritten on save;
/// saving never removes other artifacts. The selection record names the
/// artifact inference should use. Implementations are not required to guard
/// against concurrent writers.
pub trait ModelStore {
    /// Persist an artifact under `name`, replacing any previous one.
    fn save<A: Serialize>(&self, name: &str, artifact: &A) -> Result<()>;

    /// Load the artifact stored under `name`, or `None` if there is none.
    fn load<A: DeserializeOwned>(&self, name: &str) -> Result<Option<A>>;

    /// Record which artifact is the selected model.
    fn save_selection(&self, metadata: &ModelMetadata) -> Result<()>;

    /// The current selection record, if training has run.
    fn selection(&self) -> Result<Option<ModelMetadata>>;
}

impl<S: ModelStore + ?Sized> ModelStore for &S {
    fn save<A: Serialize>(&self, name: &str, artifact: &A) -> Result<()> {
        (**self).save(name, artifact)
    }

    fn load<A: DeserializeOwned>(&self, name: &str) -> Result<Option<A>> {
        (**self).load(name)
    }

    fn save_selection(&self, metadata: &ModelMetadata) -> Result<()> {
        (**self).save_selection(metadata)
    }

    fn selection(&self) -> Result<Option<ModelMetadata>> {
        (**self).selection()
    }
}
