//! Model stores
//!
//! [`FileModelStore`] writes one JSON document per artifact plus a selection
//! record into a directory. [`MemoryModelStore`] keeps the same documents in a
//! map, for tests and short-lived processes.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use growth_spi::{GrowthError, ModelMetadata, ModelStore, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Name under which the selection record is stored
pub const SELECTION_RECORD: &str = "selection";

fn validate_name(name: &str) -> Result<()> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if name.is_empty() || !valid_chars {
        return Err(GrowthError::InvalidParameter {
            name: "name".to_string(),
            reason: format!("'{}' is not a valid artifact name", name),
        });
    }
    if name == SELECTION_RECORD {
        return Err(GrowthError::InvalidParameter {
            name: "name".to_string(),
            reason: format!("'{}' is reserved", SELECTION_RECORD),
        });
    }
    Ok(())
}

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct FileModelStore {
    dir: PathBuf,
}

impl FileModelStore {
    /// Store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            GrowthError::Storage(format!("creating {}: {}", self.dir.display(), e))
        })?;
        let path = self.path_for(name);
        let bytes = serde_json::to_vec(value)?;
        fs::write(&path, bytes)
            .map_err(|e| GrowthError::Storage(format!("writing {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "wrote model document");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path_for(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GrowthError::Storage(format!(
                    "reading {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| GrowthError::Storage(format!("decoding {}: {}", path.display(), e)))?;
        Ok(Some(value))
    }
}

impl ModelStore for FileModelStore {
    fn save<A: Serialize>(&self, name: &str, artifact: &A) -> Result<()> {
        validate_name(name)?;
        self.write(name, artifact)
    }

    fn load<A: DeserializeOwned>(&self, name: &str) -> Result<Option<A>> {
        validate_name(name)?;
        self.read(name)
    }

    fn save_selection(&self, metadata: &ModelMetadata) -> Result<()> {
        self.write(SELECTION_RECORD, metadata)
    }

    fn selection(&self) -> Result<Option<ModelMetadata>> {
        self.read(SELECTION_RECORD)
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    artifacts: Mutex<HashMap<String, serde_json::Value>>,
    selection: Mutex<Option<ModelMetadata>>,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts
    pub fn len(&self) -> Result<usize> {
        Ok(self.artifacts.lock().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> GrowthError {
    GrowthError::Storage("model store lock poisoned".to_string())
}

impl ModelStore for MemoryModelStore {
    fn save<A: Serialize>(&self, name: &str, artifact: &A) -> Result<()> {
        validate_name(name)?;
        let value = serde_json::to_value(artifact)?;
        self.artifacts
            .lock()
            .map_err(poisoned)?
            .insert(name.to_string(), value);
        Ok(())
    }

    fn load<A: DeserializeOwned>(&self, name: &str) -> Result<Option<A>> {
        validate_name(name)?;
        let value = self.artifacts.lock().map_err(poisoned)?.get(name).cloned();
        value
            .map(|v| serde_json::from_value(v).map_err(GrowthError::from))
            .transpose()
    }

    fn save_selection(&self, metadata: &ModelMetadata) -> Result<()> {
        *self.selection.lock().map_err(poisoned)? = Some(metadata.clone());
        Ok(())
    }

    fn selection(&self) -> Result<Option<ModelMetadata>> {
        Ok(self.selection.lock().map_err(poisoned)?.clone())
    }
}
