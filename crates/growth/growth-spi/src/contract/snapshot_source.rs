//! Snapshot source trait.

use crate::error::Result;
use crate::model::RepositoryRecord;

/// Supplier of already-collected repository records.
pub trait SnapshotSource {
    /// Records from the most recent snapshot.
    fn load_latest(&self) -> Result<Vec<RepositoryRecord>>;
}
