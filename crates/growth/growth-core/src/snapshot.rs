//! Snapshot loading from the collector's data directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use growth_spi::{GrowthError, RepositoryRecord, Result, SnapshotSource};
use serde::Deserialize;
use tracing::info;

/// File-name prefix of collected snapshots (`github_top_YYYYMMDD_HHMMSS.json`)
pub const SNAPSHOT_PREFIX: &str = "github_top_";

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Search { items: Vec<RepositoryRecord> },
    Bare(Vec<RepositoryRecord>),
}

/// Parse a snapshot: either a GitHub search response or a bare array of items.
pub fn parse_snapshot(raw: &str) -> Result<Vec<RepositoryRecord>> {
    let document: SnapshotDocument = serde_json::from_str(raw)?;
    Ok(match document {
        SnapshotDocument::Search { items } => items,
        SnapshotDocument::Bare(items) => items,
    })
}

/// Reads the newest snapshot in a directory.
///
/// Snapshot names embed their timestamp, so the lexicographically greatest
/// matching file is the most recent one.
#[derive(Debug, Clone)]
pub struct DirectorySnapshotSource {
    dir: PathBuf,
}

impl DirectorySnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the newest snapshot, if any.
    pub fn latest_file(&self) -> Result<Option<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GrowthError::Storage(format!(
                    "listing {}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        let mut latest: Option<(String, PathBuf)> = None;
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.starts_with(SNAPSHOT_PREFIX) || !name.ends_with(".json") {
                continue;
            }
            if latest.as_ref().map_or(true, |(best, _)| name > best.as_str()) {
                latest = Some((name.to_string(), entry.path()));
            }
        }
        Ok(latest.map(|(_, path)| path))
    }
}

impl SnapshotSource for DirectorySnapshotSource {
    fn load_latest(&self) -> Result<Vec<RepositoryRecord>> {
        let path = self.latest_file()?.ok_or_else(|| {
            GrowthError::EmptyInput(format!(
                "no {}*.json snapshot in {}",
                SNAPSHOT_PREFIX,
                self.dir.display()
            ))
        })?;
        let raw = fs::read_to_string(&path)
            .map_err(|e| GrowthError::Storage(format!("reading {}: {}", path.display(), e)))?;
        let records = parse_snapshot(&raw)
            .map_err(|e| GrowthError::Storage(format!("parsing {}: {}", path.display(), e)))?;

        info!(path = %path.display(), repositories = records.len(), "loaded snapshot");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_search_response() {
        let raw = r#"{"total_count": 2, "incomplete_results": false, "items": [
            {"name": "react", "stargazers_count": 228000, "created_at": "2013-05-24T16:15:54Z", "language": "JavaScript"},
            {"name": "linux", "stargazers_count": 180000, "created_at": "2011-09-04T22:48:12Z", "language": "C"}
        ]}"#;
        let records = parse_snapshot(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "linux");
    }

    #[test]
    fn test_parse_bare_array() {
        let records = parse_snapshot(r#"[{"name": "vue", "stargazers_count": 1}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert!(parse_snapshot(r#"{"message": "rate limited"}"#).is_err());
    }

    #[test]
    fn test_latest_snapshot_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("github_top_20250101_000000.json"),
            r#"[{"name": "old"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("github_top_20250907_124243.json"),
            r#"{"items": [{"name": "new"}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("top_repos_history.json"), "[]").unwrap();

        let source = DirectorySnapshotSource::new(dir.path());
        let records = source.load_latest().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "new");
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySnapshotSource::new(dir.path().join("absent"));
        assert!(matches!(
            source.load_latest(),
            Err(GrowthError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_invalid_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("github_top_1.json"), "{oops").unwrap();
        let source = DirectorySnapshotSource::new(dir.path());
        assert!(matches!(source.load_latest(), Err(GrowthError::Storage(_))));
    }
}
