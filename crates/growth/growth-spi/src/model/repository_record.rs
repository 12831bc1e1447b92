//! Raw repository record.

use serde::{Deserialize, Serialize};

/// A repository as collected from a GitHub search snapshot.
///
/// Field names follow the GitHub search API so snapshot files deserialize
/// directly; unknown API fields are ignored. `stargazers_count` and
/// `created_at` are optional on the wire but required for feature building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name
    pub name: String,
    /// Current star count
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    /// Creation timestamp (RFC 3339 or naive ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Primary language
    #[serde(default)]
    pub language: Option<String>,
    /// Repository description
    #[serde(default)]
    pub description: Option<String>,
}

impl RepositoryRecord {
    /// Create a record with the required fields set.
    pub fn new(name: impl Into<String>, stargazers_count: u64, created_at: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stargazers_count: Some(stargazers_count),
            created_at: Some(created_at.into()),
            language: None,
            description: None,
        }
    }

    /// Set the primary language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RepositoryRecord::new("deno", 95_000, "2018-05-15T16:00:00Z")
            .with_language("Rust")
            .with_description("A modern runtime");

        assert_eq!(record.name, "deno");
        assert_eq!(record.stargazers_count, Some(95_000));
        assert_eq!(record.language.as_deref(), Some("Rust"));
        assert_eq!(record.description.as_deref(), Some("A modern runtime"));
    }

    #[test]
    fn test_deserialize_github_item_ignores_extra_fields() {
        let json = r#"{
            "id": 10270250,
            "name": "react",
            "full_name": "facebook/react",
            "stargazers_count": 228000,
            "created_at": "2013-05-24T16:15:54Z",
            "language": "JavaScript",
            "description": null,
            "html_url": "https://github.com/facebook/react"
        }"#;
        let record: RepositoryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "react");
        assert_eq!(record.stargazers_count, Some(228_000));
        assert_eq!(record.language.as_deref(), Some("JavaScript"));
        assert!(record.description.is_none());
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let record: RepositoryRecord = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert!(record.stargazers_count.is_none());
        assert!(record.created_at.is_none());
    }
}
