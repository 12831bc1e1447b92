//! Feature extraction from repository records
//!
//! Every record becomes a six-element [`FeatureVector`]. Two of the features
//! (`stars_per_day`, `growth_rate`) are derived from the star count the model
//! later predicts, so held-out scores are optimistic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use growth_spi::{
    FeatureVector, GrowthError, RepositoryFeatures, RepositoryRecord, Result,
};
use tracing::{debug, warn};

/// Code assigned to languages outside the fixed table, and to missing languages
pub const OTHER_LANGUAGE_CODE: u8 = 11;

const LANGUAGE_CODES: [(&str, u8); 10] = [
    ("JavaScript", 1),
    ("Python", 2),
    ("Java", 3),
    ("TypeScript", 4),
    ("C++", 5),
    ("C#", 6),
    ("PHP", 7),
    ("Ruby", 8),
    ("Go", 9),
    ("Rust", 10),
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Map a language name to its numeric code (exact, case-sensitive match).
pub fn encode_language(language: Option<&str>) -> u8 {
    language
        .and_then(|lang| {
            LANGUAGE_CODES
                .iter()
                .find(|(name, _)| *name == lang)
                .map(|(_, code)| *code)
        })
        .unwrap_or(OTHER_LANGUAGE_CODE)
}

/// Parse a creation timestamp into naive UTC.
///
/// Accepts RFC 3339 (`2013-05-24T16:15:54Z`, `...+02:00`), naive date-times and
/// bare `YYYY-MM-DD` dates (taken as midnight).
pub fn parse_created_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::default()))
}

/// Builds feature vectors relative to a fixed "now"
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder {
    now: NaiveDateTime,
}

impl FeatureBuilder {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Reference instant used for ages
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Build the features for one record.
    pub fn build(&self, record: &RepositoryRecord) -> Result<RepositoryFeatures> {
        let stars = record
            .stargazers_count
            .ok_or_else(|| GrowthError::malformed(&record.name, "missing stargazers_count"))?;
        let raw_created = record
            .created_at
            .as_deref()
            .ok_or_else(|| GrowthError::malformed(&record.name, "missing created_at"))?;
        let created = parse_created_at(raw_created).ok_or_else(|| {
            GrowthError::malformed(
                &record.name,
                format!("unparseable created_at '{}'", raw_created),
            )
        })?;

        let days = (self.now - created).num_days().max(1);
        let stars_f = stars as f64;
        let description_length = record
            .description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0);

        let features = FeatureVector {
            days_since_creation: days,
            stars_per_day: stars_f / days as f64,
            growth_rate: stars_f / (days as f64 + 1.0),
            language_encoded: encode_language(record.language.as_deref()),
            has_description: u8::from(record.description.is_some()),
            description_length,
        };
        debug!(repository = %record.name, days, "built features");

        Ok(RepositoryFeatures {
            name: record.name.clone(),
            stargazers_count: stars,
            language: record.language.clone(),
            features,
        })
    }

    /// Build features for every well-formed record, skipping malformed ones.
    pub fn build_all(&self, records: &[RepositoryRecord]) -> Vec<RepositoryFeatures> {
        records
            .iter()
            .filter_map(|record| match self.build(record) {
                Ok(features) => Some(features),
                Err(e) => {
                    warn!(repository = %record.name, error = %e, "skipping record");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_encode_language() {
        assert_eq!(encode_language(Some("JavaScript")), 1);
        assert_eq!(encode_language(Some("C++")), 5);
        assert_eq!(encode_language(Some("Rust")), 10);
        assert_eq!(encode_language(Some("COBOL")), OTHER_LANGUAGE_CODE);
        assert_eq!(encode_language(Some("rust")), OTHER_LANGUAGE_CODE);
        assert_eq!(encode_language(None), OTHER_LANGUAGE_CODE);
    }

    #[test]
    fn test_parse_created_at_formats() {
        let expected = NaiveDate::from_ymd_opt(2013, 5, 24)
            .unwrap()
            .and_hms_opt(16, 15, 54)
            .unwrap();
        assert_eq!(parse_created_at("2013-05-24T16:15:54Z"), Some(expected));
        assert_eq!(parse_created_at("2013-05-24T18:15:54+02:00"), Some(expected));
        assert_eq!(parse_created_at("2013-05-24T16:15:54"), Some(expected));
        assert_eq!(parse_created_at("2013-05-24 16:15:54"), Some(expected));
        assert_eq!(
            parse_created_at("2013-05-24"),
            NaiveDate::from_ymd_opt(2013, 5, 24).unwrap().and_hms_opt(0, 0, 0)
        );
        assert!(parse_created_at("yesterday").is_none());
    }

    #[test]
    fn test_build_features() {
        let builder = FeatureBuilder::new(now());
        let record = RepositoryRecord::new("deno", 1000, "2026-01-21T12:00:00Z")
            .with_language("Rust")
            .with_description("Runtime");
        let built = builder.build(&record).unwrap();
        let f = built.features;

        assert_eq!(built.name, "deno");
        assert_eq!(built.stargazers_count, 1000);
        assert_eq!(f.days_since_creation, 10);
        assert!((f.stars_per_day - 100.0).abs() < 1e-12);
        assert!((f.growth_rate - 1000.0 / 11.0).abs() < 1e-12);
        assert_eq!(f.language_encoded, 10);
        assert_eq!(f.has_description, 1);
        assert_eq!(f.description_length, 7);
    }

    #[test]
    fn test_created_now_has_one_day() {
        let builder = FeatureBuilder::new(now());
        let record = RepositoryRecord::new("fresh", 50, "2026-01-31T12:00:00Z");
        let f = builder.build(&record).unwrap().features;

        assert_eq!(f.days_since_creation, 1);
        assert!((f.stars_per_day - 50.0).abs() < 1e-12);
        assert!((f.growth_rate - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_future_creation_is_clamped() {
        let builder = FeatureBuilder::new(now());
        let record = RepositoryRecord::new("time-traveller", 10, "2027-06-01T00:00:00Z");
        let f = builder.build(&record).unwrap().features;

        assert_eq!(f.days_since_creation, 1);
        assert!(f.stars_per_day.is_finite());
    }

    #[test]
    fn test_description_length_counts_characters() {
        let builder = FeatureBuilder::new(now());
        let record =
            RepositoryRecord::new("emoji", 1, "2020-01-01").with_description("🚀 fast");
        let f = builder.build(&record).unwrap().features;
        assert_eq!(f.description_length, 6);

        let bare = RepositoryRecord::new("bare", 1, "2020-01-01");
        let f = builder.build(&bare).unwrap().features;
        assert_eq!(f.has_description, 0);
        assert_eq!(f.description_length, 0);
        assert_eq!(f.language_encoded, OTHER_LANGUAGE_CODE);
    }

    #[test]
    fn test_malformed_records() {
        let builder = FeatureBuilder::new(now());

        let mut missing_stars = RepositoryRecord::new("a", 1, "2020-01-01");
        missing_stars.stargazers_count = None;
        let err = builder.build(&missing_stars).unwrap_err();
        assert!(err.to_string().contains("stargazers_count"));

        let mut missing_date = RepositoryRecord::new("b", 1, "2020-01-01");
        missing_date.created_at = None;
        assert!(matches!(
            builder.build(&missing_date),
            Err(GrowthError::MalformedRecord { .. })
        ));

        let bad_date = RepositoryRecord::new("c", 1, "not a date");
        let err = builder.build(&bad_date).unwrap_err();
        assert!(err.to_string().contains("'c'"));
    }

    #[test]
    fn test_build_all_skips_malformed() {
        let builder = FeatureBuilder::new(now());
        let records = vec![
            RepositoryRecord::new("ok", 10, "2020-01-01"),
            RepositoryRecord::new("bad", 10, "??"),
            RepositoryRecord::new("ok2", 20, "2021-01-01"),
        ];
        let built = builder.build_all(&records);

        assert_eq!(built.len(), 2);
        assert_eq!(built[0].name, "ok");
        assert_eq!(built[1].name, "ok2");
    }
}
