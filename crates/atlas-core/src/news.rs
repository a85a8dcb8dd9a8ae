//! Normalized publication metadata for Google News sitemap entries.
//!
//! News metadata historically arrived in two incompatible shapes: a typed
//! value with all fields explicit, and a loosely-typed string map with
//! application-level defaults filling the gaps. Both construction paths
//! produce the same immutable [`NewsMetadata`] value, so the serializer
//! never branches on input shape.

use crate::config::PublicationConfig;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable publication metadata for one news record.
///
/// Created per record at serialization time and discarded after the
/// enclosing `<url>` element is written. All four fields must be non-empty
/// before serialization; see [`NewsMetadata::is_valid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsMetadata {
    /// Publication name (`<news:name>`).
    pub publication_name: String,
    /// Publication language tag (`<news:language>`), e.g. `en` or `de-AT`.
    pub publication_language: String,
    /// When the article was published (`<news:publication_date>`).
    pub publication_date: DateTime<Utc>,
    /// Article title (`<news:title>`).
    pub title: String,
}

impl NewsMetadata {
    /// Construct from explicit, typed values.
    ///
    /// This path applies no defaults: callers supply every field.
    #[must_use]
    pub fn new(
        publication_name: impl Into<String>,
        publication_language: impl Into<String>,
        publication_date: DateTime<Utc>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            publication_name: publication_name.into(),
            publication_language: publication_language.into(),
            publication_date,
            title: title.into(),
        }
    }

    /// Construct from a loosely-typed field map.
    ///
    /// `publication_name` and `publication_language` fall back to the
    /// application-wide publication defaults when absent (`language` is
    /// accepted as an alternate key for the latter). `publication_date` and
    /// `title` are required and have no default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metadata`] when the date or title is missing, or
    /// when the date string cannot be parsed as a timestamp.
    pub fn from_fields(
        fields: &BTreeMap<String, String>,
        defaults: &PublicationConfig,
    ) -> Result<Self> {
        let publication_name = fields
            .get("publication_name")
            .cloned()
            .unwrap_or_else(|| defaults.name.clone());
        let publication_language = fields
            .get("publication_language")
            .or_else(|| fields.get("language"))
            .cloned()
            .unwrap_or_else(|| defaults.language.clone());

        let date_str = fields
            .get("publication_date")
            .ok_or_else(|| Error::Metadata("publication_date is required".to_string()))?;
        let publication_date = parse_timestamp(date_str).ok_or_else(|| {
            Error::Metadata(format!("could not parse publication_date `{date_str}`"))
        })?;

        let title = fields
            .get("title")
            .cloned()
            .ok_or_else(|| Error::Metadata("title is required".to_string()))?;

        Ok(Self {
            publication_name,
            publication_language,
            publication_date,
            title,
        })
    }

    /// The publication date in RFC 3339 form with a timezone offset.
    #[must_use]
    pub fn publication_date_string(&self) -> String {
        self.publication_date
            .to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Whether every string field is non-empty (the date is always a
    /// concrete timestamp and needs no check).
    ///
    /// The serializer refuses to emit a `<news:news>` block for invalid
    /// metadata; that failure is scoped to the single affected record.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.publication_name.is_empty()
            && !self.publication_language.is_empty()
            && !self.title.is_empty()
    }
}

/// Parse a timestamp string in the formats sitemap tooling encounters.
///
/// Accepts RFC 3339 with offset or `Z`, a bare date, and a naive datetime
/// (assumed UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn defaults() -> PublicationConfig {
        PublicationConfig {
            name: "The Example Times".to_string(),
            language: "en".to_string(),
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_typed_construction_applies_no_defaults() {
        let date = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let metadata = NewsMetadata::new("Own Name", "de", date, "Headline");

        assert_eq!(metadata.publication_name, "Own Name");
        assert_eq!(metadata.publication_language, "de");
        assert_eq!(metadata.title, "Headline");
        assert_eq!(
            metadata.publication_date_string(),
            "2024-01-15T10:00:00+00:00"
        );
    }

    #[test]
    fn test_map_construction_fills_name_and_language() {
        let map = fields(&[
            ("publication_date", "2024-01-15T10:00:00+00:00"),
            ("title", "Headline"),
        ]);

        let metadata = NewsMetadata::from_fields(&map, &defaults()).unwrap();
        assert_eq!(metadata.publication_name, "The Example Times");
        assert_eq!(metadata.publication_language, "en");
        assert_eq!(metadata.title, "Headline");
    }

    #[test]
    fn test_map_construction_prefers_explicit_values() {
        let map = fields(&[
            ("publication_name", "Other Paper"),
            ("publication_language", "fr"),
            ("publication_date", "2024-01-15"),
            ("title", "Headline"),
        ]);

        let metadata = NewsMetadata::from_fields(&map, &defaults()).unwrap();
        assert_eq!(metadata.publication_name, "Other Paper");
        assert_eq!(metadata.publication_language, "fr");
    }

    #[test]
    fn test_map_construction_accepts_language_alias() {
        let map = fields(&[
            ("language", "ja"),
            ("publication_date", "2024-01-15"),
            ("title", "Headline"),
        ]);

        let metadata = NewsMetadata::from_fields(&map, &defaults()).unwrap();
        assert_eq!(metadata.publication_language, "ja");
    }

    #[test]
    fn test_map_construction_requires_date_and_title() {
        let missing_date = fields(&[("title", "Headline")]);
        assert!(matches!(
            NewsMetadata::from_fields(&missing_date, &defaults()),
            Err(Error::Metadata(_))
        ));

        let missing_title = fields(&[("publication_date", "2024-01-15")]);
        assert!(matches!(
            NewsMetadata::from_fields(&missing_title, &defaults()),
            Err(Error::Metadata(_))
        ));
    }

    #[test]
    fn test_map_construction_rejects_garbage_date() {
        let map = fields(&[("publication_date", "not a date"), ("title", "Headline")]);
        let result = NewsMetadata::from_fields(&map, &defaults());
        assert!(matches!(result, Err(Error::Metadata(_))));
    }

    #[test]
    fn test_both_paths_produce_equal_values() {
        let map = fields(&[
            ("publication_name", "The Example Times"),
            ("publication_language", "en"),
            ("publication_date", "2024-01-15T10:00:00+00:00"),
            ("title", "Headline"),
        ]);
        let from_map = NewsMetadata::from_fields(&map, &defaults()).unwrap();

        let date = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let typed = NewsMetadata::new("The Example Times", "en", date, "Headline");

        assert_eq!(from_map, typed);
    }

    #[test]
    fn test_validity() {
        let date = Utc::now();
        assert!(NewsMetadata::new("n", "en", date, "t").is_valid());
        assert!(!NewsMetadata::new("", "en", date, "t").is_valid());
        assert!(!NewsMetadata::new("n", "", date, "t").is_valid());
        assert!(!NewsMetadata::new("n", "en", date, "").is_valid());
    }

    #[test]
    fn test_timestamp_parsing_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
