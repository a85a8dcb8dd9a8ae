//! The per-model descriptor contract feeding the sitemap generators.
//!
//! A [`ModelSitemap`] implementation is the generators' only view of a
//! content model: it hands out records in fixed-size chunks and derives
//! every sitemap-relevant value per record (URL, timestamps, priority,
//! translations, images, news metadata). Implementations typically wrap a
//! database query; the test suite wraps plain vectors.

use crate::news::NewsMetadata;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Change frequency hints for a sitemap URL.
///
/// These values indicate how frequently a page is likely to change, though
/// search engines may not follow these hints strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// The literal tag written into `<changefreq>`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(Error::Descriptor(format!("invalid changefreq value: {s}"))),
        }
    }
}

/// One alternate-language link for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Language tag for the `hreflang` attribute, e.g. `en` or `de-AT`.
    pub language: String,
    /// Absolute, already-encoded URL of the translated page.
    pub href: String,
}

/// News metadata as a descriptor hands it over: either the typed value or
/// the loosely-typed field map the map constructor normalizes.
///
/// The serializer normalizes both forms through the same constructor
/// contract before any XML is written; nothing downstream branches on
/// shape.
#[derive(Debug, Clone)]
pub enum NewsSource {
    /// Typed metadata with every field explicit.
    Metadata(NewsMetadata),
    /// Loose string map; name/language gaps are filled from the
    /// application-wide publication defaults.
    Fields(BTreeMap<String, String>),
}

/// A record source consumed in fixed-size chunks.
///
/// Chunks are pulled strictly sequentially: chunk *i* is fully serialized
/// before chunk *i + 1* is requested, so element order equals the source's
/// natural order. An empty chunk means the source is exhausted. An error
/// mid-stream is fatal to the generation call; no partial document is
/// returned.
pub trait RecordSource {
    /// The record type this source yields.
    type Record;

    /// Pull up to `limit` records.
    fn next_chunk(&mut self, limit: usize) -> Result<Vec<Self::Record>>;
}

/// A [`RecordSource`] over an in-memory vector. Useful for tests and for
/// models whose full record set is already resident.
#[derive(Debug)]
pub struct VecSource<R> {
    records: std::vec::IntoIter<R>,
}

impl<R> VecSource<R> {
    /// Wrap a vector of records.
    #[must_use]
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl<R> RecordSource for VecSource<R> {
    type Record = R;

    fn next_chunk(&mut self, limit: usize) -> Result<Vec<R>> {
        Ok(self.records.by_ref().take(limit).collect())
    }
}

/// Per-model sitemap descriptor: the input contract of the generation
/// engine.
///
/// Only `source`, `url`, `sitemap_last_modified`, and `sitemap_url` are
/// required; everything else defaults to "feature off" or "value absent".
pub trait ModelSitemap {
    /// The content-record type this model serves.
    type Record;
    /// The chunked source this model's records are pulled from.
    type Source: RecordSource<Record = Self::Record>;

    /// Open a fresh record source for one generation pass.
    fn source(&self) -> Result<Self::Source>;

    /// Whether a record belongs in the sitemap at all.
    ///
    /// Records excluded here produce no element and leave the namespace
    /// tracker untouched.
    fn should_include(&self, _record: &Self::Record) -> bool {
        true
    }

    /// Canonical URL for a record. An empty URL omits the `<loc>` element
    /// (an empty location is never emitted).
    fn url(&self, record: &Self::Record) -> String;

    /// When the record last changed, if known.
    fn last_modified(&self, _record: &Self::Record) -> Option<DateTime<Utc>> {
        None
    }

    /// Crawl priority in `0.0..=1.0`. `Some(0.0)` is a present value and
    /// appears in the output; `None` is absent.
    fn priority(&self, _record: &Self::Record) -> Option<f32> {
        None
    }

    /// Change-frequency hint for the record.
    fn change_frequency(&self, _record: &Self::Record) -> Option<ChangeFrequency> {
        None
    }

    /// Whether alternate-language links are emitted for this model.
    fn has_translations(&self) -> bool {
        false
    }

    /// Alternate-language links for a record.
    fn translations(&self, _record: &Self::Record) -> Vec<Translation> {
        Vec::new()
    }

    /// Whether image entries are emitted for this model.
    fn has_images(&self) -> bool {
        false
    }

    /// Image URLs attached to a record.
    fn images(&self, _record: &Self::Record) -> Vec<String> {
        Vec::new()
    }

    /// Whether this record type carries news metadata. Only consulted
    /// inside the dedicated news-sitemap flow.
    fn is_news_item(&self) -> bool {
        false
    }

    /// News metadata for a record, in either accepted shape.
    fn news_source(&self, _record: &Self::Record) -> Option<NewsSource> {
        None
    }

    /// Whether this model tracks a revision timestamp. When true, the news
    /// freshness window filters on [`ModelSitemap::revised_at`]; otherwise
    /// on [`ModelSitemap::published_at`].
    fn supports_revised_at(&self) -> bool {
        false
    }

    /// When the record was last editorially revised.
    fn revised_at(&self, _record: &Self::Record) -> Option<DateTime<Utc>> {
        None
    }

    /// When the record was first published.
    fn published_at(&self, _record: &Self::Record) -> Option<DateTime<Utc>> {
        None
    }

    /// The freshness timestamp the news window filters on, following the
    /// model's convention.
    fn freshness(&self, record: &Self::Record) -> Option<DateTime<Utc>> {
        if self.supports_revised_at() {
            self.revised_at(record)
        } else {
            self.published_at(record)
        }
    }

    /// Last-modified timestamp for the model as a whole, used by the
    /// sitemap index.
    fn sitemap_last_modified(&self) -> Result<DateTime<Utc>>;

    /// Canonical URL of this model's sub-sitemap.
    fn sitemap_url(&self) -> String;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_changefreq_round_trip() {
        let cases = [
            ("always", ChangeFrequency::Always),
            ("hourly", ChangeFrequency::Hourly),
            ("daily", ChangeFrequency::Daily),
            ("weekly", ChangeFrequency::Weekly),
            ("monthly", ChangeFrequency::Monthly),
            ("yearly", ChangeFrequency::Yearly),
            ("never", ChangeFrequency::Never),
        ];

        for (text, expected) in cases {
            let parsed: ChangeFrequency = text.parse().unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.as_str(), text);
        }
    }

    #[test]
    fn test_changefreq_parse_is_case_insensitive() {
        let parsed: ChangeFrequency = "WEEKLY".parse().unwrap();
        assert_eq!(parsed, ChangeFrequency::Weekly);
    }

    #[test]
    fn test_changefreq_rejects_unknown_values() {
        let result: Result<ChangeFrequency> = "fortnightly".parse();
        assert!(matches!(result, Err(Error::Descriptor(_))));
    }

    #[test]
    fn test_changefreq_serde_is_lowercase() {
        let json = serde_json::to_string(&ChangeFrequency::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");
    }

    #[test]
    fn test_vec_source_chunks_in_order() {
        let mut source = VecSource::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(source.next_chunk(2).unwrap(), vec![1, 2]);
        assert_eq!(source.next_chunk(2).unwrap(), vec![3, 4]);
        assert_eq!(source.next_chunk(2).unwrap(), vec![5]);
        assert!(source.next_chunk(2).unwrap().is_empty());
    }

    #[test]
    fn test_vec_source_empty() {
        let mut source: VecSource<u8> = VecSource::new(Vec::new());
        assert!(source.next_chunk(20).unwrap().is_empty());
    }
}
