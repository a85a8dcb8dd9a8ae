//! Sitemap generation entry points.
//!
//! Three generators share one pipeline: a fresh [`SitemapDocument`] and
//! [`NamespaceUsage`] tracker per call, records pulled in fixed-size chunks
//! and serialized in source order, and a final serialization that declares
//! exactly the namespaces the body used. Generation is synchronous and
//! single-threaded; nothing is shared across calls and nothing is retried
//! internally. If the record source fails mid-stream the call fails as a
//! whole, so a caller never sees a partial document.

use crate::config::GeneratorConfig;
use crate::descriptor::ModelSitemap;
use crate::document::{RootKind, SitemapDocument, XmlElement, format_atom};
use crate::namespace::NamespaceUsage;
use crate::registry::SitemapRegistry;
use crate::resolver::SectionResolver;
use crate::section::{EmitMode, drain_into};
use crate::serializer::UrlEntryWriter;
use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

/// Generates a standard `urlset` sitemap for one content model.
#[derive(Debug, Clone, Default)]
pub struct SitemapGenerator {
    config: GeneratorConfig,
}

impl SitemapGenerator {
    /// Create a generator with the given configuration.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate the sitemap document for one model.
    ///
    /// Consumes the model's record source in chunks of the configured size,
    /// so peak memory is bounded regardless of total record count. An empty
    /// source produces a well-formed, empty `urlset`.
    #[instrument(skip_all, fields(sitemap_url = %sitemap.sitemap_url()))]
    pub fn generate<D: ModelSitemap>(&self, sitemap: &D) -> Result<String> {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut namespaces = NamespaceUsage::new();

        {
            let mut writer =
                UrlEntryWriter::new(&mut document, &mut namespaces, &self.config.publication);
            drain_into(sitemap, &mut writer, EmitMode::Standard, self.config.chunk_size)?;
        }

        tracing::debug!(entries = document.len(), "sitemap assembled");
        document.to_xml(&namespaces)
    }
}

/// Generates the `sitemapindex` document over every registered model.
///
/// Carries no configuration: the index lists whole models, so chunking and
/// the news window do not apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexGenerator;

impl IndexGenerator {
    /// Create an index generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate the index document.
    ///
    /// Every registered model gets one `<sitemap>` entry in registration
    /// order; a model the resolver cannot produce is fatal, since the index
    /// must list all of them. When any model is news-eligible, one extra
    /// entry points at the consolidated news sitemap, stamped with the most
    /// recent last-modified among the news-eligible models (or the current
    /// time when none supplied one).
    pub fn generate(
        &self,
        registry: &SitemapRegistry,
        resolver: &dyn SectionResolver,
    ) -> Result<String> {
        self.generate_at(registry, resolver, Utc::now())
    }

    /// [`IndexGenerator::generate`] with an explicit "now", for
    /// deterministic replays and tests.
    #[instrument(skip_all, fields(models = registry.models().count()))]
    pub fn generate_at(
        &self,
        registry: &SitemapRegistry,
        resolver: &dyn SectionResolver,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let mut document = SitemapDocument::new(RootKind::SitemapIndex);
        let mut news_last_modified: Option<DateTime<Utc>> = None;

        for model in registry.models() {
            let section = resolver.resolve(model.name()).ok_or_else(|| {
                Error::NotFound(format!("no sitemap section for model `{}`", model.name()))
            })?;

            let last_modified = section.last_modified()?;
            if model.is_news() {
                news_last_modified =
                    Some(news_last_modified.map_or(last_modified, |seen| seen.max(last_modified)));
            }

            document.append(index_entry(&section.sitemap_url(), &last_modified));
        }

        if registry.has_news_models() {
            let stamp = news_last_modified.unwrap_or(now);
            document.append(index_entry(registry.news_sitemap_url(), &stamp));
        }

        document.to_xml(&NamespaceUsage::new())
    }
}

/// Generates the consolidated Google News sitemap over the registry's
/// news-eligible models.
#[derive(Debug, Clone, Default)]
pub struct NewsSitemapGenerator {
    config: GeneratorConfig,
}

impl NewsSitemapGenerator {
    /// Create a news generator with the given configuration.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate the news sitemap document.
    ///
    /// Only records whose freshness timestamp falls within the configured
    /// window (counting back from now) are included, with news metadata
    /// forced on. A registered model the resolver no longer knows is
    /// skipped with a warning rather than failing the whole call.
    pub fn generate(
        &self,
        registry: &SitemapRegistry,
        resolver: &dyn SectionResolver,
    ) -> Result<String> {
        self.generate_at(registry, resolver, Utc::now())
    }

    /// [`NewsSitemapGenerator::generate`] with an explicit "now", for
    /// deterministic replays and tests.
    #[instrument(skip_all, fields(news_models = registry.news_models().count()))]
    pub fn generate_at(
        &self,
        registry: &SitemapRegistry,
        resolver: &dyn SectionResolver,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let cutoff = now - Duration::days(self.config.news_window_days);
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut namespaces = NamespaceUsage::new();

        {
            let mut writer =
                UrlEntryWriter::new(&mut document, &mut namespaces, &self.config.publication);

            for name in registry.news_models() {
                let Some(section) = resolver.resolve(name) else {
                    tracing::warn!(model = %name, "skipping unresolvable news model");
                    continue;
                };
                section.write_into(&mut writer, EmitMode::News { cutoff }, self.config.chunk_size)?;
            }
        }

        tracing::debug!(entries = document.len(), "news sitemap assembled");
        document.to_xml(&namespaces)
    }
}

fn index_entry(loc: &str, last_modified: &DateTime<Utc>) -> XmlElement {
    let mut entry = XmlElement::new("sitemap");
    entry.push(XmlElement::with_text("loc", loc));
    entry.push(XmlElement::with_text("lastmod", format_atom(last_modified)));
    entry
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::descriptor::VecSource;
    use chrono::DateTime;

    struct Posts {
        urls: Vec<String>,
    }

    impl ModelSitemap for Posts {
        type Record = String;
        type Source = VecSource<String>;

        fn source(&self) -> Result<Self::Source> {
            Ok(VecSource::new(self.urls.clone()))
        }

        fn url(&self, record: &String) -> String {
            record.clone()
        }

        fn sitemap_last_modified(&self) -> Result<DateTime<Utc>> {
            Ok(timestamp("2024-01-15T10:00:00+00:00"))
        }

        fn sitemap_url(&self) -> String {
            "https://example.com/sitemaps/posts.xml".to_string()
        }
    }

    fn timestamp(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_empty_source_yields_well_formed_urlset() {
        let generator = SitemapGenerator::new(GeneratorConfig::default());
        let xml = generator.generate(&Posts { urls: Vec::new() }).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns="));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let posts = Posts {
            urls: vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ],
        };
        let generator = SitemapGenerator::new(GeneratorConfig::default());

        let first = generator.generate(&posts).unwrap();
        let second = generator.generate(&posts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_size_does_not_change_output() {
        let posts = Posts {
            urls: (0..45)
                .map(|n| format!("https://example.com/{n}"))
                .collect(),
        };

        let outputs: Vec<String> = [1, 20, 1000]
            .into_iter()
            .map(|chunk_size| {
                let config = GeneratorConfig {
                    chunk_size,
                    ..GeneratorConfig::default()
                };
                SitemapGenerator::new(config).generate(&posts).unwrap()
            })
            .collect();

        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[1], outputs[2]);
        assert_eq!(outputs[0].matches("<url>").count(), 45);
    }
}
