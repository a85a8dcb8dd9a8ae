//! Serialization of one content record into one `<url>` element.
//!
//! The writer builds the element children in the order the Sitemap protocol
//! requires: `loc`, `lastmod`, `priority`, `changefreq`, then the optional
//! extension elements (`xhtml:link` alternates, `image:image` entries, and
//! the `news:news` block). Namespace marks are staged on a local tracker and
//! committed to the document's tracker only when the element is actually
//! appended, so an excluded or failed record has no side effects.

use crate::config::PublicationConfig;
use crate::descriptor::{ModelSitemap, NewsSource};
use crate::document::{SitemapDocument, XmlElement, format_atom};
use crate::namespace::{NamespaceKind, NamespaceUsage};
use crate::news::NewsMetadata;
use crate::{Error, Result};
use url::Url;

/// Writes `<url>` entries into one document under construction.
///
/// One writer is scoped to one generation call, borrowing the call's
/// document and namespace tracker.
pub struct UrlEntryWriter<'a> {
    document: &'a mut SitemapDocument,
    namespaces: &'a mut NamespaceUsage,
    publication: &'a PublicationConfig,
}

impl<'a> UrlEntryWriter<'a> {
    /// Create a writer over the given document and tracker.
    pub fn new(
        document: &'a mut SitemapDocument,
        namespaces: &'a mut NamespaceUsage,
        publication: &'a PublicationConfig,
    ) -> Self {
        Self {
            document,
            namespaces,
            publication,
        }
    }

    /// Serialize one record into one `<url>` element.
    ///
    /// Returns `Ok(false)` when the model's inclusion predicate excludes the
    /// record (nothing is emitted). `force_news` is true only inside the
    /// dedicated news-sitemap flow; news metadata is emitted when it is set
    /// and the model flags the record type as a news item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Descriptor`] for contract violations (priority out
    /// of range) and [`Error::Metadata`] when required news metadata is
    /// missing or invalid. Both fail this record only; callers skip the
    /// record and keep the document.
    pub fn write_entry<D: ModelSitemap>(
        &mut self,
        sitemap: &D,
        record: &D::Record,
        force_news: bool,
    ) -> Result<bool> {
        if !sitemap.should_include(record) {
            return Ok(false);
        }

        let mut entry = XmlElement::new("url");
        let mut staged = NamespaceUsage::new();

        let url = sitemap.url(record);
        if !url.is_empty() {
            entry.push(XmlElement::with_text("loc", url));
        }

        if let Some(last_modified) = sitemap.last_modified(record) {
            entry.push(XmlElement::with_text("lastmod", format_atom(&last_modified)));
        }

        if let Some(priority) = sitemap.priority(record) {
            if !(0.0..=1.0).contains(&priority) {
                return Err(Error::Descriptor(format!(
                    "priority {priority} is outside 0.0..=1.0"
                )));
            }
            entry.push(XmlElement::with_text("priority", format!("{priority}")));
        }

        if let Some(frequency) = sitemap.change_frequency(record) {
            entry.push(XmlElement::with_text("changefreq", frequency.as_str()));
        }

        if sitemap.has_translations() {
            for translation in sitemap.translations(record) {
                if translation.language.is_empty() || Url::parse(&translation.href).is_err() {
                    tracing::debug!(
                        language = %translation.language,
                        href = %translation.href,
                        "dropping translation link without language or absolute URL"
                    );
                    continue;
                }
                let mut link = XmlElement::new("xhtml:link");
                link.set_attr("rel", "alternate");
                link.set_attr("hreflang", translation.language);
                link.set_attr("href", translation.href);
                entry.push(link);
                staged.mark(NamespaceKind::Xhtml);
            }
        }

        if sitemap.has_images() {
            for image_url in sitemap.images(record) {
                if image_url.is_empty() {
                    tracing::debug!("dropping empty image URL");
                    continue;
                }
                let mut image = XmlElement::new("image:image");
                image.push(XmlElement::with_text("image:loc", image_url));
                entry.push(image);
                staged.mark(NamespaceKind::Image);
            }
        }

        if force_news && sitemap.is_news_item() {
            let metadata = self.resolve_news_metadata(sitemap, record)?;
            entry.push(news_element(metadata));
            staged.mark(NamespaceKind::News);
        }

        self.document.append(entry);
        self.namespaces.merge(staged);
        Ok(true)
    }

    /// Normalize either metadata shape through the one constructor contract.
    fn resolve_news_metadata<D: ModelSitemap>(
        &self,
        sitemap: &D,
        record: &D::Record,
    ) -> Result<NewsMetadata> {
        let source = sitemap
            .news_source(record)
            .ok_or_else(|| Error::Metadata("news model produced no metadata".to_string()))?;

        let metadata = match source {
            NewsSource::Metadata(metadata) => metadata,
            NewsSource::Fields(fields) => NewsMetadata::from_fields(&fields, self.publication)?,
        };

        if !metadata.is_valid() {
            return Err(Error::Metadata(
                "news metadata has empty required fields".to_string(),
            ));
        }
        Ok(metadata)
    }
}

fn news_element(metadata: NewsMetadata) -> XmlElement {
    let date_string = metadata.publication_date_string();

    let mut publication = XmlElement::new("news:publication");
    publication.push(XmlElement::with_text("news:name", metadata.publication_name));
    publication.push(XmlElement::with_text(
        "news:language",
        metadata.publication_language,
    ));

    let mut news = XmlElement::new("news:news");
    news.push(publication);
    news.push(XmlElement::with_text("news:publication_date", date_string));
    news.push(XmlElement::with_text("news:title", metadata.title));
    news
}
