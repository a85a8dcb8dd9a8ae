//! Namespace usage tracking for conditional `xmlns:*` declarations.
//!
//! A sitemap document always declares the base Sitemap namespace on its root
//! element. The three optional namespaces (image, news, xhtml) are declared
//! if and only if at least one element of that kind was written to the body.
//! The tracker records usage while the body is built and is consulted once,
//! at serialization time, to emit exactly the right declarations.

use serde::{Deserialize, Serialize};

/// Base Sitemap protocol namespace, always declared on the root element.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Google image sitemap extension namespace.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Google News sitemap extension namespace.
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

/// XHTML namespace, used for `xhtml:link` alternate-language entries.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// The optional namespaces a sitemap body may pull in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    /// `image:` elements for image URLs attached to a page.
    Image,
    /// `news:` elements for Google News publication metadata.
    News,
    /// `xhtml:link` alternate-language link elements.
    Xhtml,
}

impl NamespaceKind {
    /// The `xmlns:*` attribute name declared on the root element.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Image => "xmlns:image",
            Self::News => "xmlns:news",
            Self::Xhtml => "xmlns:xhtml",
        }
    }

    /// The fixed namespace URI.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Image => IMAGE_NS,
            Self::News => NEWS_NS,
            Self::Xhtml => XHTML_NS,
        }
    }
}

/// Tracks which optional namespaces have been used while building one
/// document.
///
/// Flags are monotonic: they are set the first time a corresponding element
/// is written and never reset. One tracker is scoped to one generation call;
/// there is no cross-call shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamespaceUsage {
    image: bool,
    news: bool,
    xhtml: bool,
}

impl NamespaceUsage {
    /// Create a tracker with no namespaces marked used.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            image: false,
            news: false,
            xhtml: false,
        }
    }

    /// Record that an element of the given kind was written to the body.
    pub const fn mark(&mut self, kind: NamespaceKind) {
        match kind {
            NamespaceKind::Image => self.image = true,
            NamespaceKind::News => self.news = true,
            NamespaceKind::Xhtml => self.xhtml = true,
        }
    }

    /// Whether the given kind has been used.
    #[must_use]
    pub const fn is_used(&self, kind: NamespaceKind) -> bool {
        match kind {
            NamespaceKind::Image => self.image,
            NamespaceKind::News => self.news,
            NamespaceKind::Xhtml => self.xhtml,
        }
    }

    /// Fold another tracker's marks into this one.
    ///
    /// The serializer stages marks on a local tracker and commits them only
    /// when the record's element is actually appended, so a skipped or
    /// failed record leaves the document tracker untouched.
    pub const fn merge(&mut self, other: Self) {
        self.image |= other.image;
        self.news |= other.news;
        self.xhtml |= other.xhtml;
    }

    /// The `(attribute, uri)` declarations the root element needs.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, &'static str)> {
        [NamespaceKind::Image, NamespaceKind::News, NamespaceKind::Xhtml]
            .into_iter()
            .filter(|kind| self.is_used(*kind))
            .map(|kind| (kind.attribute(), kind.uri()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_has_no_declarations() {
        let usage = NamespaceUsage::new();
        assert!(usage.declarations().is_empty());
    }

    #[test]
    fn test_mark_is_monotonic() {
        let mut usage = NamespaceUsage::new();
        usage.mark(NamespaceKind::Image);
        usage.mark(NamespaceKind::Image);

        assert!(usage.is_used(NamespaceKind::Image));
        assert!(!usage.is_used(NamespaceKind::News));
        assert!(!usage.is_used(NamespaceKind::Xhtml));
        assert_eq!(usage.declarations(), vec![("xmlns:image", IMAGE_NS)]);
    }

    #[test]
    fn test_declarations_are_ordered_and_complete() {
        let mut usage = NamespaceUsage::new();
        usage.mark(NamespaceKind::Xhtml);
        usage.mark(NamespaceKind::News);
        usage.mark(NamespaceKind::Image);

        assert_eq!(
            usage.declarations(),
            vec![
                ("xmlns:image", IMAGE_NS),
                ("xmlns:news", NEWS_NS),
                ("xmlns:xhtml", XHTML_NS),
            ]
        );
    }

    #[test]
    fn test_merge_folds_marks() {
        let mut staged = NamespaceUsage::new();
        staged.mark(NamespaceKind::News);

        let mut shared = NamespaceUsage::new();
        shared.mark(NamespaceKind::Image);
        shared.merge(staged);

        assert!(shared.is_used(NamespaceKind::Image));
        assert!(shared.is_used(NamespaceKind::News));
        assert!(!shared.is_used(NamespaceKind::Xhtml));
    }

    #[test]
    fn test_uri_constants() {
        assert_eq!(NamespaceKind::Image.uri(), IMAGE_NS);
        assert_eq!(NamespaceKind::News.uri(), NEWS_NS);
        assert_eq!(NamespaceKind::Xhtml.uri(), XHTML_NS);
    }
}
