//! In-memory sitemap document and final XML serialization.
//!
//! A [`SitemapDocument`] owns one root element (`urlset` or `sitemapindex`)
//! and the entry elements appended while a generation call runs. The base
//! Sitemap namespace is fixed at document creation; the optional extension
//! namespaces are decided by the [`NamespaceUsage`] tracker at serialization
//! time, so the root declares exactly the set the body actually used.
//!
//! Serialization produces pretty-printed UTF-8 text with an XML declaration
//! via `quick-xml`'s indenting writer. Element and attribute names are
//! statically known; all text content passes through the escaper.

use crate::escape::escape_text;
use crate::namespace::{NamespaceUsage, SITEMAP_NS};
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Format a timestamp as RFC 3339 with a timezone offset ("atom" form),
/// e.g. `2024-01-15T10:00:00+00:00`.
#[must_use]
pub fn format_atom(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Which root element a document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// `<urlset>` — a standard or news sitemap.
    Urlset,
    /// `<sitemapindex>` — an index of sub-sitemaps.
    SitemapIndex,
}

impl RootKind {
    /// The root element tag name.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Urlset => "urlset",
            Self::SitemapIndex => "sitemapindex",
        }
    }
}

/// One element in the document body.
///
/// Tag and attribute names are statically known protocol vocabulary; only
/// attribute values and text content are dynamic. Text is stored raw and
/// escaped during serialization, so no dynamic string can reach the output
/// unescaped.
#[derive(Debug, Clone)]
pub struct XmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no attributes, text, or children.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create an element holding text content.
    #[must_use]
    pub fn with_text(name: &'static str, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.text = Some(text.into());
        element
    }

    /// Append an attribute. Values are escaped at write time.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        self.attributes.push((name, value.into()));
    }

    /// Append a child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// The element's tag name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the element has neither text nor children.
    ///
    /// Such elements serialize self-closing (`<xhtml:link .../>`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

/// An XML document under construction for one generation call.
///
/// Produced fresh per call, never mutated after final serialization, and
/// never shared across calls.
#[derive(Debug)]
pub struct SitemapDocument {
    root: RootKind,
    entries: Vec<XmlElement>,
}

impl SitemapDocument {
    /// Create an empty document with the given root.
    #[must_use]
    pub const fn new(root: RootKind) -> Self {
        Self {
            root,
            entries: Vec::new(),
        }
    }

    /// Append one entry element to the document body.
    pub fn append(&mut self, entry: XmlElement) {
        self.entries.push(entry);
    }

    /// Number of entries appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the body is empty. An empty body still serializes to a
    /// well-formed document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to pretty-printed UTF-8 XML text.
    ///
    /// The root element always declares the base Sitemap namespace; the
    /// tracker contributes `xmlns:*` declarations for exactly the optional
    /// namespaces the body used.
    pub fn to_xml(&self, namespaces: &NamespaceUsage) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(ser_err)?;

        let mut root = BytesStart::new(self.root.tag());
        root.push_attribute(("xmlns", SITEMAP_NS));
        for (attribute, uri) in namespaces.declarations() {
            root.push_attribute((attribute, uri));
        }
        writer.write_event(Event::Start(root)).map_err(ser_err)?;

        for entry in &self.entries {
            write_element(&mut writer, entry)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.root.tag())))
            .map_err(ser_err)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name);
    for (name, value) in &element.attributes {
        start.push_attribute((*name, value.as_str()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(ser_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(ser_err)?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::from_escaped(escape_text(text))))
            .map_err(ser_err)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name)))
        .map_err(ser_err)?;
    Ok(())
}

fn ser_err(err: impl std::fmt::Display) -> Error {
    Error::Serialization(err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceKind;

    #[test]
    fn test_empty_urlset_is_well_formed() {
        let document = SitemapDocument::new(RootKind::Urlset);
        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(xml.contains("</urlset>") || xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_index_root_tag() {
        let document = SitemapDocument::new(RootKind::SitemapIndex);
        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        assert!(xml.contains("<sitemapindex xmlns="));
    }

    #[test]
    fn test_text_content_is_escaped_on_write() {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut entry = XmlElement::new("url");
        entry.push(XmlElement::with_text(
            "loc",
            "https://example.com/page?a=1&b=2",
        ));
        document.append(entry);

        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        assert!(xml.contains("<loc>https://example.com/page?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_attribute_values_are_escaped_on_write() {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut entry = XmlElement::new("url");
        let mut link = XmlElement::new("xhtml:link");
        link.set_attr("href", "https://example.com/?a=1&b=2");
        entry.push(link);
        document.append(entry);

        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        assert!(xml.contains("href=\"https://example.com/?a=1&amp;b=2\""));
    }

    #[test]
    fn test_empty_element_is_self_closing() {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut entry = XmlElement::new("url");
        let mut link = XmlElement::new("xhtml:link");
        link.set_attr("rel", "alternate");
        entry.push(link);
        document.append(entry);

        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        assert!(xml.contains("<xhtml:link rel=\"alternate\"/>"));
    }

    #[test]
    fn test_namespace_declarations_follow_tracker() {
        let mut usage = NamespaceUsage::new();
        usage.mark(NamespaceKind::News);

        let document = SitemapDocument::new(RootKind::Urlset);
        let xml = document.to_xml(&usage).unwrap();

        assert!(xml.contains("xmlns:news=\"http://www.google.com/schemas/sitemap-news/0.9\""));
        assert!(!xml.contains("xmlns:image"));
        assert!(!xml.contains("xmlns:xhtml"));
    }

    #[test]
    fn test_output_is_indented() {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        let mut entry = XmlElement::new("url");
        entry.push(XmlElement::with_text("loc", "https://example.com/a"));
        document.append(entry);

        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        assert!(xml.contains("\n  <url>"));
        assert!(xml.contains("\n    <loc>"));
    }

    #[test]
    fn test_element_order_is_preserved() {
        let mut document = SitemapDocument::new(RootKind::Urlset);
        for n in 1..=3 {
            let mut entry = XmlElement::new("url");
            entry.push(XmlElement::with_text("loc", format!("https://example.com/{n}")));
            document.append(entry);
        }

        let xml = document.to_xml(&NamespaceUsage::new()).unwrap();
        let first = xml.find("https://example.com/1").unwrap();
        let second = xml.find("https://example.com/2").unwrap();
        let third = xml.find("https://example.com/3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_format_atom() {
        let timestamp = DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_atom(&timestamp), "2024-01-15T10:00:00+00:00");
    }
}
