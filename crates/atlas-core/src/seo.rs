//! Per-record SEO metadata boundary.
//!
//! Descriptors supply raw values; [`SeoPresenter`] sanitizes them so a
//! renderer never sees whitespace-only strings. Rendering itself (meta
//! tags, Open Graph, structured data) is out of scope here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Combined values of the robots meta directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotsDirective {
    /// `index,follow`
    IndexFollow,
    /// `noindex,follow`
    NoindexFollow,
    /// `index,nofollow`
    IndexNofollow,
    /// `noindex,nofollow`
    NoindexNofollow,
}

impl RobotsDirective {
    /// The directive string as it appears in a robots meta tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IndexFollow => "index,follow",
            Self::NoindexFollow => "noindex,follow",
            Self::IndexNofollow => "index,nofollow",
            Self::NoindexNofollow => "noindex,nofollow",
        }
    }

    /// Whether crawlers may index the page.
    #[must_use]
    pub const fn allows_index(self) -> bool {
        matches!(self, Self::IndexFollow | Self::IndexNofollow)
    }

    /// Whether crawlers may follow outbound links.
    #[must_use]
    pub const fn allows_follow(self) -> bool {
        matches!(self, Self::IndexFollow | Self::NoindexFollow)
    }
}

impl Default for RobotsDirective {
    fn default() -> Self {
        Self::IndexFollow
    }
}

impl fmt::Display for RobotsDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotsDirective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index,follow" => Ok(Self::IndexFollow),
            "noindex,follow" => Ok(Self::NoindexFollow),
            "index,nofollow" => Ok(Self::IndexNofollow),
            "noindex,nofollow" => Ok(Self::NoindexNofollow),
            other => Err(Error::Descriptor(format!(
                "unknown robots directive: {other}"
            ))),
        }
    }
}

/// Per-record SEO values a content model can supply.
///
/// Every method defaults to `None`; a model overrides only what it has.
pub trait SeoDescriptor {
    /// The record type this descriptor reads from.
    type Record;

    /// Page title.
    fn title(&self, _record: &Self::Record) -> Option<String> {
        None
    }

    /// Meta description.
    fn description(&self, _record: &Self::Record) -> Option<String> {
        None
    }

    /// Canonical URL.
    fn canonical_url(&self, _record: &Self::Record) -> Option<String> {
        None
    }

    /// Robots directive; [`RobotsDirective::default`] applies when absent.
    fn robots(&self, _record: &Self::Record) -> Option<RobotsDirective> {
        None
    }

    /// Comma-separated keywords.
    fn keywords(&self, _record: &Self::Record) -> Option<String> {
        None
    }
}

/// Sanitized view over a descriptor and one record.
///
/// String values are trimmed; whitespace-only values collapse to `None`.
pub struct SeoPresenter<'a, D: SeoDescriptor> {
    descriptor: &'a D,
    record: &'a D::Record,
}

impl<'a, D: SeoDescriptor> SeoPresenter<'a, D> {
    /// Bind a descriptor to one record.
    pub const fn new(descriptor: &'a D, record: &'a D::Record) -> Self {
        Self { descriptor, record }
    }

    /// Sanitized title.
    pub fn title(&self) -> Option<String> {
        sanitize(self.descriptor.title(self.record))
    }

    /// Sanitized description.
    pub fn description(&self) -> Option<String> {
        sanitize(self.descriptor.description(self.record))
    }

    /// Sanitized canonical URL.
    pub fn canonical_url(&self) -> Option<String> {
        sanitize(self.descriptor.canonical_url(self.record))
    }

    /// Robots directive, falling back to the default.
    pub fn robots(&self) -> RobotsDirective {
        self.descriptor.robots(self.record).unwrap_or_default()
    }

    /// Sanitized keywords.
    pub fn keywords(&self) -> Option<String> {
        sanitize(self.descriptor.keywords(self.record))
    }
}

fn sanitize(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
