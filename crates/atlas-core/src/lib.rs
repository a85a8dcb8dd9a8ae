//! # atlas-core
//!
//! Core functionality for atlas - an XML sitemap assembly engine for
//! multi-model content sites.
//!
//! This crate turns application content models into standard sitemaps,
//! a sitemap index, and a Google News sitemap. Models describe themselves
//! through the [`ModelSitemap`] trait; the generators pull records in
//! fixed-size chunks, serialize them in source order, and declare exactly
//! the XML namespaces the document body used.
//!
//! ## Architecture
//!
//! The crate is organized around several key components:
//!
//! - **Descriptors**: The per-model contract (URLs, timestamps, images,
//!   translations, news metadata) and record sources
//! - **Generators**: The three entry points producing `urlset`,
//!   `sitemapindex`, and news documents
//! - **Document assembly**: An in-memory element tree serialized once, so
//!   namespace declarations can reflect actual usage
//! - **Error Handling**: Structured errors with categorization and
//!   per-record versus per-call failure scoping
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atlas_core::{GeneratorConfig, SitemapGenerator};
//!
//! let generator = SitemapGenerator::new(GeneratorConfig::default());
//! let xml = generator.generate(&posts_sitemap)?;
//! # Ok::<(), atlas_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`]. A contract violation in one
//! record (a bad priority, invalid news metadata) skips that record with a
//! warning; a failing record source aborts the generation call, so callers
//! never receive a partial document.

/// Generator and publication configuration
pub mod config;
/// Per-model sitemap contract and record sources
pub mod descriptor;
/// In-memory document tree and XML serialization
pub mod document;
/// Sitemap, index, and news generation entry points
pub mod generator;
/// Error types and result aliases
pub mod error;
/// XML text escaping
pub mod escape;
/// Namespace constants and usage tracking
pub mod namespace;
/// Google News publication metadata
pub mod news;
/// Registry of models participating in generation
pub mod registry;
/// Model-name to section resolution with optional memoization
pub mod resolver;
/// Record-type-erased model sections
pub mod section;
/// Per-record SEO metadata boundary
pub mod seo;
/// Per-URL entry serialization
pub mod serializer;

// Re-export commonly used types
pub use config::{GeneratorConfig, PublicationConfig};
pub use descriptor::{ChangeFrequency, ModelSitemap, NewsSource, RecordSource, Translation, VecSource};
pub use document::{RootKind, SitemapDocument, XmlElement};
pub use error::{Error, Result};
pub use generator::{IndexGenerator, NewsSitemapGenerator, SitemapGenerator};
pub use namespace::{NamespaceKind, NamespaceUsage};
pub use news::NewsMetadata;
pub use registry::{RegisteredModel, SitemapRegistry};
pub use resolver::{CachedResolver, SectionResolver, StaticResolver};
pub use section::{EmitMode, ModelSection, SitemapSection};
pub use seo::{RobotsDirective, SeoDescriptor, SeoPresenter};
pub use serializer::UrlEntryWriter;
