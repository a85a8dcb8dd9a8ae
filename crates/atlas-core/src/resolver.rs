//! Descriptor resolution: model name to sitemap section.
//!
//! How an application maps a content-model name to its descriptor is its
//! own business (direct lookup, naming convention, dependency injection);
//! the generators only see this trait. Caching is explicit and injected:
//! [`CachedResolver`] wraps any resolver with a memo whose lifetime the
//! caller chooses, typically one per generation run. There is no
//! process-wide mutable state.

use crate::section::SitemapSection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves a registered model name to its sitemap section.
pub trait SectionResolver {
    /// Look up a model by name. `None` means the model is unknown or no
    /// longer satisfies the sitemap contract.
    fn resolve(&self, model: &str) -> Option<Arc<dyn SitemapSection>>;
}

/// A resolver backed by a pre-built map of sections.
#[derive(Default)]
pub struct StaticResolver {
    sections: HashMap<String, Arc<dyn SitemapSection>>,
}

impl StaticResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section under a model name, replacing any previous entry.
    pub fn insert(&mut self, model: impl Into<String>, section: Arc<dyn SitemapSection>) {
        self.sections.insert(model.into(), section);
    }
}

impl SectionResolver for StaticResolver {
    fn resolve(&self, model: &str) -> Option<Arc<dyn SitemapSection>> {
        self.sections.get(model).cloned()
    }
}

/// Memoizes another resolver's lookups, including misses.
///
/// The cache lives as long as the resolver instance; drop it to forget.
pub struct CachedResolver<R> {
    inner: R,
    cache: RefCell<HashMap<String, Option<Arc<dyn SitemapSection>>>>,
}

impl<R: SectionResolver> CachedResolver<R> {
    /// Wrap a resolver with an empty memo.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<R: SectionResolver> SectionResolver for CachedResolver<R> {
    fn resolve(&self, model: &str) -> Option<Arc<dyn SitemapSection>> {
        if let Some(cached) = self.cache.borrow().get(model) {
            return cached.clone();
        }
        let resolved = self.inner.resolve(model);
        self.cache
            .borrow_mut()
            .insert(model.to_string(), resolved.clone());
        resolved
    }
}
