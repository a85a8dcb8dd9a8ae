//! Registry of content models that participate in sitemap generation.
//!
//! The registry lists models by name in registration order, flags the
//! subset that is news-eligible, and knows where the consolidated news
//! sitemap lives. It deliberately never filters by any per-record
//! inclusion predicate: the index lists models, not records.

/// One registered content model.
#[derive(Debug, Clone)]
pub struct RegisteredModel {
    name: String,
    news: bool,
}

impl RegisteredModel {
    /// The model name, as the resolver expects it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this model participates in the news sitemap.
    #[must_use]
    pub const fn is_news(&self) -> bool {
        self.news
    }
}

/// Ordered set of registered models plus the news-sitemap location.
#[derive(Debug, Clone)]
pub struct SitemapRegistry {
    models: Vec<RegisteredModel>,
    news_sitemap_url: String,
}

impl SitemapRegistry {
    /// Create a registry whose consolidated news sitemap lives at the given
    /// URL.
    #[must_use]
    pub fn new(news_sitemap_url: impl Into<String>) -> Self {
        Self {
            models: Vec::new(),
            news_sitemap_url: news_sitemap_url.into(),
        }
    }

    /// Register a model. Iteration order is registration order.
    pub fn register(&mut self, name: impl Into<String>) {
        self.models.push(RegisteredModel {
            name: name.into(),
            news: false,
        });
    }

    /// Register a news-eligible model.
    pub fn register_news(&mut self, name: impl Into<String>) {
        self.models.push(RegisteredModel {
            name: name.into(),
            news: true,
        });
    }

    /// Every registered model, in registration order.
    pub fn models(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.iter()
    }

    /// Names of the news-eligible models, in registration order.
    pub fn news_models(&self) -> impl Iterator<Item = &str> {
        self.models
            .iter()
            .filter(|model| model.news)
            .map(RegisteredModel::name)
    }

    /// Whether any registered model is news-eligible.
    #[must_use]
    pub fn has_news_models(&self) -> bool {
        self.models.iter().any(|model| model.news)
    }

    /// URL of the consolidated news sitemap.
    #[must_use]
    pub fn news_sitemap_url(&self) -> &str {
        &self.news_sitemap_url
    }
}
