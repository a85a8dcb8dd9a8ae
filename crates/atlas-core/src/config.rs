//! Configuration for the sitemap generation pipeline.
//!
//! Generation behavior is controlled by a small TOML-backed configuration:
//! the record chunk size, the news freshness window, and the application-wide
//! publication defaults used when news metadata arrives as a loose field map.
//!
//! ## Example configuration file
//!
//! ```toml
//! chunk_size = 20
//! news_window_days = 2
//!
//! [publication]
//! name = "The Example Times"
//! language = "en"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one generation pipeline.
///
/// The defaults reproduce the historical constants: chunks of 20 records and
/// a 2-day news window. Both are configurable because callers with very wide
/// records may want smaller chunks, and news windows are an editorial choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// How many records to pull from a record source per chunk.
    ///
    /// Bounds peak memory regardless of total record count. The generated
    /// document is identical for any chunk size; only fetch granularity
    /// changes.
    pub chunk_size: usize,

    /// How many days back a record's freshness timestamp may lie for the
    /// record to appear in the news sitemap.
    pub news_window_days: i64,

    /// Application-wide publication identity, used to fill gaps when news
    /// metadata is constructed from a loose field map.
    pub publication: PublicationConfig,
}

/// Publication identity defaults for the news sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// Publication name (`<news:name>`) when a record supplies none.
    pub name: String,
    /// Publication language tag (`<news:language>`) when a record supplies
    /// none.
    pub language: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 20,
            news_window_days: 2,
            publication: PublicationConfig::default(),
        }
    }
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            language: "en".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or holds out-of-range values (a zero chunk size would never make
    /// progress).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".to_string()));
        }
        if self.news_window_days < 0 {
            return Err(Error::Config(
                "news_window_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
