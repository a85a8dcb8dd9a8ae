//! Object-safe, model-level view used by the index and news generators.
//!
//! [`ModelSitemap`] is generic over its record type, so descriptors for
//! different content models cannot sit in one collection directly.
//! [`SitemapSection`] erases the record type: it exposes the model-level
//! values the index needs plus a single "write your records into this
//! document" operation. [`ModelSection`] adapts any descriptor.

use crate::descriptor::{ModelSitemap, RecordSource};
use crate::serializer::UrlEntryWriter;
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// How records are emitted into a document.
#[derive(Debug, Clone, Copy)]
pub enum EmitMode {
    /// Standard sitemap: every record, no news metadata.
    Standard,
    /// News sitemap: only records whose freshness timestamp lies after the
    /// cutoff, with news metadata forced on.
    News {
        /// Records with a freshness timestamp at or before this instant are
        /// excluded.
        cutoff: DateTime<Utc>,
    },
}

/// Record-type-erased view of one registered content model.
pub trait SitemapSection {
    /// Canonical URL of this model's sub-sitemap.
    fn sitemap_url(&self) -> String;

    /// Last-modified timestamp for the model as a whole.
    fn last_modified(&self) -> Result<DateTime<Utc>>;

    /// Stream this model's records into the document behind `writer`,
    /// chunk by chunk.
    fn write_into(
        &self,
        writer: &mut UrlEntryWriter<'_>,
        mode: EmitMode,
        chunk_size: usize,
    ) -> Result<()>;
}

/// Adapter making any [`ModelSitemap`] usable as a [`SitemapSection`].
#[derive(Debug)]
pub struct ModelSection<D>(pub D);

impl<D: ModelSitemap> SitemapSection for ModelSection<D> {
    fn sitemap_url(&self) -> String {
        self.0.sitemap_url()
    }

    fn last_modified(&self) -> Result<DateTime<Utc>> {
        self.0.sitemap_last_modified()
    }

    fn write_into(
        &self,
        writer: &mut UrlEntryWriter<'_>,
        mode: EmitMode,
        chunk_size: usize,
    ) -> Result<()> {
        drain_into(&self.0, writer, mode, chunk_size)
    }
}

/// Pull a descriptor's records in fixed-size chunks and serialize each one.
///
/// Chunk *i* is fully serialized before chunk *i + 1* is requested. A
/// record-scoped failure (contract violation, bad news metadata) skips that
/// record with a warning; a record-source failure aborts the generation
/// call.
pub(crate) fn drain_into<D: ModelSitemap>(
    sitemap: &D,
    writer: &mut UrlEntryWriter<'_>,
    mode: EmitMode,
    chunk_size: usize,
) -> Result<()> {
    let mut source = sitemap.source()?;

    loop {
        let chunk = source.next_chunk(chunk_size)?;
        if chunk.is_empty() {
            break;
        }

        for record in &chunk {
            let force_news = match mode {
                EmitMode::Standard => false,
                EmitMode::News { cutoff } => {
                    let fresh = sitemap.freshness(record).is_some_and(|ts| ts > cutoff);
                    if !fresh {
                        continue;
                    }
                    true
                }
            };

            match writer.write_entry(sitemap, record, force_news) {
                Ok(_) => {}
                Err(error @ (Error::Descriptor(_) | Error::Metadata(_))) => {
                    tracing::warn!(error = %error, "skipping record");
                }
                Err(error) => return Err(error),
            }
        }
    }

    Ok(())
}
