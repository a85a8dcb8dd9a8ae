//! Error types and handling for atlas-core operations.
//!
//! Errors are categorized along the generation pipeline's failure boundaries:
//! a record-source fault is fatal to the whole generation call (no partial
//! document is ever returned), a descriptor or metadata problem fails only
//! the affected record, and a missing model during index generation is fatal
//! because every registered model must appear in the index.

use thiserror::Error;

/// The main error type for atlas-core operations.
///
/// All public functions in atlas-core return `Result<T, Error>` for
/// consistent error handling. `Display` provides user-friendly messages;
/// the full source chain is preserved where an underlying error exists.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers file system operations such as reading a configuration file,
    /// and the (infallible in practice) in-memory XML writer sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model's sitemap descriptor violated its contract.
    ///
    /// Raised when a descriptor produces values the protocol cannot accept,
    /// e.g. a priority outside `0.0..=1.0`. Fails the affected record or
    /// model entry, not the whole document.
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    /// The record source failed while pulling a chunk.
    ///
    /// Fatal to the current generation call. Nothing is retried internally
    /// and no partial output is returned; retry policy belongs to the
    /// caller.
    #[error("Record source error: {0}")]
    Source(String),

    /// News metadata was missing a required field or failed validation.
    ///
    /// The map construction path defaults publication name and language but
    /// never the publication date or title. Fails the affected record only.
    #[error("News metadata error: {0}")]
    Metadata(String),

    /// A registered model could not be resolved.
    ///
    /// Fatal during index generation, where every registered model must
    /// produce a `<sitemap>` entry. The news generator instead skips
    /// unresolvable models with a warning.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    ///
    /// Covers TOML configuration round-trips and the final document
    /// serialization to UTF-8 text.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Record-source faults are typically transient (the backing store may
    /// recover), as are interrupted I/O operations. Contract violations and
    /// malformed metadata are permanent until the descriptor changes.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Source(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for grouping errors in logs or metrics pipelines.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Descriptor(_) => "descriptor",
            Self::Source(_) => "source",
            Self::Metadata(_) => "metadata",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Descriptor("priority out of range".to_string()),
            Error::Source("connection reset".to_string()),
            Error::Metadata("missing title".to_string()),
            Error::NotFound("model `Post`".to_string()),
            Error::Config("missing field".to_string()),
            Error::Serialization("invalid UTF-8".to_string()),
        ];

        for error in errors {
            let rendered = error.to_string();
            assert!(!rendered.is_empty());
            assert!(rendered.contains(':'), "expected prefix in {rendered:?}");
        }
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::Io(io::Error::other("x")), "io"),
            (Error::Descriptor("x".to_string()), "descriptor"),
            (Error::Source("x".to_string()), "source"),
            (Error::Metadata("x".to_string()), "metadata"),
            (Error::NotFound("x".to_string()), "not_found"),
            (Error::Config("x".to_string()), "config"),
            (Error::Serialization("x".to_string()), "serialization"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Source("transport fault".to_string()).is_recoverable());
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "t")).is_recoverable());
        assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "i")).is_recoverable());

        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "n")).is_recoverable());
        assert!(!Error::Descriptor("bad".to_string()).is_recoverable());
        assert!(!Error::Metadata("bad".to_string()).is_recoverable());
        assert!(!Error::NotFound("bad".to_string()).is_recoverable());
        assert!(!Error::Config("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_chain_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();

        let source = std::error::Error::source(&error);
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("access denied"));
    }
}
