//! Error types for forum search operations.

use std::path::{Path, PathBuf};

/// Errors that can occur while maintaining the forum search index.
///
/// Variants are marked `#[non_exhaustive]` so that new index backends can
/// introduce failure modes without breaking callers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A referenced topic, group, or section does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of forum record that was looked up ("topic", "group", "section").
        kind: &'static str,
        /// Identifier that was not found
        id: u64,
    },

    /// The index store could not complete a request.
    #[error("Index unavailable: {message}")]
    IndexUnavailable {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the path that caused it
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::de::Error),
}

/// Convenience `Result` type alias for forum search operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is worth retrying.
    ///
    /// Index and I/O failures are transient from the caller's point of view.
    /// Missing forum records and bad configuration are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::IndexUnavailable { .. } => true,
            Error::Io { .. } => true,
            Error::NotFound { .. } => false,
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Creates a not-found error for a forum record.
    pub fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates a new index-unavailable error.
    pub fn index_unavailable<S: Into<String>>(message: S) -> Self {
        Error::IndexUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new index-unavailable error with a source error.
    pub fn index_unavailable_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::IndexUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
