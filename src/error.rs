//! Error types for manifest resolution.
//!
//! Failures are layered: [`FetchError`] describes a registry request,
//! [`ManifestError`] covers every step of producing a POM file, and
//! [`MetadataError`] is what callers of the dispatch entry point see. Each
//! outer layer adds context and keeps the inner error as its `source`.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while requesting a manifest from the registry.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FetchError {
    /// The registry answered with a non-success status.
    #[error("failed to fetch POM from {url}: HTTP {status} - {reason}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The request never produced a usable response.
    #[error("failed to fetch POM from {url}: {message}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
}

impl FetchError {
    /// Returns the HTTP status code when the registry responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Errors raised while producing a POM file for a Maven identifier.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The identifier lacks a field needed to address the registry.
    #[error("invalid PURL: {reason}")]
    InvalidIdentifier {
        /// Which requirement was not met.
        reason: String,
    },

    /// The manifest could not be downloaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A local filesystem operation failed.
    #[error("failed to {action}: {source}")]
    Io {
        /// The operation that was attempted.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The temporary directory path cannot be represented as UTF-8.
    #[error("temporary path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },
}

/// Errors surfaced by [`crate::metadata::generate_metadata`].
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The identifier carries no type tag, so no ecosystem can be chosen.
    #[error("invalid PURL: missing type")]
    MissingType,

    /// Producing the manifest for a supported identifier failed.
    #[error("failed to create POM file for {purl}: {source}")]
    Manifest {
        /// Canonical string form of the identifier.
        purl: String,
        /// The failure that stopped resolution.
        #[source]
        source: ManifestError,
    },
}

impl MetadataError {
    /// Returns the underlying manifest failure, if any.
    #[must_use]
    pub const fn manifest_error(&self) -> Option<&ManifestError> {
        match self {
            Self::MissingType => None,
            Self::Manifest { source, .. } => Some(source),
        }
    }

    /// Returns true when the identifier was rejected before any request.
    #[must_use]
    pub const fn is_invalid_identifier(&self) -> bool {
        matches!(
            self,
            Self::MissingType
                | Self::Manifest {
                    source: ManifestError::InvalidIdentifier { .. },
                    ..
                }
        )
    }
}

/// Errors raised while loading resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::ResolverConfig`].
    #[error("invalid configuration at {path}: {source}")]
    Parse {
        /// Path to the configuration file, or `<inline>` for string input.
        path: Utf8PathBuf,
        /// The TOML deserialisation error.
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience alias for metadata generation results.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;
