//! Error types for the purlbom CLI.

use purlbom::error::{ConfigError, MetadataError};
use purlbom::purl::PurlParseError;
use thiserror::Error;

/// Errors that end a CLI run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// The positional argument is not a package URL.
    #[error(transparent)]
    InvalidPurl(#[from] PurlParseError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Metadata generation failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The JSON report could not be rendered.
    #[error("failed to render JSON report: {0}")]
    Render(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
